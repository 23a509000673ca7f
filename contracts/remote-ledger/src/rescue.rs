//! Pending rescue ledger
//!
//! Value that could not be forwarded on its expected hop is owed to the
//! intended recipient, per token. Balances only grow on a forwarding failure
//! and only shrink through the owner's own rescue call.
//!
//! `debit` writes the reduced balance before the caller builds the transfer
//! message, so a re-entrant claim sees the already-reduced entry.

use cosmwasm_std::{Addr, Api, StdError, StdResult, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{PENDING_FUNDS, PENDING_TOTAL};

/// Amount of `token` owed to `recipient`
pub fn pending(storage: &dyn Storage, token: &Addr, recipient: &str) -> StdResult<Uint128> {
    Ok(PENDING_FUNDS
        .may_load(storage, (token, recipient))?
        .unwrap_or_default())
}

/// Sum of all balances owed in `token`
pub fn pending_total(storage: &dyn Storage, token: &Addr) -> StdResult<Uint128> {
    Ok(PENDING_TOTAL.may_load(storage, token)?.unwrap_or_default())
}

/// Who is owed a forward to `to` that fails: `to` itself when it is a valid
/// address on this chain, otherwise `refund_address`. `None` when neither can
/// ever claim.
pub fn beneficiary(api: &dyn Api, to: &str, refund_address: &str) -> Option<String> {
    api.addr_validate(to)
        .or_else(|_| api.addr_validate(refund_address))
        .ok()
        .map(String::from)
}

/// Add `amount` to the recipient's balance; returns the new balance.
pub fn credit(
    storage: &mut dyn Storage,
    token: &Addr,
    recipient: &str,
    amount: Uint128,
) -> StdResult<Uint128> {
    let balance = pending(storage, token, recipient)?.checked_add(amount)?;
    if amount.is_zero() {
        return Ok(balance);
    }
    PENDING_FUNDS.save(storage, (token, recipient), &balance)?;

    let total = pending_total(storage, token)?.checked_add(amount)?;
    PENDING_TOTAL.save(storage, token, &total)?;
    Ok(balance)
}

/// Remove `amount` from the recipient's balance; returns what remains.
///
/// Leaves the entry untouched when `amount` exceeds it.
pub fn debit(
    storage: &mut dyn Storage,
    token: &Addr,
    recipient: &str,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let available = pending(storage, token, recipient)?;
    if amount > available {
        return Err(ContractError::InsufficientPendingFunds {
            requested: amount,
            available,
        });
    }

    let remaining = available - amount;
    if remaining.is_zero() {
        PENDING_FUNDS.remove(storage, (token, recipient));
    } else {
        PENDING_FUNDS.save(storage, (token, recipient), &remaining)?;
    }

    let total = pending_total(storage, token)?
        .checked_sub(amount)
        .map_err(StdError::from)?;
    PENDING_TOTAL.save(storage, token, &total)?;
    Ok(remaining)
}
