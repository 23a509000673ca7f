//! Execute handlers for the remote ledger contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `inbound` - swap and relay deliveries, plus the fallback `reply`
//! - `forward` - the self-call forwards run inside a rollback boundary
//! - `deposit` - direct deposits from this chain
//! - `rescue` - claims against the pending rescue ledger
//! - `config` - owner-gated configuration

mod config;
mod deposit;
mod forward;
mod inbound;
mod rescue;

pub use config::*;
pub use deposit::*;
pub use forward::*;
pub use inbound::*;
pub use rescue::*;

use cosmwasm_std::{Addr, Deps, Env, MessageInfo, Uint128};

use crate::error::ContractError;
use crate::state::{Config, TokenConfig, SUPPORTED_TOKENS};

pub(crate) fn ensure_owner(config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.owner {
        return Err(ContractError::NotOwner);
    }
    Ok(())
}

pub(crate) fn ensure_self(env: &Env, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::OnlySelf);
    }
    Ok(())
}

pub(crate) fn load_token(deps: Deps, token_index: u32) -> Result<TokenConfig, ContractError> {
    SUPPORTED_TOKENS
        .may_load(deps.storage, token_index)?
        .ok_or(ContractError::TokenNotSupported { token_index })
}

/// Amount of `denom` attached to the call
pub(crate) fn paid_amount(info: &MessageInfo, denom: &str) -> Uint128 {
    info.funds
        .iter()
        .find(|c| c.denom == denom)
        .map(|c| c.amount)
        .unwrap_or_default()
}

/// Fail unless this contract holds at least `required` native gas.
pub(crate) fn ensure_native_balance(
    deps: Deps,
    contract: &Addr,
    denom: &str,
    required: Uint128,
) -> Result<(), ContractError> {
    let available = deps.querier.query_balance(contract, denom)?.amount;
    if available < required {
        return Err(ContractError::InsufficientNativeToken {
            required,
            available,
        });
    }
    Ok(())
}
