//! Execute handlers for the home ledger contract.
//!
//! - `receive` - relayed deposits
//! - `withdraw` - user withdrawals and the relay self-call
//! - `config` - owner-gated configuration

mod config;
mod receive;
mod withdraw;

pub use config::*;
pub use receive::*;
pub use withdraw::*;

use cosmwasm_std::{Coin, Deps, MessageInfo, Uint128};

use crate::error::ContractError;
use crate::state::{Config, TokenConfig, SUPPORTED_TOKENS};

pub(crate) fn ensure_owner(config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.owner {
        return Err(ContractError::NotOwner);
    }
    Ok(())
}

pub(crate) fn load_token(deps: Deps, token_index: u32) -> Result<TokenConfig, ContractError> {
    SUPPORTED_TOKENS
        .may_load(deps.storage, token_index)?
        .ok_or(ContractError::TokenNotSupported { token_index })
}

/// Native coins to attach; empty when the amount is zero.
pub(crate) fn native_funds(denom: &str, amount: Uint128) -> Vec<Coin> {
    if amount.is_zero() {
        vec![]
    } else {
        vec![Coin::new(amount.u128(), denom)]
    }
}
