//! State definitions for the home ledger contract

use common::TrustedRemote;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdError, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Administrator for all configuration calls
    pub owner: Addr,
    /// Message-relay endpoint on this chain
    pub relay_endpoint: Addr,
    /// USD price feed for the native and stable assets
    pub price_feed: Addr,
    /// Margin account credited with deposits and debited on withdrawals
    pub margin_account: Addr,
    /// Insurance fund credited with insurance deposits
    pub insurance_fund: Addr,
    /// Relay chain id of the remote ledger
    pub remote_chain_id: u16,
    /// Denom of this chain's native gas token
    pub native_denom: String,
    pub native_decimals: u8,
    /// Price-feed id of the native gas token
    pub native_price_feed_id: String,
}

/// Collateral token as known to the settlement chain
#[cw_serde]
pub struct TokenConfig {
    pub price_feed_id: String,
    pub decimals: u8,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:home-ledger";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

/// Key: token index
pub const SUPPORTED_TOKENS: Map<u32, TokenConfig> = Map::new("supported_tokens");

/// Value currently backed by deposits, per token index
pub const CIRCULATING_SUPPLY: Map<u32, Uint128> = Map::new("circulating_supply");

/// Key: remote chain id
pub const TRUSTED_REMOTES: Map<u16, TrustedRemote> = Map::new("trusted_remotes");

/// Last nonce sent per destination chain
pub const OUTBOUND_NONCE: Map<u16, u64> = Map::new("outbound_nonce");

/// Last relay nonce received per source chain
pub const INBOUND_NONCE: Map<u16, u64> = Map::new("inbound_nonce");

/// Relay deliveries already processed
/// Key: (src_chain_id, nonce)
pub const RELAY_NONCE_USED: Map<(u16, u64), bool> = Map::new("relay_nonce_used");

// ============================================================================
// Helpers
// ============================================================================

/// Bump and return the outbound nonce for `chain_id`. The first send is 1.
pub fn next_outbound_nonce(storage: &mut dyn Storage, chain_id: u16) -> StdResult<u64> {
    let nonce = OUTBOUND_NONCE
        .may_load(storage, chain_id)?
        .unwrap_or_default()
        + 1;
    OUTBOUND_NONCE.save(storage, chain_id, &nonce)?;
    Ok(nonce)
}

pub fn circulating_supply(storage: &dyn Storage, token_index: u32) -> StdResult<Uint128> {
    Ok(CIRCULATING_SUPPLY
        .may_load(storage, token_index)?
        .unwrap_or_default())
}

fn pow10(exp: u8) -> StdResult<Uint128> {
    10u128
        .checked_pow(exp as u32)
        .map(Uint128::new)
        .ok_or_else(|| StdError::generic_err(format!("decimal gap {} too large", exp)))
}

/// Rescale a token amount to native gas decimals, truncating.
pub fn to_native_amount(
    amount: Uint128,
    token_decimals: u8,
    native_decimals: u8,
) -> StdResult<Uint128> {
    if native_decimals >= token_decimals {
        Ok(amount.checked_mul(pow10(native_decimals - token_decimals)?)?)
    } else {
        amount
            .checked_div(pow10(token_decimals - native_decimals)?)
            .map_err(|e| StdError::generic_err(e.to_string()))
    }
}
