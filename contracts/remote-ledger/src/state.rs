//! State definitions for the remote ledger contract

use common::TrustedRemote;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
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
    /// Liquidity-swap router used for outbound swaps
    pub stargate_router: Option<Addr>,
    /// USD price feed for the native and stable assets
    pub price_feed: Addr,
    /// Relay chain id of the settlement chain
    pub home_chain_id: u16,
    /// Denom of this chain's native gas token
    pub native_denom: String,
    pub native_decimals: u8,
    /// Price-feed id of the native gas token
    pub native_price_feed_id: String,
}

/// Supported stable asset
#[cw_serde]
pub struct TokenConfig {
    /// CW20 contract of the stable asset
    pub token: Addr,
    pub price_feed_id: String,
    /// Stable-denominated fees retained for paying relay and swap gas
    pub collected_fee: Uint128,
    /// Liquidity-swap pool holding this asset on this chain
    pub src_pool_id: u64,
    pub decimals: u8,
}

/// Context of the forward currently running inside a sub-message
#[cw_serde]
pub struct PendingForward {
    pub src_chain_id: u16,
    pub dst_chain_id: u16,
    pub nonce: u64,
    pub to: String,
    pub token: Addr,
    pub amount: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:remote-ledger";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reply id of a swap-triggered deposit forward
pub const REPLY_FORWARD_DEPOSIT: u64 = 1;

/// Reply id of a relay-triggered withdrawal forward
pub const REPLY_FORWARD_WITHDRAW: u64 = 2;

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

/// Key: token index
pub const SUPPORTED_TOKENS: Map<u32, TokenConfig> = Map::new("supported_tokens");

/// Contracts allowed to deliver liquidity-swap callbacks
pub const WHITELISTED_RELAYERS: Map<&Addr, bool> = Map::new("whitelisted_relayers");

/// Key: remote chain id
pub const TRUSTED_REMOTES: Map<u16, TrustedRemote> = Map::new("trusted_remotes");

/// Last nonce sent per destination chain
pub const OUTBOUND_NONCE: Map<u16, u64> = Map::new("outbound_nonce");

/// Last relay nonce received per source chain
pub const INBOUND_NONCE: Map<u16, u64> = Map::new("inbound_nonce");

/// Relay deliveries already processed
/// Key: (src_chain_id, nonce)
pub const RELAY_NONCE_USED: Map<(u16, u64), bool> = Map::new("relay_nonce_used");

/// Swap deliveries already processed
/// Key: (src_chain_id, nonce)
pub const SWAP_NONCE_USED: Map<(u16, u64), bool> = Map::new("swap_nonce_used");

/// Rescue balances
/// Key: (token, recipient), Value: owed amount in token decimals
pub const PENDING_FUNDS: Map<(&Addr, &str), Uint128> = Map::new("pending_funds");

/// Sum of all rescue balances per token
pub const PENDING_TOTAL: Map<&Addr, Uint128> = Map::new("pending_total");

pub const PENDING_FORWARD: Item<PendingForward> = Item::new("pending_forward");

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
