//! Message types for the home ledger contract

use common::TrustedRemote;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub relay_endpoint: String,
    pub price_feed: String,
    pub margin_account: String,
    pub insurance_fund: String,
    /// Relay chain id of the remote ledger
    pub remote_chain_id: u16,
    pub native_denom: String,
    pub native_decimals: u8,
    pub native_price_feed_id: String,
}

/// Parameters of a withdrawal from the settlement chain
#[cw_serde]
pub struct WithdrawVars {
    /// Final chain of the swap hop, 0 to be paid out on the remote chain
    pub second_hop_chain_id: u16,
    pub destination_pool_id: u64,
    pub to: String,
    pub token_index: u32,
    pub amount: Uint128,
    /// Minimum amount accepted on the final chain
    pub amount_min: Uint128,
    /// Receives any native fee attached beyond the relay quote
    pub refund_address: String,
    pub zro_payment_address: Option<String>,
    pub adapter_params: Binary,
}

/// Transfer described by a relayed message, for the `send_to_chain` event
#[cw_serde]
pub struct TransferSummary {
    pub from: String,
    pub to: String,
    pub token_index: u32,
    pub amount: Uint128,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    /// Deposit relayed from the remote ledger.
    ///
    /// Authorization: relay endpoint, from the trusted remote
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },

    /// Withdraw margin to another chain. The relay fee is attached in native
    /// gas; any excess is refunded.
    Withdraw(WithdrawVars),

    /// Send an encoded payload through the relay.
    ///
    /// Authorization: this contract only
    SendRelayMessage {
        dst_chain_id: u16,
        payload: Binary,
        refund_address: String,
        zro_payment_address: Option<String>,
        adapter_params: Binary,
        native_fee: Uint128,
        transfer: TransferSummary,
    },

    // ========================================================================
    // Administration
    // ========================================================================
    SetTrustedRemote {
        chain_id: u16,
        remote: TrustedRemote,
    },

    SetSupportedToken {
        token_index: u32,
        price_feed_id: String,
        decimals: u8,
    },

    UpdateConfig {
        relay_endpoint: Option<String>,
        price_feed: Option<String>,
        margin_account: Option<String>,
        insurance_fund: Option<String>,
        remote_chain_id: Option<u16>,
        native_price_feed_id: Option<String>,
    },

    TransferOwnership { new_owner: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(CirculatingSupplyResponse)]
    CirculatingSupply { token_index: u32 },

    #[returns(TokenConfigResponse)]
    SupportedToken { token_index: u32 },

    #[returns(TrustedRemoteResponse)]
    TrustedRemote { chain_id: u16 },

    #[returns(NonceResponse)]
    OutboundNonce { chain_id: u16 },

    #[returns(NonceResponse)]
    InboundNonce { chain_id: u16 },

    /// Relay quote for a withdrawal, with its stable-token equivalent
    #[returns(EstimateSendFeeResponse)]
    EstimateSendFee { vars: WithdrawVars, pay_in_zro: bool },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub relay_endpoint: Addr,
    pub price_feed: Addr,
    pub margin_account: Addr,
    pub insurance_fund: Addr,
    pub remote_chain_id: u16,
    pub native_denom: String,
    pub native_decimals: u8,
    pub native_price_feed_id: String,
}

#[cw_serde]
pub struct CirculatingSupplyResponse {
    pub token_index: u32,
    pub amount: Uint128,
}

#[cw_serde]
pub struct TokenConfigResponse {
    pub token_index: u32,
    pub price_feed_id: String,
    pub decimals: u8,
}

#[cw_serde]
pub struct TrustedRemoteResponse {
    pub chain_id: u16,
    pub remote: Option<TrustedRemote>,
}

#[cw_serde]
pub struct NonceResponse {
    pub chain_id: u16,
    pub nonce: u64,
}

#[cw_serde]
pub struct EstimateSendFeeResponse {
    pub native_fee: Uint128,
    pub zro_fee: Uint128,
    pub fee_in_stable: Uint128,
}
