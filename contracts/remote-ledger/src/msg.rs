//! Message types for the remote ledger contract

use common::{DepositMessage, TrustedRemote, WithdrawMessage};
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
    pub stargate_router: Option<String>,
    pub price_feed: String,
    /// Relay chain id of the settlement chain
    pub home_chain_id: u16,
    pub native_denom: String,
    pub native_decimals: u8,
    pub native_price_feed_id: String,
}

/// Parameters of a direct deposit (funds already on this chain)
#[cw_serde]
pub struct DepositVars {
    pub to: String,
    pub token_index: u32,
    pub amount: Uint128,
    pub to_gas_amount: Uint128,
    pub is_insurance_fund_deposit: bool,
    /// Receives any native fee attached beyond the relay quote
    pub refund_address: String,
    pub zro_payment_address: Option<String>,
    pub adapter_params: Binary,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Network Callbacks
    // ========================================================================
    /// Liquidity-swap delivery. The tokens have already been transferred to
    /// this contract. Never fails once the payload is accepted.
    ///
    /// Authorization: whitelisted relayer
    SgReceive {
        src_chain_id: u16,
        src_address: Binary,
        /// Pool the tokens left on the source chain
        src_pool_id: u64,
        nonce: u64,
        token: String,
        amount_ld: Uint128,
        payload: Binary,
    },

    /// Message-relay delivery of a withdrawal from the home ledger.
    ///
    /// Authorization: relay endpoint, from the trusted remote
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },

    // ========================================================================
    // User Operations
    // ========================================================================
    /// Deposit stable tokens held on this chain. The caller must have granted
    /// a CW20 allowance for `amount` and attaches the relay fee in native
    /// gas. Fails outright if the forward fails.
    Deposit(DepositVars),

    /// Claim up to the caller's pending rescue balance of `token`
    RescueMyFunds { token: String, amount: Uint128 },

    // ========================================================================
    // Self-Calls (rollback boundaries)
    // ========================================================================
    /// Relay a swap-delivered deposit to the home ledger.
    ///
    /// Authorization: this contract only
    ForwardDeposit {
        message: DepositMessage,
        amount: Uint128,
    },

    /// Pay out or swap on a relayed withdrawal.
    ///
    /// Authorization: this contract only
    ForwardWithdraw { message: WithdrawMessage },

    // ========================================================================
    // Administration
    // ========================================================================
    SetWhitelistRelayer { relayer: String, enabled: bool },

    SetStargateConfig { router: String },

    SetTrustedRemote {
        chain_id: u16,
        remote: TrustedRemote,
    },

    /// Create or reconfigure a supported token. `collected_fee` is kept.
    SetSupportedToken {
        token_index: u32,
        token: String,
        price_feed_id: String,
        src_pool_id: u64,
        decimals: u8,
    },

    UpdateConfig {
        relay_endpoint: Option<String>,
        price_feed: Option<String>,
        home_chain_id: Option<u16>,
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

    #[returns(TokenConfigResponse)]
    SupportedToken { token_index: u32 },

    /// Rescue balance of one recipient
    #[returns(PendingFundsResponse)]
    PendingFunds { token: String, recipient: String },

    /// Sum of all rescue balances in `token`
    #[returns(PendingFundsResponse)]
    PendingTotal { token: String },

    #[returns(TrustedRemoteResponse)]
    TrustedRemote { chain_id: u16 },

    #[returns(bool)]
    IsWhitelistedRelayer { relayer: String },

    #[returns(NonceResponse)]
    OutboundNonce { chain_id: u16 },

    #[returns(NonceResponse)]
    InboundNonce { chain_id: u16 },

    /// Relay quote for a direct deposit
    #[returns(common::interfaces::FeeQuoteResponse)]
    EstimateSendFee { vars: DepositVars, pay_in_zro: bool },

    /// Stable-token equivalent of a native fee for `token_index`
    #[returns(ConvertFeeResponse)]
    ConvertFee {
        token_index: u32,
        native_fee: Uint128,
    },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub relay_endpoint: Addr,
    pub stargate_router: Option<Addr>,
    pub price_feed: Addr,
    pub home_chain_id: u16,
    pub native_denom: String,
    pub native_decimals: u8,
    pub native_price_feed_id: String,
}

#[cw_serde]
pub struct TokenConfigResponse {
    pub token_index: u32,
    pub token: Addr,
    pub price_feed_id: String,
    pub collected_fee: Uint128,
    pub src_pool_id: u64,
    pub decimals: u8,
}

#[cw_serde]
pub struct PendingFundsResponse {
    pub token: Addr,
    pub amount: Uint128,
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
pub struct ConvertFeeResponse {
    pub native_fee: Uint128,
    pub fee_in_stable: Uint128,
}
