//! Error types for the remote ledger contract

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    NotOwner,

    #[error("Unauthorized: only the contract itself can call this")]
    OnlySelf,

    #[error("Unauthorized: caller is not the relay endpoint")]
    NotRelayEndpoint,

    #[error("Unauthorized: {relayer} is not a whitelisted relayer")]
    NotWhitelistedRelayer { relayer: String },

    #[error("Untrusted remote for chain {chain_id}")]
    UntrustedRemote { chain_id: u16 },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Token mismatch: expected {expected}, got {got}")]
    TokenMismatch { expected: String, got: String },

    #[error("Pool mismatch: expected {expected}, got {got}")]
    PoolMismatch { expected: u64, got: u64 },

    #[error("Invalid recipient: neither {to} nor its refund address is valid here")]
    InvalidRecipient { to: String },

    #[error("Token index not supported: {token_index}")]
    TokenNotSupported { token_index: u32 },

    #[error("Invalid packet type: {got}")]
    InvalidPacketType { got: u16 },

    #[error("Nonce already used: chain {chain_id}, nonce {nonce}")]
    NonceAlreadyUsed { chain_id: u16, nonce: u64 },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Stargate router not configured")]
    StargateNotConfigured,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    #[error("No forward in progress")]
    NoPendingForward,

    // ========================================================================
    // Insufficient Funds Errors
    // ========================================================================

    #[error("Insufficient native token: required {required}, available {available}")]
    InsufficientNativeToken {
        required: Uint128,
        available: Uint128,
    },

    #[error("Insufficient pending funds: requested {requested}, available {available}")]
    InsufficientPendingFunds {
        requested: Uint128,
        available: Uint128,
    },

    #[error("Amount {amount} does not cover fees of {required}")]
    AmountBelowFees { amount: Uint128, required: Uint128 },
}
