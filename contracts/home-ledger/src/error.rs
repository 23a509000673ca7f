//! Error types for the home ledger contract

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

    #[error("Untrusted remote for chain {chain_id}")]
    UntrustedRemote { chain_id: u16 },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Token index not supported: {token_index}")]
    TokenNotSupported { token_index: u32 },

    #[error("Invalid packet type: {got}")]
    InvalidPacketType { got: u16 },

    #[error("Nonce already used: chain {chain_id}, nonce {nonce}")]
    NonceAlreadyUsed { chain_id: u16, nonce: u64 },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    // ========================================================================
    // Insufficient Funds Errors
    // ========================================================================

    #[error("Insufficient native token: required {required}, available {available}")]
    InsufficientNativeToken {
        required: Uint128,
        available: Uint128,
    },

    #[error("Insufficient circulating supply for token {token_index}: requested {requested}, available {available}")]
    InsufficientCirculatingSupply {
        token_index: u32,
        requested: Uint128,
        available: Uint128,
    },

    // ========================================================================
    // Fatal Credit Errors
    // ========================================================================

    /// The native gas share cannot be paid; the delivery reverts and is
    /// left to relay redelivery.
    #[error("Gas transfer failed: required {required}, available {available}")]
    GasTransferFailed {
        required: Uint128,
        available: Uint128,
    },
}
