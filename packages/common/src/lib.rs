//! Common - Shared Types and Utilities for the Collateral Bridge Ledgers
//!
//! This package provides the pieces both ledgers must agree on byte-for-byte:
//! - `codec` - word-aligned payload writer/reader
//! - `payload` - deposit, withdraw and relayed-deposit messages
//! - `fee` - native relay fee to stable-token conversion
//! - `hash` - payload hashing for cross-chain correlation
//! - `interfaces` - messages of the external collaborators (relay, swap,
//!   price feed, margin account)

pub mod codec;
pub mod fee;
pub mod hash;
pub mod interfaces;
pub mod payload;
pub mod remote;

pub use fee::{convert_native_fee, query_fee_in_stable, PriceQuote};
pub use payload::{
    optional_address, DepositMessage, DepositMetadata, RelayedDeposit, WithdrawMessage,
    PT_DEPOSIT, PT_WITHDRAW,
};
pub use remote::TrustedRemote;
