//! Remote Ledger - Remote-Chain Side of the Collateral Bridge
//!
//! This contract sits on a remote chain between the liquidity-swap network
//! and the message relay that reaches the settlement chain.
//!
//! # Deposit Flow
//! 1. Stablecoin arrives from the swap network and `SgReceive` is invoked
//! 2. The relay fee is converted into stable units and deducted
//! 3. The net amount is relayed to the home ledger on the settlement chain
//!
//! # Withdraw Flow
//! 1. The home ledger relays a withdrawal and `LzReceive` is invoked
//! 2. Funds are paid out locally or swapped on to their final chain
//!
//! # Failure Handling
//! Neither inbound call may fail once funds have moved. The forward runs in
//! a self-addressed sub-message; if it fails, `reply` credits the amount to
//! the recipient's pending-rescue balance, claimable with `RescueMyFunds`.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod rescue;
pub mod state;

pub use crate::error::ContractError;
