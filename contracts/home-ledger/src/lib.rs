//! Home Ledger - Settlement-Chain Side of the Collateral Bridge
//!
//! # Deposit Flow
//! 1. The remote ledger relays a deposit and `LzReceive` is invoked
//! 2. Circulating supply grows by the relayed amount
//! 3. The gas share is paid out in native gas, the rest is credited as
//!    margin or as an insurance-fund deposit
//!
//! # Withdraw Flow
//! 1. The user calls `Withdraw` with the relay fee attached
//! 2. Margin is debited and circulating supply shrinks
//! 3. The withdrawal is relayed to the remote ledger through the
//!    `SendRelayMessage` self-call

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
