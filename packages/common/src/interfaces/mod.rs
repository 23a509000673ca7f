//! Message interfaces of the external collaborators.
//!
//! The ledgers only know these contracts through the messages below; the
//! implementations live outside this workspace.

pub mod margin;
pub mod oracle;
pub mod relay;
pub mod swap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

/// Native (and optional ZRO) fee quoted by the relay or swap network
#[cw_serde]
pub struct FeeQuoteResponse {
    pub native_fee: Uint128,
    pub zro_fee: Uint128,
}
