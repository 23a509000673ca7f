//! Bridge Testing - Mock Collaborators for the Collateral Bridge Ledgers
//!
//! cw-multi-test stand-ins for the contracts the ledgers only know by
//! interface:
//! - `mock_relay` - message-relay endpoint with a manual delivery queue
//! - `mock_swap` - liquidity-swap router
//! - `mock_price_feed` - USD price feed
//! - `mock_margin` - margin account / insurance fund
//!
//! Both ledgers run in one `App`; the simulated chains are told apart by
//! the chain id each ledger is registered with on the relay and by their
//! native denoms.

pub mod mock_margin;
pub mod mock_price_feed;
pub mod mock_relay;
pub mod mock_swap;

use cosmwasm_std::Empty;
use cw_multi_test::{Contract, ContractWrapper};

/// Chain id of the remote chain
pub const REMOTE_CHAIN_ID: u16 = 110;
/// Chain id of the settlement chain
pub const HOME_CHAIN_ID: u16 = 220;
/// Chain id of an origin / final chain reached only through the swap network
pub const ORIGIN_CHAIN_ID: u16 = 101;

/// Native gas of the remote chain (18 decimals)
pub const REMOTE_DENOM: &str = "aeth";
/// Native gas of the settlement chain (18 decimals)
pub const HOME_DENOM: &str = "ahub";

pub const NATIVE_PRICE_ID: &str = "ETH";
pub const STABLE_PRICE_ID: &str = "USDC";

/// $2000.00 at 6 decimals
pub const ETH_PRICE: u128 = 2_000_000_000;
/// $1.00 at 6 decimals
pub const USDC_PRICE: u128 = 1_000_000;

pub fn cw20_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}
