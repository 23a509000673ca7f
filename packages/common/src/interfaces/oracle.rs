//! Price-feed interface.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper, StdResult, Uint128};

#[cw_serde]
#[derive(QueryResponses)]
pub enum PriceFeedQueryMsg {
    /// USD price of an asset; every asset is quoted at the same scale
    #[returns(PriceResponse)]
    Price { asset_id: String },
}

#[cw_serde]
pub struct PriceResponse {
    pub price: Uint128,
}

pub fn query_price(querier: &QuerierWrapper, feed: &Addr, asset_id: &str) -> StdResult<Uint128> {
    let res: PriceResponse = querier.query_wasm_smart(
        feed,
        &PriceFeedQueryMsg::Price {
            asset_id: asset_id.to_string(),
        },
    )?;
    Ok(res.price)
}
