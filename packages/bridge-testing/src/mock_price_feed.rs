//! Mock USD price feed. Prices are set directly by the test.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult, Uint128,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::Map;

use common::interfaces::oracle::{PriceFeedQueryMsg, PriceResponse};

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    SetPrice { asset_id: String, price: Uint128 },
}

const PRICES: Map<&str, Uint128> = Map::new("prices");

pub fn instantiate(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> StdResult<Response> {
    Ok(Response::new())
}

pub fn execute(deps: DepsMut, _env: Env, _info: MessageInfo, msg: ExecuteMsg) -> StdResult<Response> {
    match msg {
        ExecuteMsg::SetPrice { asset_id, price } => {
            PRICES.save(deps.storage, &asset_id, &price)?;
            Ok(Response::new())
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: PriceFeedQueryMsg) -> StdResult<Binary> {
    match msg {
        PriceFeedQueryMsg::Price { asset_id } => {
            let price = PRICES
                .may_load(deps.storage, &asset_id)?
                .ok_or_else(|| StdError::not_found(format!("price for {}", asset_id)))?;
            to_json_binary(&PriceResponse { price })
        }
    }
}

pub fn contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}
