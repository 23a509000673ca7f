//! Mock margin book, used both as the margin account and as the insurance
//! fund. Only balances are tracked; no collateral moves.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult, Uint128,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::Map;

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    AddMarginFor {
        token_index: u32,
        amount: Uint128,
        trader: String,
    },
    RemoveMarginFor {
        token_index: u32,
        amount: Uint128,
        trader: String,
    },
    DepositFor {
        staker: String,
        amount: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Uint128)]
    Margin { trader: String, token_index: u32 },
    #[returns(Uint128)]
    Stake { staker: String },
}

const MARGIN: Map<(&str, u32), Uint128> = Map::new("margin");
const STAKE: Map<&str, Uint128> = Map::new("stake");

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
        ExecuteMsg::AddMarginFor {
            token_index,
            amount,
            trader,
        } => {
            let key = (trader.as_str(), token_index);
            let balance = MARGIN.may_load(deps.storage, key)?.unwrap_or_default() + amount;
            MARGIN.save(deps.storage, key, &balance)?;
            Ok(Response::new().add_attribute("method", "add_margin_for"))
        }
        ExecuteMsg::RemoveMarginFor {
            token_index,
            amount,
            trader,
        } => {
            let key = (trader.as_str(), token_index);
            let balance = MARGIN.may_load(deps.storage, key)?.unwrap_or_default();
            if balance < amount {
                return Err(StdError::generic_err(format!(
                    "insufficient margin: {} < {}",
                    balance, amount
                )));
            }
            MARGIN.save(deps.storage, key, &(balance - amount))?;
            Ok(Response::new().add_attribute("method", "remove_margin_for"))
        }
        ExecuteMsg::DepositFor { staker, amount } => {
            let stake = STAKE.may_load(deps.storage, &staker)?.unwrap_or_default() + amount;
            STAKE.save(deps.storage, &staker, &stake)?;
            Ok(Response::new().add_attribute("method", "deposit_for"))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Margin {
            trader,
            token_index,
        } => to_json_binary(
            &MARGIN
                .may_load(deps.storage, (trader.as_str(), token_index))?
                .unwrap_or_default(),
        ),
        QueryMsg::Stake { staker } => to_json_binary(
            &STAKE
                .may_load(deps.storage, &staker)?
                .unwrap_or_default(),
        ),
    }
}

pub fn contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}
