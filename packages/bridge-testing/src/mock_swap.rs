//! Mock liquidity-swap router.
//!
//! Outbound swaps pull the tokens with `TransferFrom`, charge `fee_bps` and
//! fail when less than `min_amount_ld` would arrive. They are only recorded;
//! nothing is delivered on the far chain. Inbound deliveries are triggered
//! explicitly with `Deliver`, which pays the receiver from the router's own
//! token balance and then calls its `SgReceive`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::{Item, Map};

use common::interfaces::swap::SwapReceiverMsg;
use common::interfaces::FeeQuoteResponse;

#[cw_serde]
pub struct InstantiateMsg {
    pub native_fee: Uint128,
    pub fee_denom: String,
    pub fee_bps: u16,
}

#[cw_serde]
pub enum ExecuteMsg {
    SetPool {
        pool_id: u64,
        token: String,
    },
    SetNativeFee {
        native_fee: Uint128,
    },
    Swap {
        dst_chain_id: u16,
        src_pool_id: u64,
        dst_pool_id: u64,
        refund_address: String,
        amount_ld: Uint128,
        min_amount_ld: Uint128,
        to: String,
        payload: Binary,
    },
    /// Simulate an arrival from `src_chain_id`
    Deliver {
        receiver: String,
        src_chain_id: u16,
        src_address: Binary,
        src_pool_id: u64,
        token: String,
        amount: Uint128,
        payload: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(FeeQuoteResponse)]
    QuoteSwapFee {
        dst_chain_id: u16,
        to: String,
        payload: Binary,
    },
    #[returns(Vec<SwapRecord>)]
    Swaps {},
}

#[cw_serde]
pub struct RouterConfig {
    pub native_fee: Uint128,
    pub fee_denom: String,
    pub fee_bps: u16,
}

#[cw_serde]
pub struct SwapRecord {
    pub dst_chain_id: u16,
    pub dst_pool_id: u64,
    pub to: String,
    pub amount_ld: Uint128,
    pub received: Uint128,
}

const CONFIG: Item<RouterConfig> = Item::new("config");
const POOLS: Map<u64, String> = Map::new("pools");
const SWAPS: Item<Vec<SwapRecord>> = Item::new("swaps");
const DELIVERY_NONCE: Item<u64> = Item::new("delivery_nonce");

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    CONFIG.save(
        deps.storage,
        &RouterConfig {
            native_fee: msg.native_fee,
            fee_denom: msg.fee_denom,
            fee_bps: msg.fee_bps,
        },
    )?;
    SWAPS.save(deps.storage, &vec![])?;
    DELIVERY_NONCE.save(deps.storage, &0)?;
    Ok(Response::new())
}

pub fn execute(deps: DepsMut, env: Env, info: MessageInfo, msg: ExecuteMsg) -> StdResult<Response> {
    match msg {
        ExecuteMsg::SetPool { pool_id, token } => {
            POOLS.save(deps.storage, pool_id, &token)?;
            Ok(Response::new())
        }
        ExecuteMsg::SetNativeFee { native_fee } => {
            CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
                config.native_fee = native_fee;
                Ok(config)
            })?;
            Ok(Response::new())
        }
        ExecuteMsg::Swap {
            dst_chain_id,
            src_pool_id,
            dst_pool_id,
            amount_ld,
            min_amount_ld,
            to,
            ..
        } => {
            let config = CONFIG.load(deps.storage)?;
            let paid = info
                .funds
                .iter()
                .find(|c| c.denom == config.fee_denom)
                .map(|c| c.amount)
                .unwrap_or_default();
            if paid < config.native_fee {
                return Err(StdError::generic_err("swap fee not paid"));
            }

            let token = POOLS
                .may_load(deps.storage, src_pool_id)?
                .ok_or_else(|| StdError::generic_err("unknown pool"))?;
            let received =
                amount_ld - amount_ld.multiply_ratio(config.fee_bps as u128, 10_000u128);
            if received < min_amount_ld {
                return Err(StdError::generic_err(format!(
                    "slippage too high: {} < {}",
                    received, min_amount_ld
                )));
            }

            SWAPS.update(deps.storage, |mut swaps| -> StdResult<_> {
                swaps.push(SwapRecord {
                    dst_chain_id,
                    dst_pool_id,
                    to,
                    amount_ld,
                    received,
                });
                Ok(swaps)
            })?;

            let pull = WasmMsg::Execute {
                contract_addr: token,
                msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                    owner: info.sender.to_string(),
                    recipient: env.contract.address.to_string(),
                    amount: amount_ld,
                })?,
                funds: vec![],
            };
            Ok(Response::new()
                .add_message(pull)
                .add_attribute("method", "swap"))
        }
        ExecuteMsg::Deliver {
            receiver,
            src_chain_id,
            src_address,
            src_pool_id,
            token,
            amount,
            payload,
        } => {
            let nonce = DELIVERY_NONCE.load(deps.storage)? + 1;
            DELIVERY_NONCE.save(deps.storage, &nonce)?;

            let transfer = WasmMsg::Execute {
                contract_addr: token.clone(),
                msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                    recipient: receiver.clone(),
                    amount,
                })?,
                funds: vec![],
            };
            let callback = WasmMsg::Execute {
                contract_addr: receiver,
                msg: to_json_binary(&SwapReceiverMsg::SgReceive {
                    src_chain_id,
                    src_address,
                    src_pool_id,
                    nonce,
                    token,
                    amount_ld: amount,
                    payload,
                })?,
                funds: vec![],
            };
            Ok(Response::new()
                .add_message(transfer)
                .add_message(callback)
                .add_attribute("method", "deliver")
                .add_attribute("nonce", nonce.to_string()))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::QuoteSwapFee { .. } => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&FeeQuoteResponse {
                native_fee: config.native_fee,
                zro_fee: Uint128::zero(),
            })
        }
        QueryMsg::Swaps {} => to_json_binary(&SWAPS.load(deps.storage)?),
    }
}

pub fn contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}
