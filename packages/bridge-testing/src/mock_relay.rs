//! Mock message-relay endpoint.
//!
//! One endpoint instance serves every simulated chain. Each ledger is
//! registered with the chain it lives on and the native denom it pays fees
//! in. Sent packets are queued and delivered one at a time with
//! `DeliverNext`; a failed delivery reverts and the packet stays at the head
//! of the queue, which is how redelivery is modelled.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult, Uint128, WasmMsg,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::{Item, Map};

use common::interfaces::relay::RelayReceiverMsg;
use common::interfaces::FeeQuoteResponse;

#[cw_serde]
pub struct InstantiateMsg {
    pub base_fee: Uint128,
    pub fee_per_byte: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    RegisterApplication {
        application: String,
        chain_id: u16,
        fee_denom: String,
    },
    Send {
        dst_chain_id: u16,
        destination: Binary,
        payload: Binary,
        refund_address: String,
        zro_payment_address: Option<String>,
        adapter_params: Binary,
    },
    DeliverNext {},
    SetHalted { halted: bool },
    SetFees {
        base_fee: Uint128,
        fee_per_byte: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(FeeQuoteResponse)]
    EstimateFees {
        dst_chain_id: u16,
        user_application: String,
        payload: Binary,
        pay_in_zro: bool,
        adapter_params: Binary,
    },
    #[returns(Vec<Packet>)]
    Pending {},
}

#[cw_serde]
pub struct Fees {
    pub base_fee: Uint128,
    pub fee_per_byte: Uint128,
}

#[cw_serde]
pub struct Application {
    pub chain_id: u16,
    pub fee_denom: String,
}

#[cw_serde]
pub struct Packet {
    pub src_chain_id: u16,
    pub src_address: Binary,
    pub dst_chain_id: u16,
    pub destination: String,
    pub nonce: u64,
    pub payload: Binary,
}

const FEES: Item<Fees> = Item::new("fees");
const HALTED: Item<bool> = Item::new("halted");
const APPLICATIONS: Map<&Addr, Application> = Map::new("applications");
const PATH_NONCE: Map<(u16, u16), u64> = Map::new("path_nonce");
const QUEUE: Map<u64, Packet> = Map::new("queue");
const HEAD: Item<u64> = Item::new("head");
const TAIL: Item<u64> = Item::new("tail");

fn fee_for(fees: &Fees, payload: &Binary) -> StdResult<Uint128> {
    let bytes = Uint128::from(payload.len() as u128);
    Ok(fees.base_fee + fees.fee_per_byte.checked_mul(bytes)?)
}

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    FEES.save(
        deps.storage,
        &Fees {
            base_fee: msg.base_fee,
            fee_per_byte: msg.fee_per_byte,
        },
    )?;
    HALTED.save(deps.storage, &false)?;
    HEAD.save(deps.storage, &0)?;
    TAIL.save(deps.storage, &0)?;
    Ok(Response::new())
}

pub fn execute(deps: DepsMut, _env: Env, info: MessageInfo, msg: ExecuteMsg) -> StdResult<Response> {
    match msg {
        ExecuteMsg::RegisterApplication {
            application,
            chain_id,
            fee_denom,
        } => {
            let application = deps.api.addr_validate(&application)?;
            APPLICATIONS.save(
                deps.storage,
                &application,
                &Application {
                    chain_id,
                    fee_denom,
                },
            )?;
            Ok(Response::new().add_attribute("method", "register_application"))
        }
        ExecuteMsg::Send {
            dst_chain_id,
            destination,
            payload,
            ..
        } => {
            if HALTED.load(deps.storage)? {
                return Err(StdError::generic_err("relay halted"));
            }
            let app = APPLICATIONS
                .may_load(deps.storage, &info.sender)?
                .ok_or_else(|| StdError::generic_err("unregistered application"))?;

            let fee = fee_for(&FEES.load(deps.storage)?, &payload)?;
            let paid = info
                .funds
                .iter()
                .find(|c| c.denom == app.fee_denom)
                .map(|c| c.amount)
                .unwrap_or_default();
            if paid < fee {
                return Err(StdError::generic_err(format!(
                    "relay fee not paid: required {}, got {}",
                    fee, paid
                )));
            }

            let path = (app.chain_id, dst_chain_id);
            let nonce = PATH_NONCE.may_load(deps.storage, path)?.unwrap_or_default() + 1;
            PATH_NONCE.save(deps.storage, path, &nonce)?;

            let tail = TAIL.load(deps.storage)?;
            QUEUE.save(
                deps.storage,
                tail,
                &Packet {
                    src_chain_id: app.chain_id,
                    src_address: Binary::from(info.sender.as_bytes()),
                    dst_chain_id,
                    destination: String::from_utf8(destination.to_vec())
                        .map_err(|e| StdError::generic_err(e.to_string()))?,
                    nonce,
                    payload,
                },
            )?;
            TAIL.save(deps.storage, &(tail + 1))?;

            Ok(Response::new()
                .add_attribute("method", "send")
                .add_attribute("nonce", nonce.to_string()))
        }
        ExecuteMsg::DeliverNext {} => {
            let head = HEAD.load(deps.storage)?;
            let packet = QUEUE
                .may_load(deps.storage, head)?
                .ok_or_else(|| StdError::generic_err("no packet queued"))?;
            QUEUE.remove(deps.storage, head);
            HEAD.save(deps.storage, &(head + 1))?;

            let deliver = WasmMsg::Execute {
                contract_addr: packet.destination,
                msg: to_json_binary(&RelayReceiverMsg::LzReceive {
                    src_chain_id: packet.src_chain_id,
                    src_address: packet.src_address,
                    nonce: packet.nonce,
                    payload: packet.payload,
                })?,
                funds: vec![],
            };
            Ok(Response::new()
                .add_message(deliver)
                .add_attribute("method", "deliver_next"))
        }
        ExecuteMsg::SetHalted { halted } => {
            HALTED.save(deps.storage, &halted)?;
            Ok(Response::new())
        }
        ExecuteMsg::SetFees {
            base_fee,
            fee_per_byte,
        } => {
            FEES.save(
                deps.storage,
                &Fees {
                    base_fee,
                    fee_per_byte,
                },
            )?;
            Ok(Response::new())
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::EstimateFees { payload, .. } => {
            let native_fee = fee_for(&FEES.load(deps.storage)?, &payload)?;
            to_json_binary(&FeeQuoteResponse {
                native_fee,
                zro_fee: Uint128::zero(),
            })
        }
        QueryMsg::Pending {} => {
            let head = HEAD.load(deps.storage)?;
            let tail = TAIL.load(deps.storage)?;
            let packets = (head..tail)
                .map(|i| QUEUE.load(deps.storage, i))
                .collect::<StdResult<Vec<_>>>()?;
            to_json_binary(&packets)
        }
    }
}

pub fn contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}
