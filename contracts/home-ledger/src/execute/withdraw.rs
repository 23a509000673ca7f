//! Withdrawals from the settlement chain.
//!
//! A withdrawal is final once sent: supply is reduced here, and any failure
//! further along is absorbed by the remote ledger's rescue balance.

use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response,
    SubMsg, Uint128, WasmMsg,
};

use common::hash::payload_hash;
use common::interfaces::margin::MarginAccountExecuteMsg;
use common::interfaces::relay::{estimate_fees, RelayExecuteMsg};
use common::interfaces::FeeQuoteResponse;
use common::{optional_address, WithdrawMessage};

use super::{load_token, native_funds};
use crate::error::ContractError;
use crate::msg::{ExecuteMsg, TransferSummary, WithdrawVars};
use crate::state::{
    circulating_supply, next_outbound_nonce, Config, CIRCULATING_SUPPLY, CONFIG, TRUSTED_REMOTES,
};

/// Relayed form of a withdrawal.
pub fn withdraw_message(config: &Config, vars: &WithdrawVars) -> WithdrawMessage {
    WithdrawMessage {
        destination_chain_id: config.remote_chain_id,
        second_hop_chain_id: vars.second_hop_chain_id,
        destination_pool_id: vars.destination_pool_id,
        to: vars.to.clone(),
        token_index: vars.token_index,
        amount: vars.amount,
        amount_min: vars.amount_min,
        refund_address: vars.refund_address.clone(),
        zro_payment_address: optional_address(vars.zro_payment_address.clone()),
        adapter_params: vars.adapter_params.clone(),
    }
}

/// Relay quote for sending `payload` to the remote ledger.
pub fn quote_withdraw(
    deps: Deps,
    config: &Config,
    contract: &Addr,
    payload: &Binary,
    pay_in_zro: bool,
    adapter_params: &Binary,
) -> Result<FeeQuoteResponse, ContractError> {
    Ok(estimate_fees(
        &deps.querier,
        &config.relay_endpoint,
        config.remote_chain_id,
        contract,
        payload,
        pay_in_zro,
        adapter_params,
    )?)
}

/// Debit margin, reduce circulating supply and relay the withdrawal.
pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    vars: WithdrawVars,
) -> Result<Response, ContractError> {
    if vars.amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    load_token(deps.as_ref(), vars.token_index)?;
    if !TRUSTED_REMOTES.has(deps.storage, config.remote_chain_id) {
        return Err(ContractError::UntrustedRemote {
            chain_id: config.remote_chain_id,
        });
    }
    let refund_address = deps.api.addr_validate(&vars.refund_address)?;

    let available = circulating_supply(deps.storage, vars.token_index)?;
    let supply = available
        .checked_sub(vars.amount)
        .map_err(|_| ContractError::InsufficientCirculatingSupply {
            token_index: vars.token_index,
            requested: vars.amount,
            available,
        })?;
    CIRCULATING_SUPPLY.save(deps.storage, vars.token_index, &supply)?;

    let payload = withdraw_message(&config, &vars).encode();
    let quote = quote_withdraw(
        deps.as_ref(),
        &config,
        &env.contract.address,
        &payload,
        false,
        &vars.adapter_params,
    )?;
    let paid = info
        .funds
        .iter()
        .find(|c| c.denom == config.native_denom)
        .map(|c| c.amount)
        .unwrap_or_default();
    if paid < quote.native_fee {
        return Err(ContractError::InsufficientNativeToken {
            required: quote.native_fee,
            available: paid,
        });
    }
    let refund = paid - quote.native_fee;

    let remove_margin = WasmMsg::Execute {
        contract_addr: config.margin_account.to_string(),
        msg: to_json_binary(&MarginAccountExecuteMsg::RemoveMarginFor {
            token_index: vars.token_index,
            amount: vars.amount,
            trader: info.sender.to_string(),
        })?,
        funds: vec![],
    };
    let send = SubMsg::new(WasmMsg::Execute {
        contract_addr: env.contract.address.to_string(),
        msg: to_json_binary(&ExecuteMsg::SendRelayMessage {
            dst_chain_id: config.remote_chain_id,
            payload,
            refund_address: refund_address.to_string(),
            zro_payment_address: optional_address(vars.zro_payment_address.clone()),
            adapter_params: vars.adapter_params.clone(),
            native_fee: quote.native_fee,
            transfer: TransferSummary {
                from: info.sender.to_string(),
                to: vars.to.clone(),
                token_index: vars.token_index,
                amount: vars.amount,
            },
        })?,
        funds: native_funds(&config.native_denom, quote.native_fee),
    });

    let mut response = Response::new().add_message(remove_margin).add_submessage(send);
    if !refund.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: refund_address.to_string(),
            amount: native_funds(&config.native_denom, refund),
        });
    }

    Ok(response
        .add_attribute("method", "withdraw")
        .add_attribute("trader", info.sender)
        .add_attribute("token_index", vars.token_index.to_string())
        .add_attribute("amount", vars.amount.to_string())
        .add_attribute("circulating_supply", supply.to_string())
        .add_attribute("native_fee", quote.native_fee.to_string()))
}

/// Send a payload to `dst_chain_id` through the relay.
///
/// Authorization: this contract only
#[allow(clippy::too_many_arguments)]
pub fn execute_send_relay_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    dst_chain_id: u16,
    payload: Binary,
    refund_address: String,
    zro_payment_address: Option<String>,
    adapter_params: Binary,
    native_fee: Uint128,
    transfer: TransferSummary,
) -> Result<Response, ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::OnlySelf);
    }

    let config = CONFIG.load(deps.storage)?;
    let remote = TRUSTED_REMOTES
        .may_load(deps.storage, dst_chain_id)?
        .ok_or(ContractError::UntrustedRemote {
            chain_id: dst_chain_id,
        })?;
    let available = deps
        .querier
        .query_balance(&env.contract.address, &config.native_denom)?
        .amount;
    if available < native_fee {
        return Err(ContractError::InsufficientNativeToken {
            required: native_fee,
            available,
        });
    }

    let nonce = next_outbound_nonce(deps.storage, dst_chain_id)?;
    let hash = payload_hash(payload.as_slice());
    let send = WasmMsg::Execute {
        contract_addr: config.relay_endpoint.to_string(),
        msg: to_json_binary(&RelayExecuteMsg::Send {
            dst_chain_id,
            destination: remote.source_address,
            payload,
            refund_address,
            zro_payment_address,
            adapter_params,
        })?,
        funds: native_funds(&config.native_denom, native_fee),
    };

    let event = Event::new("send_to_chain")
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("from", transfer.from)
        .add_attribute("to", transfer.to)
        .add_attribute("token_index", transfer.token_index.to_string())
        .add_attribute("amount", transfer.amount.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("payload_hash", hash);

    Ok(Response::new()
        .add_message(send)
        .add_event(event)
        .add_attribute("method", "send_relay_message")
        .add_attribute("nonce", nonce.to_string()))
}
