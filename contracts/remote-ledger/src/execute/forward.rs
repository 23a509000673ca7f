//! Self-call forwards.
//!
//! These run only as sub-messages of the inbound handlers. Any error here
//! reverts the forward's own writes and messages and is then turned into a
//! rescue credit by `reply`.

use cosmwasm_std::{
    coins, to_json_binary, Binary, Coin, DepsMut, Env, Event, MessageInfo, Response, StdError,
    Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::hash::payload_hash;
use common::interfaces::relay::{estimate_fees, RelayExecuteMsg};
use common::interfaces::swap::{quote_swap_fee, SwapExecuteMsg};
use common::{query_fee_in_stable, DepositMessage, RelayedDeposit, WithdrawMessage};

use super::{ensure_native_balance, ensure_self, load_token};
use crate::error::ContractError;
use crate::state::{next_outbound_nonce, CONFIG, SUPPORTED_TOKENS, TRUSTED_REMOTES};

/// Native coins to attach for a fee; empty when the fee is zero.
pub(crate) fn native_funds(denom: &str, amount: Uint128) -> Vec<Coin> {
    if amount.is_zero() {
        vec![]
    } else {
        coins(amount.u128(), denom)
    }
}

// ============================================================================
// ForwardDeposit
// ============================================================================

/// Relay a swap-delivered deposit to the home ledger, net of the relay fee.
///
/// The relay's native fee is paid from this contract's own balance and
/// recovered in stable units into `collected_fee`.
pub fn execute_forward_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message: DepositMessage,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_self(&env, &info)?;
    // The home ledger would refuse this recipient on every redelivery
    deps.api.addr_validate(&message.to)?;

    let config = CONFIG.load(deps.storage)?;
    let mut token_config = load_token(deps.as_ref(), message.token_index)?;
    let remote = TRUSTED_REMOTES
        .may_load(deps.storage, config.home_chain_id)?
        .ok_or(ContractError::UntrustedRemote {
            chain_id: config.home_chain_id,
        })?;

    // The quote depends on payload size only, so the gross amount is fine
    let mut relayed = RelayedDeposit {
        to: message.to.clone(),
        token_index: message.token_index,
        amount,
        metadata: message.metadata(),
    };
    let quote = estimate_fees(
        &deps.querier,
        &config.relay_endpoint,
        config.home_chain_id,
        &env.contract.address,
        &relayed.encode(),
        false,
        &message.adapter_params,
    )?;
    let relay_fee = query_fee_in_stable(
        &deps.querier,
        &config.price_feed,
        &config.native_price_feed_id,
        &token_config.price_feed_id,
        config.native_decimals,
        token_config.decimals,
        quote.native_fee,
    )?;

    let required = relay_fee
        .checked_add(message.to_gas_amount)
        .map_err(StdError::from)?;
    if amount < required {
        return Err(ContractError::AmountBelowFees { amount, required });
    }
    ensure_native_balance(
        deps.as_ref(),
        &env.contract.address,
        &config.native_denom,
        quote.native_fee,
    )?;

    relayed.amount = amount - relay_fee;
    token_config.collected_fee = token_config
        .collected_fee
        .checked_add(relay_fee)
        .map_err(StdError::from)?;
    SUPPORTED_TOKENS.save(deps.storage, message.token_index, &token_config)?;

    let nonce = next_outbound_nonce(deps.storage, config.home_chain_id)?;
    let payload = relayed.encode();
    let send = WasmMsg::Execute {
        contract_addr: config.relay_endpoint.to_string(),
        msg: to_json_binary(&RelayExecuteMsg::Send {
            dst_chain_id: config.home_chain_id,
            destination: remote.source_address,
            payload: payload.clone(),
            refund_address: env.contract.address.to_string(),
            zro_payment_address: message.zro_payment_address.clone(),
            adapter_params: message.adapter_params.clone(),
        })?,
        funds: native_funds(&config.native_denom, quote.native_fee),
    };

    let event = Event::new("send_to_chain")
        .add_attribute("dst_chain_id", config.home_chain_id.to_string())
        .add_attribute("from", message.from)
        .add_attribute("to", message.to)
        .add_attribute("token_index", message.token_index.to_string())
        .add_attribute("amount", relayed.amount.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("payload_hash", payload_hash(payload.as_slice()));

    Ok(Response::new()
        .add_message(send)
        .add_event(event)
        .add_attribute("method", "forward_deposit")
        .add_attribute("relay_fee", relay_fee.to_string())
        .add_attribute("native_fee", quote.native_fee.to_string()))
}

// ============================================================================
// ForwardWithdraw
// ============================================================================

/// Deliver a relayed withdrawal on this chain, or swap it to its final chain.
///
/// The swap fee is deducted in stable units before the swap; the router
/// enforces `amount_min` against what would arrive.
pub fn execute_forward_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message: WithdrawMessage,
) -> Result<Response, ContractError> {
    ensure_self(&env, &info)?;

    let config = CONFIG.load(deps.storage)?;
    let mut token_config = load_token(deps.as_ref(), message.token_index)?;

    if message.second_hop_chain_id == 0 {
        let recipient = deps.api.addr_validate(&message.to)?;
        let transfer = WasmMsg::Execute {
            contract_addr: token_config.token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: recipient.to_string(),
                amount: message.amount,
            })?,
            funds: vec![],
        };
        return Ok(Response::new()
            .add_message(transfer)
            .add_attribute("method", "forward_withdraw")
            .add_attribute("to", recipient)
            .add_attribute("amount", message.amount.to_string()));
    }

    let router = config
        .stargate_router
        .clone()
        .ok_or(ContractError::StargateNotConfigured)?;
    let dst_chain_id = message.second_hop_chain_id;

    let quote = quote_swap_fee(&deps.querier, &router, dst_chain_id, &message.to)?;
    let swap_fee = query_fee_in_stable(
        &deps.querier,
        &config.price_feed,
        &config.native_price_feed_id,
        &token_config.price_feed_id,
        config.native_decimals,
        token_config.decimals,
        quote.native_fee,
    )?;
    if message.amount <= swap_fee {
        return Err(ContractError::AmountBelowFees {
            amount: message.amount,
            required: swap_fee,
        });
    }
    ensure_native_balance(
        deps.as_ref(),
        &env.contract.address,
        &config.native_denom,
        quote.native_fee,
    )?;

    token_config.collected_fee = token_config
        .collected_fee
        .checked_add(swap_fee)
        .map_err(StdError::from)?;
    SUPPORTED_TOKENS.save(deps.storage, message.token_index, &token_config)?;

    let amount_ld = message.amount - swap_fee;
    let nonce = next_outbound_nonce(deps.storage, dst_chain_id)?;

    let allowance = WasmMsg::Execute {
        contract_addr: token_config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::IncreaseAllowance {
            spender: router.to_string(),
            amount: amount_ld,
            expires: None,
        })?,
        funds: vec![],
    };
    let swap = WasmMsg::Execute {
        contract_addr: router.to_string(),
        msg: to_json_binary(&SwapExecuteMsg::Swap {
            dst_chain_id,
            src_pool_id: token_config.src_pool_id,
            dst_pool_id: message.destination_pool_id,
            refund_address: env.contract.address.to_string(),
            amount_ld,
            min_amount_ld: message.amount_min,
            to: message.to.clone(),
            payload: Binary::default(),
        })?,
        funds: native_funds(&config.native_denom, quote.native_fee),
    };

    Ok(Response::new()
        .add_message(allowance)
        .add_message(swap)
        .add_attribute("method", "forward_withdraw")
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("to", message.to)
        .add_attribute("amount", amount_ld.to_string())
        .add_attribute("swap_fee", swap_fee.to_string())
        .add_attribute("nonce", nonce.to_string()))
}
