//! Direct deposits from holders already on this chain.
//!
//! Unlike a swap delivery, a direct deposit has a caller who can retry, so
//! any failure reverts the whole call and no rescue credit is ever made.

use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Deps, DepsMut, Env, Event, MessageInfo, Response, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::hash::payload_hash;
use common::interfaces::relay::{estimate_fees, RelayExecuteMsg};
use common::interfaces::FeeQuoteResponse;
use common::{optional_address, DepositMetadata, RelayedDeposit};

use super::forward::native_funds;
use super::{load_token, paid_amount};
use crate::error::ContractError;
use crate::msg::DepositVars;
use crate::state::{next_outbound_nonce, Config, CONFIG, TRUSTED_REMOTES};

/// Relayed form of a direct deposit. No stable fee is taken on this path.
pub(crate) fn relayed_deposit(vars: &DepositVars) -> RelayedDeposit {
    RelayedDeposit {
        to: vars.to.clone(),
        token_index: vars.token_index,
        amount: vars.amount,
        metadata: DepositMetadata {
            to_gas_amount: vars.to_gas_amount,
            is_insurance_fund_deposit: vars.is_insurance_fund_deposit,
        },
    }
}

/// Relay quote for forwarding `vars` to the home ledger.
pub fn quote_deposit(
    deps: Deps,
    config: &Config,
    contract: &Addr,
    vars: &DepositVars,
    pay_in_zro: bool,
) -> Result<FeeQuoteResponse, ContractError> {
    Ok(estimate_fees(
        &deps.querier,
        &config.relay_endpoint,
        config.home_chain_id,
        contract,
        &relayed_deposit(vars).encode(),
        pay_in_zro,
        &vars.adapter_params,
    )?)
}

/// Pull `vars.amount` from the caller and relay it to the home ledger.
///
/// The relay fee is paid from the attached native coin; any excess is
/// returned to `vars.refund_address`.
pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    vars: DepositVars,
) -> Result<Response, ContractError> {
    if vars.amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }
    if vars.to_gas_amount > vars.amount {
        return Err(ContractError::InvalidAmount {
            reason: "Gas amount exceeds deposit amount".to_string(),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let token_config = load_token(deps.as_ref(), vars.token_index)?;
    let remote = TRUSTED_REMOTES
        .may_load(deps.storage, config.home_chain_id)?
        .ok_or(ContractError::UntrustedRemote {
            chain_id: config.home_chain_id,
        })?;
    deps.api.addr_validate(&vars.to)?;
    let refund_address = deps.api.addr_validate(&vars.refund_address)?;

    let quote = quote_deposit(
        deps.as_ref(),
        &config,
        &env.contract.address,
        &vars,
        false,
    )?;
    let paid = paid_amount(&info, &config.native_denom);
    if paid < quote.native_fee {
        return Err(ContractError::InsufficientNativeToken {
            required: quote.native_fee,
            available: paid,
        });
    }
    let refund = paid - quote.native_fee;

    let nonce = next_outbound_nonce(deps.storage, config.home_chain_id)?;
    let payload = relayed_deposit(&vars).encode();

    let pull = WasmMsg::Execute {
        contract_addr: token_config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: env.contract.address.to_string(),
            amount: vars.amount,
        })?,
        funds: vec![],
    };
    let send = WasmMsg::Execute {
        contract_addr: config.relay_endpoint.to_string(),
        msg: to_json_binary(&RelayExecuteMsg::Send {
            dst_chain_id: config.home_chain_id,
            destination: remote.source_address,
            payload: payload.clone(),
            refund_address: refund_address.to_string(),
            zro_payment_address: optional_address(vars.zro_payment_address.clone()),
            adapter_params: vars.adapter_params.clone(),
        })?,
        funds: native_funds(&config.native_denom, quote.native_fee),
    };

    let mut response = Response::new().add_message(pull).add_message(send);
    if !refund.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: refund_address.to_string(),
            amount: native_funds(&config.native_denom, refund),
        });
    }

    let event = Event::new("send_to_chain")
        .add_attribute("dst_chain_id", config.home_chain_id.to_string())
        .add_attribute("from", info.sender.to_string())
        .add_attribute("to", vars.to.clone())
        .add_attribute("token_index", vars.token_index.to_string())
        .add_attribute("amount", vars.amount.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("payload_hash", payload_hash(payload.as_slice()));

    Ok(response
        .add_event(event)
        .add_attribute("method", "deposit")
        .add_attribute("native_fee", quote.native_fee.to_string())
        .add_attribute("refund", refund.to_string()))
}
