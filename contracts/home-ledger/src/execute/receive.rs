//! Relayed deposits from the remote ledger.
//!
//! There is no further hop to absorb a failure here: if the gas share cannot
//! be paid the whole delivery reverts and stays with the relay network.

use cosmwasm_std::{
    to_json_binary, BankMsg, Binary, DepsMut, Env, Event, MessageInfo, Response, StdError,
    WasmMsg,
};

use common::hash::payload_hash;
use common::interfaces::margin::{InsuranceFundExecuteMsg, MarginAccountExecuteMsg};
use common::payload::packet_type;
use common::{RelayedDeposit, PT_DEPOSIT};

use super::{load_token, native_funds};
use crate::error::ContractError;
use crate::state::{
    circulating_supply, to_native_amount, CIRCULATING_SUPPLY, CONFIG, INBOUND_NONCE,
    RELAY_NONCE_USED, TRUSTED_REMOTES,
};

/// Credit a relayed deposit: native gas share to `to`, remainder as margin
/// or insurance-fund stake.
pub fn execute_lz_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.relay_endpoint {
        return Err(ContractError::NotRelayEndpoint);
    }

    let trusted = TRUSTED_REMOTES
        .may_load(deps.storage, src_chain_id)?
        .map(|remote| remote.matches(src_address.as_slice(), &env.contract.address))
        .unwrap_or(false);
    if !trusted {
        return Err(ContractError::UntrustedRemote {
            chain_id: src_chain_id,
        });
    }

    if RELAY_NONCE_USED.has(deps.storage, (src_chain_id, nonce)) {
        return Err(ContractError::NonceAlreadyUsed {
            chain_id: src_chain_id,
            nonce,
        });
    }

    let got = packet_type(payload.as_slice())?;
    if got != PT_DEPOSIT {
        return Err(ContractError::InvalidPacketType { got });
    }
    let deposit = RelayedDeposit::decode(payload.as_slice())?;
    let token = load_token(deps.as_ref(), deposit.token_index)?;
    let recipient = deps.api.addr_validate(&deposit.to)?;

    let to_gas_amount = deposit.metadata.to_gas_amount;
    if to_gas_amount > deposit.amount {
        return Err(ContractError::InvalidAmount {
            reason: "Gas amount exceeds deposit amount".to_string(),
        });
    }

    RELAY_NONCE_USED.save(deps.storage, (src_chain_id, nonce), &true)?;
    INBOUND_NONCE.save(deps.storage, src_chain_id, &nonce)?;

    let supply = circulating_supply(deps.storage, deposit.token_index)?
        .checked_add(deposit.amount)
        .map_err(StdError::from)?;
    CIRCULATING_SUPPLY.save(deps.storage, deposit.token_index, &supply)?;

    let mut response = Response::new();

    let gas = to_native_amount(to_gas_amount, token.decimals, config.native_decimals)?;
    if !gas.is_zero() {
        let available = deps
            .querier
            .query_balance(&env.contract.address, &config.native_denom)?
            .amount;
        if available < gas {
            return Err(ContractError::GasTransferFailed {
                required: gas,
                available,
            });
        }
        response = response.add_message(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: native_funds(&config.native_denom, gas),
        });
    }

    let credit = deposit.amount - to_gas_amount;
    if !credit.is_zero() {
        let msg = if deposit.metadata.is_insurance_fund_deposit {
            WasmMsg::Execute {
                contract_addr: config.insurance_fund.to_string(),
                msg: to_json_binary(&InsuranceFundExecuteMsg::DepositFor {
                    staker: recipient.to_string(),
                    amount: credit,
                })?,
                funds: vec![],
            }
        } else {
            WasmMsg::Execute {
                contract_addr: config.margin_account.to_string(),
                msg: to_json_binary(&MarginAccountExecuteMsg::AddMarginFor {
                    token_index: deposit.token_index,
                    amount: credit,
                    trader: recipient.to_string(),
                })?,
                funds: vec![],
            }
        };
        response = response.add_message(msg);
    }

    let event = Event::new("receive_from_chain")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("to", recipient.to_string())
        .add_attribute("token_index", deposit.token_index.to_string())
        .add_attribute("amount", deposit.amount.to_string())
        .add_attribute("to_gas_amount", to_gas_amount.to_string())
        .add_attribute(
            "is_insurance_fund_deposit",
            deposit.metadata.is_insurance_fund_deposit.to_string(),
        )
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("payload_hash", payload_hash(payload.as_slice()));

    Ok(response
        .add_event(event)
        .add_attribute("method", "lz_receive")
        .add_attribute("credited", credit.to_string())
        .add_attribute("gas", gas.to_string()))
}
