//! Home Ledger Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_lz_receive, execute_send_relay_message, execute_set_supported_token,
    execute_set_trusted_remote, execute_transfer_ownership, execute_update_config,
    execute_withdraw,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_circulating_supply, query_config, query_estimate_send_fee, query_inbound_nonce,
    query_outbound_nonce, query_supported_token, query_trusted_remote,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        relay_endpoint: deps.api.addr_validate(&msg.relay_endpoint)?,
        price_feed: deps.api.addr_validate(&msg.price_feed)?,
        margin_account: deps.api.addr_validate(&msg.margin_account)?,
        insurance_fund: deps.api.addr_validate(&msg.insurance_fund)?,
        remote_chain_id: msg.remote_chain_id,
        native_denom: msg.native_denom,
        native_decimals: msg.native_decimals,
        native_price_feed_id: msg.native_price_feed_id,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("relay_endpoint", config.relay_endpoint)
        .add_attribute("remote_chain_id", config.remote_chain_id.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::LzReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => execute_lz_receive(deps, env, info, src_chain_id, src_address, nonce, payload),
        ExecuteMsg::Withdraw(vars) => execute_withdraw(deps, env, info, vars),
        ExecuteMsg::SendRelayMessage {
            dst_chain_id,
            payload,
            refund_address,
            zro_payment_address,
            adapter_params,
            native_fee,
            transfer,
        } => execute_send_relay_message(
            deps,
            env,
            info,
            dst_chain_id,
            payload,
            refund_address,
            zro_payment_address,
            adapter_params,
            native_fee,
            transfer,
        ),

        // Administration
        ExecuteMsg::SetTrustedRemote { chain_id, remote } => {
            execute_set_trusted_remote(deps, info, chain_id, remote)
        }
        ExecuteMsg::SetSupportedToken {
            token_index,
            price_feed_id,
            decimals,
        } => execute_set_supported_token(deps, info, token_index, price_feed_id, decimals),
        ExecuteMsg::UpdateConfig {
            relay_endpoint,
            price_feed,
            margin_account,
            insurance_fund,
            remote_chain_id,
            native_price_feed_id,
        } => execute_update_config(
            deps,
            info,
            relay_endpoint,
            price_feed,
            margin_account,
            insurance_fund,
            remote_chain_id,
            native_price_feed_id,
        ),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::CirculatingSupply { token_index } => {
            to_json_binary(&query_circulating_supply(deps, token_index)?)
        }
        QueryMsg::SupportedToken { token_index } => {
            to_json_binary(&query_supported_token(deps, token_index)?)
        }
        QueryMsg::TrustedRemote { chain_id } => {
            to_json_binary(&query_trusted_remote(deps, chain_id)?)
        }
        QueryMsg::OutboundNonce { chain_id } => {
            to_json_binary(&query_outbound_nonce(deps, chain_id)?)
        }
        QueryMsg::InboundNonce { chain_id } => {
            to_json_binary(&query_inbound_nonce(deps, chain_id)?)
        }
        QueryMsg::EstimateSendFee { vars, pay_in_zro } => {
            to_json_binary(&query_estimate_send_fee(deps, env, vars, pay_in_zro)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
