//! Remote Ledger Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers and the forward `reply`
//! - `query` - Query message handlers
//! - `rescue` - Pending rescue ledger bookkeeping

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_deposit, execute_forward_deposit, execute_forward_withdraw, execute_lz_receive,
    execute_rescue_my_funds, execute_set_stargate_config, execute_set_supported_token,
    execute_set_trusted_remote, execute_set_whitelist_relayer, execute_sg_receive,
    execute_transfer_ownership, execute_update_config, handle_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_convert_fee, query_estimate_send_fee, query_inbound_nonce,
    query_is_whitelisted_relayer, query_outbound_nonce, query_pending_funds, query_pending_total,
    query_supported_token, query_trusted_remote,
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

    let stargate_router = msg
        .stargate_router
        .map(|router| deps.api.addr_validate(&router))
        .transpose()?;

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        relay_endpoint: deps.api.addr_validate(&msg.relay_endpoint)?,
        stargate_router,
        price_feed: deps.api.addr_validate(&msg.price_feed)?,
        home_chain_id: msg.home_chain_id,
        native_denom: msg.native_denom,
        native_decimals: msg.native_decimals,
        native_price_feed_id: msg.native_price_feed_id,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("relay_endpoint", config.relay_endpoint)
        .add_attribute("home_chain_id", config.home_chain_id.to_string()))
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
        // Network callbacks
        ExecuteMsg::SgReceive {
            src_chain_id,
            src_address,
            src_pool_id,
            nonce,
            token,
            amount_ld,
            payload,
        } => execute_sg_receive(
            deps,
            env,
            info,
            src_chain_id,
            src_address,
            src_pool_id,
            nonce,
            token,
            amount_ld,
            payload,
        ),
        ExecuteMsg::LzReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => execute_lz_receive(deps, env, info, src_chain_id, src_address, nonce, payload),

        // User operations
        ExecuteMsg::Deposit(vars) => execute_deposit(deps, env, info, vars),
        ExecuteMsg::RescueMyFunds { token, amount } => {
            execute_rescue_my_funds(deps, info, token, amount)
        }

        // Self-calls
        ExecuteMsg::ForwardDeposit { message, amount } => {
            execute_forward_deposit(deps, env, info, message, amount)
        }
        ExecuteMsg::ForwardWithdraw { message } => {
            execute_forward_withdraw(deps, env, info, message)
        }

        // Administration
        ExecuteMsg::SetWhitelistRelayer { relayer, enabled } => {
            execute_set_whitelist_relayer(deps, info, relayer, enabled)
        }
        ExecuteMsg::SetStargateConfig { router } => {
            execute_set_stargate_config(deps, info, router)
        }
        ExecuteMsg::SetTrustedRemote { chain_id, remote } => {
            execute_set_trusted_remote(deps, info, chain_id, remote)
        }
        ExecuteMsg::SetSupportedToken {
            token_index,
            token,
            price_feed_id,
            src_pool_id,
            decimals,
        } => execute_set_supported_token(
            deps,
            info,
            token_index,
            token,
            price_feed_id,
            src_pool_id,
            decimals,
        ),
        ExecuteMsg::UpdateConfig {
            relay_endpoint,
            price_feed,
            home_chain_id,
            native_price_feed_id,
        } => execute_update_config(
            deps,
            info,
            relay_endpoint,
            price_feed,
            home_chain_id,
            native_price_feed_id,
        ),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    handle_reply(deps, msg)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::SupportedToken { token_index } => {
            to_json_binary(&query_supported_token(deps, token_index)?)
        }
        QueryMsg::PendingFunds { token, recipient } => {
            to_json_binary(&query_pending_funds(deps, token, recipient)?)
        }
        QueryMsg::PendingTotal { token } => to_json_binary(&query_pending_total(deps, token)?),
        QueryMsg::TrustedRemote { chain_id } => {
            to_json_binary(&query_trusted_remote(deps, chain_id)?)
        }
        QueryMsg::IsWhitelistedRelayer { relayer } => {
            to_json_binary(&query_is_whitelisted_relayer(deps, relayer)?)
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
        QueryMsg::ConvertFee {
            token_index,
            native_fee,
        } => to_json_binary(&query_convert_fee(deps, token_index, native_fee)?),
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
