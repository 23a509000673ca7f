//! Configuration management handlers.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use common::TrustedRemote;

use super::ensure_owner;
use crate::error::ContractError;
use crate::state::{TokenConfig, CONFIG, SUPPORTED_TOKENS, TRUSTED_REMOTES};

pub fn execute_set_trusted_remote(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    remote: TrustedRemote,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    TRUSTED_REMOTES.save(deps.storage, chain_id, &remote)?;

    Ok(Response::new()
        .add_attribute("method", "set_trusted_remote")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("source", remote.source()))
}

/// Register or reconfigure a collateral token.
pub fn execute_set_supported_token(
    deps: DepsMut,
    info: MessageInfo,
    token_index: u32,
    price_feed_id: String,
    decimals: u8,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    SUPPORTED_TOKENS.save(
        deps.storage,
        token_index,
        &TokenConfig {
            price_feed_id: price_feed_id.clone(),
            decimals,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "set_supported_token")
        .add_attribute("token_index", token_index.to_string())
        .add_attribute("price_feed_id", price_feed_id)
        .add_attribute("decimals", decimals.to_string()))
}

#[allow(clippy::too_many_arguments)]
pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    relay_endpoint: Option<String>,
    price_feed: Option<String>,
    margin_account: Option<String>,
    insurance_fund: Option<String>,
    remote_chain_id: Option<u16>,
    native_price_feed_id: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    if let Some(endpoint) = relay_endpoint {
        config.relay_endpoint = deps.api.addr_validate(&endpoint)?;
    }
    if let Some(feed) = price_feed {
        config.price_feed = deps.api.addr_validate(&feed)?;
    }
    if let Some(account) = margin_account {
        config.margin_account = deps.api.addr_validate(&account)?;
    }
    if let Some(fund) = insurance_fund {
        config.insurance_fund = deps.api.addr_validate(&fund)?;
    }
    if let Some(chain_id) = remote_chain_id {
        config.remote_chain_id = chain_id;
    }
    if let Some(feed_id) = native_price_feed_id {
        config.native_price_feed_id = feed_id;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_config")
        .add_attribute("relay_endpoint", config.relay_endpoint)
        .add_attribute("margin_account", config.margin_account)
        .add_attribute("remote_chain_id", config.remote_chain_id.to_string()))
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    config.owner = deps.api.addr_validate(&new_owner)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("previous_owner", info.sender)
        .add_attribute("new_owner", config.owner))
}
