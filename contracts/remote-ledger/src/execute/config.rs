//! Configuration management handlers.
//!
//! This module handles:
//! - Swap relayer whitelist and router
//! - Trusted remotes
//! - Supported tokens
//! - Core config and ownership

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use common::TrustedRemote;

use super::ensure_owner;
use crate::error::ContractError;
use crate::state::{TokenConfig, CONFIG, SUPPORTED_TOKENS, TRUSTED_REMOTES, WHITELISTED_RELAYERS};

// ============================================================================
// Network Wiring
// ============================================================================

/// Allow or revoke a swap-network delivery contract.
pub fn execute_set_whitelist_relayer(
    deps: DepsMut,
    info: MessageInfo,
    relayer: String,
    enabled: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    let relayer_addr = deps.api.addr_validate(&relayer)?;
    if enabled {
        WHITELISTED_RELAYERS.save(deps.storage, &relayer_addr, &true)?;
    } else {
        WHITELISTED_RELAYERS.remove(deps.storage, &relayer_addr);
    }

    Ok(Response::new()
        .add_attribute("method", "set_whitelist_relayer")
        .add_attribute("relayer", relayer)
        .add_attribute("enabled", enabled.to_string()))
}

/// Set the swap router used for second-hop withdrawals.
pub fn execute_set_stargate_config(
    deps: DepsMut,
    info: MessageInfo,
    router: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    config.stargate_router = Some(deps.api.addr_validate(&router)?);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_stargate_config")
        .add_attribute("router", router))
}

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

// ============================================================================
// Token Management
// ============================================================================

/// Create or reconfigure a supported token, keeping its collected fees.
pub fn execute_set_supported_token(
    deps: DepsMut,
    info: MessageInfo,
    token_index: u32,
    token: String,
    price_feed_id: String,
    src_pool_id: u64,
    decimals: u8,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    let token_addr = deps.api.addr_validate(&token)?;
    let collected_fee = SUPPORTED_TOKENS
        .may_load(deps.storage, token_index)?
        .map(|existing| existing.collected_fee)
        .unwrap_or(Uint128::zero());

    SUPPORTED_TOKENS.save(
        deps.storage,
        token_index,
        &TokenConfig {
            token: token_addr,
            price_feed_id: price_feed_id.clone(),
            collected_fee,
            src_pool_id,
            decimals,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "set_supported_token")
        .add_attribute("token_index", token_index.to_string())
        .add_attribute("token", token)
        .add_attribute("price_feed_id", price_feed_id)
        .add_attribute("src_pool_id", src_pool_id.to_string())
        .add_attribute("decimals", decimals.to_string()))
}

// ============================================================================
// Core Config
// ============================================================================

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    relay_endpoint: Option<String>,
    price_feed: Option<String>,
    home_chain_id: Option<u16>,
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
    if let Some(chain_id) = home_chain_id {
        config.home_chain_id = chain_id;
    }
    if let Some(feed_id) = native_price_feed_id {
        config.native_price_feed_id = feed_id;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_config")
        .add_attribute("relay_endpoint", config.relay_endpoint)
        .add_attribute("price_feed", config.price_feed)
        .add_attribute("home_chain_id", config.home_chain_id.to_string()))
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
