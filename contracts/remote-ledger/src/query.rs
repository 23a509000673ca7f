//! Query handlers for the remote ledger contract.

use cosmwasm_std::{Deps, Env, StdError, StdResult, Uint128};

use common::interfaces::FeeQuoteResponse;
use common::query_fee_in_stable;

use crate::execute::quote_deposit;
use crate::msg::{
    ConfigResponse, ConvertFeeResponse, DepositVars, NonceResponse, PendingFundsResponse,
    TokenConfigResponse, TrustedRemoteResponse,
};
use crate::rescue;
use crate::state::{
    CONFIG, INBOUND_NONCE, OUTBOUND_NONCE, SUPPORTED_TOKENS, TRUSTED_REMOTES,
    WHITELISTED_RELAYERS,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        relay_endpoint: config.relay_endpoint,
        stargate_router: config.stargate_router,
        price_feed: config.price_feed,
        home_chain_id: config.home_chain_id,
        native_denom: config.native_denom,
        native_decimals: config.native_decimals,
        native_price_feed_id: config.native_price_feed_id,
    })
}

pub fn query_supported_token(deps: Deps, token_index: u32) -> StdResult<TokenConfigResponse> {
    let token = SUPPORTED_TOKENS
        .may_load(deps.storage, token_index)?
        .ok_or_else(|| StdError::not_found(format!("token index {}", token_index)))?;
    Ok(TokenConfigResponse {
        token_index,
        token: token.token,
        price_feed_id: token.price_feed_id,
        collected_fee: token.collected_fee,
        src_pool_id: token.src_pool_id,
        decimals: token.decimals,
    })
}

pub fn query_pending_funds(
    deps: Deps,
    token: String,
    recipient: String,
) -> StdResult<PendingFundsResponse> {
    let token = deps.api.addr_validate(&token)?;
    let amount = rescue::pending(deps.storage, &token, &recipient)?;
    Ok(PendingFundsResponse { token, amount })
}

pub fn query_pending_total(deps: Deps, token: String) -> StdResult<PendingFundsResponse> {
    let token = deps.api.addr_validate(&token)?;
    let amount = rescue::pending_total(deps.storage, &token)?;
    Ok(PendingFundsResponse { token, amount })
}

pub fn query_trusted_remote(deps: Deps, chain_id: u16) -> StdResult<TrustedRemoteResponse> {
    Ok(TrustedRemoteResponse {
        chain_id,
        remote: TRUSTED_REMOTES.may_load(deps.storage, chain_id)?,
    })
}

pub fn query_is_whitelisted_relayer(deps: Deps, relayer: String) -> StdResult<bool> {
    let relayer = deps.api.addr_validate(&relayer)?;
    Ok(WHITELISTED_RELAYERS
        .may_load(deps.storage, &relayer)?
        .unwrap_or(false))
}

pub fn query_outbound_nonce(deps: Deps, chain_id: u16) -> StdResult<NonceResponse> {
    Ok(NonceResponse {
        chain_id,
        nonce: OUTBOUND_NONCE
            .may_load(deps.storage, chain_id)?
            .unwrap_or_default(),
    })
}

pub fn query_inbound_nonce(deps: Deps, chain_id: u16) -> StdResult<NonceResponse> {
    Ok(NonceResponse {
        chain_id,
        nonce: INBOUND_NONCE
            .may_load(deps.storage, chain_id)?
            .unwrap_or_default(),
    })
}

/// Relay quote for a direct deposit with these parameters.
pub fn query_estimate_send_fee(
    deps: Deps,
    env: Env,
    vars: DepositVars,
    pay_in_zro: bool,
) -> StdResult<FeeQuoteResponse> {
    let config = CONFIG.load(deps.storage)?;
    quote_deposit(deps, &config, &env.contract.address, &vars, pay_in_zro)
        .map_err(|e| StdError::generic_err(e.to_string()))
}

pub fn query_convert_fee(
    deps: Deps,
    token_index: u32,
    native_fee: Uint128,
) -> StdResult<ConvertFeeResponse> {
    let config = CONFIG.load(deps.storage)?;
    let token = SUPPORTED_TOKENS
        .may_load(deps.storage, token_index)?
        .ok_or_else(|| StdError::not_found(format!("token index {}", token_index)))?;
    let fee_in_stable = query_fee_in_stable(
        &deps.querier,
        &config.price_feed,
        &config.native_price_feed_id,
        &token.price_feed_id,
        config.native_decimals,
        token.decimals,
        native_fee,
    )?;
    Ok(ConvertFeeResponse {
        native_fee,
        fee_in_stable,
    })
}
