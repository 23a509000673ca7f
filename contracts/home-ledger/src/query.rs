//! Query handlers for the home ledger contract.

use cosmwasm_std::{Deps, Env, StdError, StdResult};

use common::query_fee_in_stable;

use crate::execute::{quote_withdraw, withdraw_message};
use crate::msg::{
    CirculatingSupplyResponse, ConfigResponse, EstimateSendFeeResponse, NonceResponse,
    TokenConfigResponse, TrustedRemoteResponse, WithdrawVars,
};
use crate::state::{
    circulating_supply, CONFIG, INBOUND_NONCE, OUTBOUND_NONCE, SUPPORTED_TOKENS, TRUSTED_REMOTES,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        relay_endpoint: config.relay_endpoint,
        price_feed: config.price_feed,
        margin_account: config.margin_account,
        insurance_fund: config.insurance_fund,
        remote_chain_id: config.remote_chain_id,
        native_denom: config.native_denom,
        native_decimals: config.native_decimals,
        native_price_feed_id: config.native_price_feed_id,
    })
}

pub fn query_circulating_supply(deps: Deps, token_index: u32) -> StdResult<CirculatingSupplyResponse> {
    Ok(CirculatingSupplyResponse {
        token_index,
        amount: circulating_supply(deps.storage, token_index)?,
    })
}

pub fn query_supported_token(deps: Deps, token_index: u32) -> StdResult<TokenConfigResponse> {
    let token = SUPPORTED_TOKENS
        .may_load(deps.storage, token_index)?
        .ok_or_else(|| StdError::not_found(format!("token index {}", token_index)))?;
    Ok(TokenConfigResponse {
        token_index,
        price_feed_id: token.price_feed_id,
        decimals: token.decimals,
    })
}

pub fn query_trusted_remote(deps: Deps, chain_id: u16) -> StdResult<TrustedRemoteResponse> {
    Ok(TrustedRemoteResponse {
        chain_id,
        remote: TRUSTED_REMOTES.may_load(deps.storage, chain_id)?,
    })
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

/// Relay quote for a withdrawal and its value in the withdrawn token.
pub fn query_estimate_send_fee(
    deps: Deps,
    env: Env,
    vars: WithdrawVars,
    pay_in_zro: bool,
) -> StdResult<EstimateSendFeeResponse> {
    let config = CONFIG.load(deps.storage)?;
    let token = SUPPORTED_TOKENS
        .may_load(deps.storage, vars.token_index)?
        .ok_or_else(|| StdError::not_found(format!("token index {}", vars.token_index)))?;

    let payload = withdraw_message(&config, &vars).encode();
    let quote = quote_withdraw(
        deps,
        &config,
        &env.contract.address,
        &payload,
        pay_in_zro,
        &vars.adapter_params,
    )
    .map_err(|e| StdError::generic_err(e.to_string()))?;
    let fee_in_stable = query_fee_in_stable(
        &deps.querier,
        &config.price_feed,
        &config.native_price_feed_id,
        &token.price_feed_id,
        config.native_decimals,
        token.decimals,
        quote.native_fee,
    )?;

    Ok(EstimateSendFeeResponse {
        native_fee: quote.native_fee,
        zro_fee: quote.zro_fee,
        fee_in_stable,
    })
}
