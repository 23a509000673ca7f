//! Liquidity-swap network interface.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, QuerierWrapper, StdResult, Uint128};

use super::FeeQuoteResponse;

#[cw_serde]
pub enum SwapExecuteMsg {
    /// Move `amount_ld` of the source pool's token to `to` on `dst_chain_id`.
    /// The router pulls the tokens with CW20 `TransferFrom`; the native fee
    /// is attached as funds. Fails if less than `min_amount_ld` would arrive.
    Swap {
        dst_chain_id: u16,
        src_pool_id: u64,
        dst_pool_id: u64,
        refund_address: String,
        amount_ld: Uint128,
        min_amount_ld: Uint128,
        to: String,
        payload: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum SwapQueryMsg {
    #[returns(FeeQuoteResponse)]
    QuoteSwapFee {
        dst_chain_id: u16,
        to: String,
        payload: Binary,
    },
}

/// Inbound delivery. Serializes identically to the `SgReceive` variant of the
/// remote ledger's `ExecuteMsg`.
#[cw_serde]
pub enum SwapReceiverMsg {
    SgReceive {
        src_chain_id: u16,
        src_address: Binary,
        /// Pool the tokens left on the source chain
        src_pool_id: u64,
        nonce: u64,
        token: String,
        amount_ld: Uint128,
        payload: Binary,
    },
}

pub fn quote_swap_fee(
    querier: &QuerierWrapper,
    router: &Addr,
    dst_chain_id: u16,
    to: &str,
) -> StdResult<FeeQuoteResponse> {
    querier.query_wasm_smart(
        router,
        &SwapQueryMsg::QuoteSwapFee {
            dst_chain_id,
            to: to.to_string(),
            payload: Binary::default(),
        },
    )
}
