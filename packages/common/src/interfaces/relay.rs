//! Message-relay network interface.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, QuerierWrapper, StdResult};

use super::FeeQuoteResponse;

#[cw_serde]
pub enum RelayExecuteMsg {
    /// Send `payload` to `destination` on `dst_chain_id`; the native fee is
    /// attached as funds.
    Send {
        dst_chain_id: u16,
        destination: Binary,
        payload: Binary,
        refund_address: String,
        zro_payment_address: Option<String>,
        adapter_params: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum RelayQueryMsg {
    #[returns(FeeQuoteResponse)]
    EstimateFees {
        dst_chain_id: u16,
        user_application: String,
        payload: Binary,
        pay_in_zro: bool,
        adapter_params: Binary,
    },
}

/// Inbound delivery. Serializes identically to the `LzReceive` variant of
/// each ledger's `ExecuteMsg`.
#[cw_serde]
pub enum RelayReceiverMsg {
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },
}

pub fn estimate_fees(
    querier: &QuerierWrapper,
    endpoint: &Addr,
    dst_chain_id: u16,
    user_application: &Addr,
    payload: &Binary,
    pay_in_zro: bool,
    adapter_params: &Binary,
) -> StdResult<FeeQuoteResponse> {
    querier.query_wasm_smart(
        endpoint,
        &RelayQueryMsg::EstimateFees {
            dst_chain_id,
            user_application: user_application.to_string(),
            payload: payload.clone(),
            pay_in_zro,
            adapter_params: adapter_params.clone(),
        },
    )
}
