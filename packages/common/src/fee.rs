//! Fee conversion
//!
//! Relay and swap fees are quoted in the native gas token of the chain that
//! pays them, but both ledgers charge users in the stable token. The
//! conversion uses two independent price quotes taken at the same scale:
//!
//! ```text
//! fee_in_stable = native_fee * price(native) / price(stable)
//! ```
//!
//! rescaled from native decimals to stable decimals. The result is always
//! truncated, never rounded up.

use cosmwasm_std::{Addr, QuerierWrapper, StdError, StdResult, Uint128, Uint256};

use crate::interfaces::oracle::query_price;

/// Largest decimal gap representable as a `u128` power of ten
const MAX_DECIMAL_GAP: u8 = 38;

/// Prices and decimals needed to convert a native fee
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceQuote {
    pub native_price: Uint128,
    pub stable_price: Uint128,
    pub native_decimals: u8,
    pub stable_decimals: u8,
}

fn pow10(exp: u8) -> StdResult<Uint256> {
    if exp > MAX_DECIMAL_GAP {
        return Err(StdError::generic_err(format!(
            "decimal gap {} exceeds {}",
            exp, MAX_DECIMAL_GAP
        )));
    }
    Ok(Uint256::from(10u128.pow(exp as u32)))
}

/// Convert a native-denominated fee into stable-token units.
pub fn convert_native_fee(native_fee: Uint128, quote: &PriceQuote) -> StdResult<Uint128> {
    if quote.stable_price.is_zero() {
        return Err(StdError::generic_err("stable asset price is zero"));
    }

    let mut numerator = Uint256::from(native_fee).checked_mul(Uint256::from(quote.native_price))?;
    let mut denominator = Uint256::from(quote.stable_price);

    if quote.native_decimals >= quote.stable_decimals {
        denominator = denominator.checked_mul(pow10(quote.native_decimals - quote.stable_decimals)?)?;
    } else {
        numerator = numerator.checked_mul(pow10(quote.stable_decimals - quote.native_decimals)?)?;
    }

    let fee = numerator
        .checked_div(denominator)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Uint128::try_from(fee).map_err(|e| StdError::generic_err(e.to_string()))
}

/// Query both prices from the feed and convert `native_fee`.
#[allow(clippy::too_many_arguments)]
pub fn query_fee_in_stable(
    querier: &QuerierWrapper,
    price_feed: &Addr,
    native_asset_id: &str,
    stable_asset_id: &str,
    native_decimals: u8,
    stable_decimals: u8,
    native_fee: Uint128,
) -> StdResult<Uint128> {
    if native_fee.is_zero() {
        return Ok(Uint128::zero());
    }
    let quote = PriceQuote {
        native_price: query_price(querier, price_feed, native_asset_id)?,
        stable_price: query_price(querier, price_feed, stable_asset_id)?,
        native_decimals,
        stable_decimals,
    };
    convert_native_fee(native_fee, &quote)
}
