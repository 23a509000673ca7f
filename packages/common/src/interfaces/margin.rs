//! Margin account and insurance fund interfaces on the settlement chain.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

#[cw_serde]
pub enum MarginAccountExecuteMsg {
    /// Credit `amount` of collateral `token_index` to `trader`
    AddMarginFor {
        token_index: u32,
        amount: Uint128,
        trader: String,
    },
    /// Debit `amount` of collateral from `trader`; fails if the trader
    /// cannot withdraw that much
    RemoveMarginFor {
        token_index: u32,
        amount: Uint128,
        trader: String,
    },
}

#[cw_serde]
pub enum InsuranceFundExecuteMsg {
    DepositFor { staker: String, amount: Uint128 },
}
