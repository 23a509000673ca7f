//! Rescue claims.

use cosmwasm_std::{to_json_binary, DepsMut, MessageInfo, Response, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::rescue;

/// Withdraw up to the caller's own rescue balance of `token`.
///
/// The balance is reduced before the transfer message is built.
pub fn execute_rescue_my_funds(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }

    let token = deps.api.addr_validate(&token)?;
    let remaining = rescue::debit(deps.storage, &token, info.sender.as_str(), amount)?;

    let transfer = WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("method", "rescue_my_funds")
        .add_attribute("recipient", info.sender)
        .add_attribute("token", token)
        .add_attribute("amount", amount.to_string())
        .add_attribute("remaining", remaining.to_string()))
}
