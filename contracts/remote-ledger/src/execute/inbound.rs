//! Inbound deliveries from the swap and relay networks.
//!
//! Both handlers validate the delivery, record the forward context in
//! `PENDING_FORWARD` and hand the actual forward to a self-call dispatched
//! with `reply_always`. Once the delivery is accepted the handler cannot
//! fail: whatever happens inside the self-call is folded into `reply`.

use cosmwasm_std::{
    to_json_binary, Binary, DepsMut, Env, Event, MessageInfo, Reply, Response, SubMsg,
    SubMsgResult, Uint128, WasmMsg,
};

use common::hash::payload_hash;
use common::payload::packet_type;
use common::{DepositMessage, WithdrawMessage, PT_WITHDRAW};

use super::load_token;
use crate::error::ContractError;
use crate::msg::ExecuteMsg;
use crate::rescue;
use crate::state::{
    PendingForward, CONFIG, INBOUND_NONCE, PENDING_FORWARD, RELAY_NONCE_USED,
    REPLY_FORWARD_DEPOSIT, REPLY_FORWARD_WITHDRAW, SWAP_NONCE_USED, TRUSTED_REMOTES,
    WHITELISTED_RELAYERS,
};

// ============================================================================
// SgReceive
// ============================================================================

/// Stablecoin delivered by the swap network; forward it to the home ledger.
#[allow(clippy::too_many_arguments)]
pub fn execute_sg_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    src_pool_id: u64,
    nonce: u64,
    token: String,
    amount_ld: Uint128,
    payload: Binary,
) -> Result<Response, ContractError> {
    let whitelisted = WHITELISTED_RELAYERS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or(false);
    if !whitelisted {
        return Err(ContractError::NotWhitelistedRelayer {
            relayer: info.sender.to_string(),
        });
    }

    let message = DepositMessage::decode(payload.as_slice())?;
    let token_config = load_token(deps.as_ref(), message.token_index)?;
    let token_addr = deps.api.addr_validate(&token)?;
    if token_addr != token_config.token {
        return Err(ContractError::TokenMismatch {
            expected: token_config.token.to_string(),
            got: token,
        });
    }
    if src_pool_id != token_config.src_pool_id {
        return Err(ContractError::PoolMismatch {
            expected: token_config.src_pool_id,
            got: src_pool_id,
        });
    }
    let beneficiary = rescue::beneficiary(deps.api, &message.to, &message.refund_address)
        .ok_or_else(|| ContractError::InvalidRecipient {
            to: message.to.clone(),
        })?;

    if SWAP_NONCE_USED.has(deps.storage, (src_chain_id, nonce)) {
        return Err(ContractError::NonceAlreadyUsed {
            chain_id: src_chain_id,
            nonce,
        });
    }
    SWAP_NONCE_USED.save(deps.storage, (src_chain_id, nonce), &true)?;

    let config = CONFIG.load(deps.storage)?;
    PENDING_FORWARD.save(
        deps.storage,
        &PendingForward {
            src_chain_id,
            dst_chain_id: config.home_chain_id,
            nonce,
            to: beneficiary,
            token: token_addr.clone(),
            amount: amount_ld,
        },
    )?;

    let to = message.to.clone();
    let forward = SubMsg::reply_always(
        WasmMsg::Execute {
            contract_addr: env.contract.address.to_string(),
            msg: to_json_binary(&ExecuteMsg::ForwardDeposit {
                message,
                amount: amount_ld,
            })?,
            funds: vec![],
        },
        REPLY_FORWARD_DEPOSIT,
    );

    let event = Event::new("received_from_stargate")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("src_pool_id", src_pool_id.to_string())
        .add_attribute("src_address", format!("0x{}", hex::encode(src_address.as_slice())))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("token", token_addr.to_string())
        .add_attribute("amount", amount_ld.to_string())
        .add_attribute("payload_hash", payload_hash(payload.as_slice()));

    Ok(Response::new()
        .add_submessage(forward)
        .add_event(event)
        .add_attribute("method", "sg_receive")
        .add_attribute("to", to))
}

// ============================================================================
// LzReceive
// ============================================================================

/// Withdrawal relayed from the home ledger; pay it out or swap it onward.
pub fn execute_lz_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.relay_endpoint {
        return Err(ContractError::NotRelayEndpoint);
    }

    let trusted = TRUSTED_REMOTES
        .may_load(deps.storage, src_chain_id)?
        .map(|remote| remote.matches(src_address.as_slice(), &env.contract.address))
        .unwrap_or(false);
    if !trusted {
        return Err(ContractError::UntrustedRemote {
            chain_id: src_chain_id,
        });
    }

    if RELAY_NONCE_USED.has(deps.storage, (src_chain_id, nonce)) {
        return Err(ContractError::NonceAlreadyUsed {
            chain_id: src_chain_id,
            nonce,
        });
    }

    let got = packet_type(payload.as_slice())?;
    if got != PT_WITHDRAW {
        return Err(ContractError::InvalidPacketType { got });
    }
    let message = WithdrawMessage::decode(payload.as_slice())?;
    let token_config = load_token(deps.as_ref(), message.token_index)?;

    RELAY_NONCE_USED.save(deps.storage, (src_chain_id, nonce), &true)?;
    INBOUND_NONCE.save(deps.storage, src_chain_id, &nonce)?;

    let dst_chain_id = if message.second_hop_chain_id == 0 {
        message.destination_chain_id
    } else {
        message.second_hop_chain_id
    };
    // Only a local payout can be claimed by a different address than `to`
    let to = if message.second_hop_chain_id == 0 {
        rescue::beneficiary(deps.api, &message.to, &message.refund_address)
            .unwrap_or_else(|| message.to.clone())
    } else {
        message.to.clone()
    };
    PENDING_FORWARD.save(
        deps.storage,
        &PendingForward {
            src_chain_id,
            dst_chain_id,
            nonce,
            to,
            token: token_config.token,
            amount: message.amount,
        },
    )?;

    let forward = SubMsg::reply_always(
        WasmMsg::Execute {
            contract_addr: env.contract.address.to_string(),
            msg: to_json_binary(&ExecuteMsg::ForwardWithdraw { message })?,
            funds: vec![],
        },
        REPLY_FORWARD_WITHDRAW,
    );

    Ok(Response::new()
        .add_submessage(forward)
        .add_attribute("method", "lz_receive")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("payload_hash", payload_hash(payload.as_slice())))
}

// ============================================================================
// Reply
// ============================================================================

/// Settle the forward dispatched by an inbound handler.
///
/// A failed forward has already been rolled back by the runtime; the full
/// amount is credited to the intended recipient's rescue balance.
pub fn handle_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    if msg.id != REPLY_FORWARD_DEPOSIT && msg.id != REPLY_FORWARD_WITHDRAW {
        return Err(ContractError::UnknownReplyId { id: msg.id });
    }

    let pending = PENDING_FORWARD
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingForward)?;
    PENDING_FORWARD.remove(deps.storage);

    let failure = match msg.result {
        SubMsgResult::Ok(_) => None,
        SubMsgResult::Err(reason) => {
            rescue::credit(deps.storage, &pending.token, &pending.to, pending.amount)?;
            Some(reason)
        }
    };
    let forwarded_ok = failure.is_none();

    let mut response = Response::new()
        .add_attribute("method", "forward_reply")
        .add_attribute("forwarded_ok", forwarded_ok.to_string());

    if msg.id == REPLY_FORWARD_DEPOSIT {
        if let Some(reason) = failure {
            response = response.add_event(
                Event::new("deposit_second_hop_failure")
                    .add_attribute("src_chain_id", pending.src_chain_id.to_string())
                    .add_attribute("nonce", pending.nonce.to_string())
                    .add_attribute("to", pending.to.clone())
                    .add_attribute("token", pending.token.to_string())
                    .add_attribute("amount", pending.amount.to_string())
                    .add_attribute("reason", reason),
            );
        }
        return Ok(response);
    }

    if let Some(reason) = failure {
        response = response.add_event(
            Event::new("withdraw_second_hop_failure")
                .add_attribute("dst_chain_id", pending.dst_chain_id.to_string())
                .add_attribute("nonce", pending.nonce.to_string())
                .add_attribute("to", pending.to.clone())
                .add_attribute("token", pending.token.to_string())
                .add_attribute("amount", pending.amount.to_string())
                .add_attribute("reason", reason),
        );
    }
    Ok(response.add_event(
        Event::new("receive_from_hubble_net")
            .add_attribute("src_chain_id", pending.src_chain_id.to_string())
            .add_attribute("to", pending.to)
            .add_attribute("amount", pending.amount.to_string())
            .add_attribute("forwarded_ok", forwarded_ok.to_string())
            .add_attribute("nonce", pending.nonce.to_string()),
    ))
}
