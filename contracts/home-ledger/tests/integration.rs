//! Integration tests for the home ledger using cw-multi-test.
//!
//! The remote ledger is not deployed here: deposits are delivered by calling
//! `LzReceive` as the relay endpoint, and withdrawals are inspected in the
//! mock relay queue.

use cosmwasm_std::{coins, Addr, Binary, Empty, Uint128};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use bridge_testing::{
    mock_margin, mock_price_feed, mock_relay, ETH_PRICE, HOME_CHAIN_ID, HOME_DENOM,
    NATIVE_PRICE_ID, ORIGIN_CHAIN_ID, REMOTE_CHAIN_ID, STABLE_PRICE_ID, USDC_PRICE,
};
use common::{DepositMetadata, RelayedDeposit, TrustedRemote, WithdrawMessage};
use home_ledger::msg::{
    CirculatingSupplyResponse, ConfigResponse, EstimateSendFeeResponse, ExecuteMsg,
    InstantiateMsg, NonceResponse, QueryMsg, TokenConfigResponse, TransferSummary, WithdrawVars,
};

const USDC: u128 = 1_000_000;
const RELAY_FEE: u128 = 1_000_000_000_000_000;
/// 1 USDC worth of gas in 18-decimal native units
const USDC_AS_NATIVE: u128 = 1_000_000_000_000;
const USER_GAS: u128 = 1_000_000_000_000_000_000;
/// 1000 USDC worth of native gas
const LEDGER_GAS: u128 = 1_000 * USDC * USDC_AS_NATIVE;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_home_ledger() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        home_ledger::contract::execute,
        home_ledger::contract::instantiate,
        home_ledger::contract::query,
    );
    Box::new(contract)
}

struct TestEnv {
    app: App,
    owner: Addr,
    bob: Addr,
    /// Remote-chain ledger, never deployed
    remote: Addr,
    relay: Addr,
    margin: Addr,
    insurance: Addr,
    home: Addr,
}

fn setup() -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("owner");
    let bob = Addr::unchecked("bob");
    let remote = Addr::unchecked("remote");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &owner, coins(10 * LEDGER_GAS, HOME_DENOM))
            .unwrap();
        router
            .bank
            .init_balance(storage, &bob, coins(USER_GAS, HOME_DENOM))
            .unwrap();
    });

    let price_code = app.store_code(mock_price_feed::contract());
    let price_feed = app
        .instantiate_contract(
            price_code,
            owner.clone(),
            &mock_price_feed::InstantiateMsg {},
            &[],
            "price-feed",
            None,
        )
        .unwrap();
    for (asset_id, price) in [(NATIVE_PRICE_ID, ETH_PRICE), (STABLE_PRICE_ID, USDC_PRICE)] {
        app.execute_contract(
            owner.clone(),
            price_feed.clone(),
            &mock_price_feed::ExecuteMsg::SetPrice {
                asset_id: asset_id.to_string(),
                price: Uint128::new(price),
            },
            &[],
        )
        .unwrap();
    }

    let relay_code = app.store_code(mock_relay::contract());
    let relay = app
        .instantiate_contract(
            relay_code,
            owner.clone(),
            &mock_relay::InstantiateMsg {
                base_fee: Uint128::new(RELAY_FEE),
                fee_per_byte: Uint128::zero(),
            },
            &[],
            "relay",
            None,
        )
        .unwrap();

    let margin_code = app.store_code(mock_margin::contract());
    let margin = app
        .instantiate_contract(
            margin_code,
            owner.clone(),
            &mock_margin::InstantiateMsg {},
            &[],
            "margin-account",
            None,
        )
        .unwrap();
    let insurance = app
        .instantiate_contract(
            margin_code,
            owner.clone(),
            &mock_margin::InstantiateMsg {},
            &[],
            "insurance-fund",
            None,
        )
        .unwrap();

    let code_id = app.store_code(contract_home_ledger());
    let home = app
        .instantiate_contract(
            code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                relay_endpoint: relay.to_string(),
                price_feed: price_feed.to_string(),
                margin_account: margin.to_string(),
                insurance_fund: insurance.to_string(),
                remote_chain_id: REMOTE_CHAIN_ID,
                native_denom: HOME_DENOM.to_string(),
                native_decimals: 18,
                native_price_feed_id: NATIVE_PRICE_ID.to_string(),
            },
            &[],
            "home-ledger",
            None,
        )
        .unwrap();

    app.execute_contract(
        owner.clone(),
        relay.clone(),
        &mock_relay::ExecuteMsg::RegisterApplication {
            application: home.to_string(),
            chain_id: HOME_CHAIN_ID,
            fee_denom: HOME_DENOM.to_string(),
        },
        &[],
    )
    .unwrap();

    let wiring = [
        ExecuteMsg::SetTrustedRemote {
            chain_id: REMOTE_CHAIN_ID,
            remote: TrustedRemote::new(remote.as_str(), home.as_str()),
        },
        ExecuteMsg::SetSupportedToken {
            token_index: 0,
            price_feed_id: STABLE_PRICE_ID.to_string(),
            decimals: 6,
        },
    ];
    for msg in wiring {
        app.execute_contract(owner.clone(), home.clone(), &msg, &[])
            .unwrap();
    }
    app.send_tokens(owner.clone(), home.clone(), &coins(LEDGER_GAS, HOME_DENOM))
        .unwrap();

    TestEnv {
        app,
        owner,
        bob,
        remote,
        relay,
        margin,
        insurance,
        home,
    }
}

fn relayed(to: &Addr, amount: u128, to_gas_amount: u128, insurance: bool) -> RelayedDeposit {
    RelayedDeposit {
        to: to.to_string(),
        token_index: 0,
        amount: Uint128::new(amount),
        metadata: DepositMetadata {
            to_gas_amount: Uint128::new(to_gas_amount),
            is_insurance_fund_deposit: insurance,
        },
    }
}

/// Deliver `payload` as if relayed from the remote ledger.
fn lz_receive(env: &mut TestEnv, nonce: u64, payload: Binary) -> anyhow::Result<AppResponse> {
    env.app.execute_contract(
        env.relay.clone(),
        env.home.clone(),
        &ExecuteMsg::LzReceive {
            src_chain_id: REMOTE_CHAIN_ID,
            src_address: Binary::from(env.remote.as_bytes()),
            nonce,
            payload,
        },
        &[],
    )
}

fn withdraw_vars(second_hop_chain_id: u16, to: &str, amount: u128) -> WithdrawVars {
    WithdrawVars {
        second_hop_chain_id,
        destination_pool_id: 1,
        to: to.to_string(),
        token_index: 0,
        amount: Uint128::new(amount),
        amount_min: Uint128::new(amount * 99 / 100),
        refund_address: "bob".to_string(),
        zro_payment_address: None,
        adapter_params: Binary::default(),
    }
}

fn withdraw(
    env: &mut TestEnv,
    vars: WithdrawVars,
    fee: u128,
) -> anyhow::Result<AppResponse> {
    env.app.execute_contract(
        env.bob.clone(),
        env.home.clone(),
        &ExecuteMsg::Withdraw(vars),
        &coins(fee, HOME_DENOM),
    )
}

fn supply(env: &TestEnv) -> u128 {
    let res: CirculatingSupplyResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.home, &QueryMsg::CirculatingSupply { token_index: 0 })
        .unwrap();
    res.amount.u128()
}

fn margin_of(env: &TestEnv, trader: &Addr) -> u128 {
    let margin: Uint128 = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.margin,
            &mock_margin::QueryMsg::Margin {
                trader: trader.to_string(),
                token_index: 0,
            },
        )
        .unwrap();
    margin.u128()
}

fn native_balance(env: &TestEnv, addr: &Addr) -> u128 {
    env.app
        .wrap()
        .query_balance(addr, HOME_DENOM)
        .unwrap()
        .amount
        .u128()
}

fn queued_packets(env: &TestEnv) -> Vec<mock_relay::Packet> {
    env.app
        .wrap()
        .query_wasm_smart(&env.relay, &mock_relay::QueryMsg::Pending {})
        .unwrap()
}

fn assert_error(res: anyhow::Result<AppResponse>, expected: &str) {
    let err = res.unwrap_err();
    assert!(
        err.root_cause().to_string().contains(expected),
        "expected '{}', got '{}'",
        expected,
        err.root_cause()
    );
}

// ============================================================================
// Instantiate and Administration
// ============================================================================

#[test]
fn test_instantiate() {
    let env = setup();

    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.home, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.owner, env.owner);
    assert_eq!(config.relay_endpoint, env.relay);
    assert_eq!(config.margin_account, env.margin);
    assert_eq!(config.insurance_fund, env.insurance);
    assert_eq!(config.remote_chain_id, REMOTE_CHAIN_ID);

    let token: TokenConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.home, &QueryMsg::SupportedToken { token_index: 0 })
        .unwrap();
    assert_eq!(token.decimals, 6);
    assert_eq!(supply(&env), 0);
}

#[test]
fn test_admin_calls_require_owner() {
    let mut env = setup();
    let bob = env.bob.clone();
    let home = env.home.clone();

    let calls = [
        ExecuteMsg::SetTrustedRemote {
            chain_id: REMOTE_CHAIN_ID,
            remote: TrustedRemote::new("rogue", home.as_str()),
        },
        ExecuteMsg::SetSupportedToken {
            token_index: 1,
            price_feed_id: STABLE_PRICE_ID.to_string(),
            decimals: 18,
        },
        ExecuteMsg::UpdateConfig {
            relay_endpoint: None,
            price_feed: None,
            margin_account: Some(bob.to_string()),
            insurance_fund: None,
            remote_chain_id: None,
            native_price_feed_id: None,
        },
        ExecuteMsg::TransferOwnership {
            new_owner: bob.to_string(),
        },
    ];
    for msg in calls {
        let res = env.app.execute_contract(bob.clone(), home.clone(), &msg, &[]);
        assert_error(res, "only owner");
    }
}

#[test]
fn test_update_config_and_transfer_ownership() {
    let mut env = setup();
    let new_owner = Addr::unchecked("newowner");

    env.app
        .execute_contract(
            env.owner.clone(),
            env.home.clone(),
            &ExecuteMsg::UpdateConfig {
                relay_endpoint: None,
                price_feed: None,
                margin_account: None,
                insurance_fund: None,
                remote_chain_id: Some(111),
                native_price_feed_id: None,
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            env.owner.clone(),
            env.home.clone(),
            &ExecuteMsg::TransferOwnership {
                new_owner: new_owner.to_string(),
            },
            &[],
        )
        .unwrap();

    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.home, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.remote_chain_id, 111);
    assert_eq!(config.owner, new_owner);
}

// ============================================================================
// Relayed Deposits
// ============================================================================

#[test]
fn test_deposit_credits_gas_and_margin() {
    let mut env = setup();
    let bob = env.bob.clone();
    let gas_before = native_balance(&env, &bob);

    let payload = relayed(&bob, 998 * USDC, 500 * USDC, false).encode();
    let res = lz_receive(&mut env, 1, payload).unwrap();

    let event = res
        .events
        .iter()
        .find(|e| e.ty == "wasm-receive_from_chain")
        .expect("receive_from_chain");
    assert!(event
        .attributes
        .iter()
        .any(|a| a.key == "amount" && a.value == (998 * USDC).to_string()));

    assert_eq!(native_balance(&env, &bob), gas_before + 500 * USDC * USDC_AS_NATIVE);
    assert_eq!(margin_of(&env, &bob), 498 * USDC);
    assert_eq!(supply(&env), 998 * USDC);

    let nonce: NonceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.home,
            &QueryMsg::InboundNonce {
                chain_id: REMOTE_CHAIN_ID,
            },
        )
        .unwrap();
    assert_eq!(nonce.nonce, 1);
}

#[test]
fn test_insurance_deposit_stakes_for_recipient() {
    let mut env = setup();
    let bob = env.bob.clone();

    lz_receive(&mut env, 1, relayed(&bob, 50 * USDC, 0, true).encode()).unwrap();

    let stake: Uint128 = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.insurance,
            &mock_margin::QueryMsg::Stake {
                staker: bob.to_string(),
            },
        )
        .unwrap();
    assert_eq!(stake.u128(), 50 * USDC);
    assert_eq!(margin_of(&env, &bob), 0);
    assert_eq!(supply(&env), 50 * USDC);
}

#[test]
fn test_all_gas_deposit_credits_no_margin() {
    let mut env = setup();
    let bob = env.bob.clone();
    let gas_before = native_balance(&env, &bob);

    lz_receive(&mut env, 1, relayed(&bob, 10 * USDC, 10 * USDC, false).encode()).unwrap();
    assert_eq!(native_balance(&env, &bob), gas_before + 10 * USDC * USDC_AS_NATIVE);
    assert_eq!(margin_of(&env, &bob), 0);
    assert_eq!(supply(&env), 10 * USDC);
}

#[test]
fn test_deposit_requires_relay_endpoint() {
    let mut env = setup();
    let bob = env.bob.clone();

    let res = env.app.execute_contract(
        bob.clone(),
        env.home.clone(),
        &ExecuteMsg::LzReceive {
            src_chain_id: REMOTE_CHAIN_ID,
            src_address: Binary::from(env.remote.as_bytes()),
            nonce: 1,
            payload: relayed(&bob, USDC, 0, false).encode(),
        },
        &[],
    );
    assert_error(res, "not the relay endpoint");
}

#[test]
fn test_deposit_requires_trusted_source() {
    let mut env = setup();
    let bob = env.bob.clone();

    let res = env.app.execute_contract(
        env.relay.clone(),
        env.home.clone(),
        &ExecuteMsg::LzReceive {
            src_chain_id: ORIGIN_CHAIN_ID,
            src_address: Binary::from(env.remote.as_bytes()),
            nonce: 1,
            payload: relayed(&bob, USDC, 0, false).encode(),
        },
        &[],
    );
    assert_error(res, "Untrusted remote for chain 101");
    assert_eq!(supply(&env), 0);
}

#[test]
fn test_deposit_replay_is_rejected() {
    let mut env = setup();
    let bob = env.bob.clone();
    let payload = relayed(&bob, 10 * USDC, 0, false).encode();

    lz_receive(&mut env, 4, payload.clone()).unwrap();
    assert_error(lz_receive(&mut env, 4, payload), "Nonce already used");
    assert_eq!(supply(&env), 10 * USDC);
    assert_eq!(margin_of(&env, &bob), 10 * USDC);
}

#[test]
fn test_deposit_rejects_withdraw_packet() {
    let mut env = setup();
    let payload = WithdrawMessage {
        destination_chain_id: REMOTE_CHAIN_ID,
        second_hop_chain_id: 0,
        destination_pool_id: 1,
        to: "bob".to_string(),
        token_index: 0,
        amount: Uint128::new(USDC),
        amount_min: Uint128::zero(),
        refund_address: "bob".to_string(),
        zro_payment_address: None,
        adapter_params: Binary::default(),
    }
    .encode();

    assert_error(lz_receive(&mut env, 1, payload), "Invalid packet type: 2");
}

#[test]
fn test_deposit_rejects_unknown_token_and_bad_gas_split() {
    let mut env = setup();
    let bob = env.bob.clone();

    let mut unknown = relayed(&bob, USDC, 0, false);
    unknown.token_index = 3;
    assert_error(lz_receive(&mut env, 1, unknown.encode()), "Token index not supported");

    let bad_split = relayed(&bob, USDC, 2 * USDC, false);
    assert_error(lz_receive(&mut env, 2, bad_split.encode()), "Invalid amount");
    assert_eq!(supply(&env), 0);
}

#[test]
fn test_gas_shortfall_reverts_delivery() {
    let mut env = setup();
    let bob = env.bob.clone();

    // The ledger holds 1000 USDC worth of gas
    let payload = relayed(&bob, 2_000 * USDC, 1_500 * USDC, false).encode();
    assert_error(lz_receive(&mut env, 1, payload.clone()), "Gas transfer failed");
    assert_eq!(supply(&env), 0);
    assert_eq!(margin_of(&env, &bob), 0);

    // Redelivery of the same nonce succeeds once the ledger is topped up
    env.app
        .send_tokens(env.owner.clone(), env.home.clone(), &coins(LEDGER_GAS, HOME_DENOM))
        .unwrap();
    lz_receive(&mut env, 1, payload).unwrap();
    assert_eq!(supply(&env), 2_000 * USDC);
    assert_eq!(margin_of(&env, &bob), 500 * USDC);
}

// ============================================================================
// Withdrawals
// ============================================================================

#[test]
fn test_withdraw_relays_and_refunds_excess_fee() {
    let mut env = setup();
    let bob = env.bob.clone();
    lz_receive(&mut env, 1, relayed(&bob, 100 * USDC, 0, false).encode()).unwrap();
    let gas_before = native_balance(&env, &bob);

    let res = withdraw(
        &mut env,
        withdraw_vars(ORIGIN_CHAIN_ID, "origin1bob", 40 * USDC),
        3 * RELAY_FEE,
    )
    .unwrap();
    assert!(res.events.iter().any(|e| e.ty == "wasm-send_to_chain"));

    assert_eq!(native_balance(&env, &bob), gas_before - RELAY_FEE);
    assert_eq!(supply(&env), 60 * USDC);
    assert_eq!(margin_of(&env, &bob), 60 * USDC);

    let packets = queued_packets(&env);
    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].src_chain_id, HOME_CHAIN_ID);
    assert_eq!(packets[0].dst_chain_id, REMOTE_CHAIN_ID);
    assert_eq!(packets[0].destination, env.remote.to_string());
    let message = WithdrawMessage::decode(&packets[0].payload).unwrap();
    assert_eq!(message.destination_chain_id, REMOTE_CHAIN_ID);
    assert_eq!(message.second_hop_chain_id, ORIGIN_CHAIN_ID);
    assert_eq!(message.to, "origin1bob");
    assert_eq!(message.amount.u128(), 40 * USDC);
    assert_eq!(message.amount_min.u128(), 39_600_000);

    let nonce: NonceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.home,
            &QueryMsg::OutboundNonce {
                chain_id: REMOTE_CHAIN_ID,
            },
        )
        .unwrap();
    assert_eq!(nonce.nonce, 1);
}

#[test]
fn test_withdraw_rejects_invalid_requests() {
    let mut env = setup();
    let bob = env.bob.clone();
    lz_receive(&mut env, 1, relayed(&bob, 100 * USDC, 0, false).encode()).unwrap();

    assert_error(
        withdraw(&mut env, withdraw_vars(0, "bob", 0), RELAY_FEE),
        "Invalid amount",
    );
    assert_error(
        withdraw(&mut env, withdraw_vars(0, "bob", 101 * USDC), RELAY_FEE),
        "Insufficient circulating supply",
    );
    assert_error(
        withdraw(&mut env, withdraw_vars(0, "bob", 10 * USDC), RELAY_FEE - 1),
        "Insufficient native token",
    );

    let mut unknown = withdraw_vars(0, "bob", 10 * USDC);
    unknown.token_index = 2;
    assert_error(withdraw(&mut env, unknown, RELAY_FEE), "Token index not supported");

    assert_eq!(supply(&env), 100 * USDC);
    assert_eq!(margin_of(&env, &bob), 100 * USDC);
    assert!(queued_packets(&env).is_empty());
}

#[test]
fn test_send_relay_message_is_self_only() {
    let mut env = setup();
    let bob = env.bob.clone();

    let res = env.app.execute_contract(
        bob.clone(),
        env.home.clone(),
        &ExecuteMsg::SendRelayMessage {
            dst_chain_id: REMOTE_CHAIN_ID,
            payload: Binary::default(),
            refund_address: bob.to_string(),
            zro_payment_address: None,
            adapter_params: Binary::default(),
            native_fee: Uint128::new(RELAY_FEE),
            transfer: TransferSummary {
                from: bob.to_string(),
                to: bob.to_string(),
                token_index: 0,
                amount: Uint128::new(USDC),
            },
        },
        &coins(RELAY_FEE, HOME_DENOM),
    );
    assert_error(res, "only the contract itself");
}

#[test]
fn test_estimate_send_fee() {
    let env = setup();

    let quote: EstimateSendFeeResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.home,
            &QueryMsg::EstimateSendFee {
                vars: withdraw_vars(ORIGIN_CHAIN_ID, "origin1bob", 10 * USDC),
                pay_in_zro: false,
            },
        )
        .unwrap();
    assert_eq!(quote.native_fee.u128(), RELAY_FEE);
    assert_eq!(quote.zro_fee.u128(), 0);
    assert_eq!(quote.fee_in_stable.u128(), 2 * USDC);
}
