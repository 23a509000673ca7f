//! Two-ledger test suite: both ledgers, the mock collaborators and a CW20
//! stable token wired together in one `App`.

#![allow(dead_code)]

use cosmwasm_std::{coins, Addr, Binary, Coin, Empty, Event, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20QueryMsg};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use bridge_testing::{
    cw20_contract, mock_margin, mock_price_feed, mock_relay, mock_swap, ETH_PRICE, HOME_CHAIN_ID,
    HOME_DENOM, NATIVE_PRICE_ID, ORIGIN_CHAIN_ID, REMOTE_CHAIN_ID, REMOTE_DENOM, STABLE_PRICE_ID,
    USDC_PRICE,
};
use common::{DepositMessage, TrustedRemote};

/// 1 USDC
pub const USDC: u128 = 1_000_000;
/// 0.001 ETH, worth 2 USDC at the suite prices
pub const RELAY_BASE_FEE: u128 = 1_000_000_000_000_000;
pub const SWAP_NATIVE_FEE: u128 = 1_000_000_000_000_000;
pub const SWAP_FEE_BPS: u16 = 6;
/// RELAY_BASE_FEE converted to USDC units
pub const RELAY_FEE_USDC: u128 = 2 * USDC;

pub const ROUTER_LIQUIDITY: u128 = 1_000_000 * USDC;
pub const REMOTE_GAS: u128 = 1_000_000_000_000_000_000;
pub const HOME_GAS: u128 = 1_000_000_000_000_000_000_000_000;

fn contract_remote_ledger() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            remote_ledger::contract::execute,
            remote_ledger::contract::instantiate,
            remote_ledger::contract::query,
        )
        .with_reply(remote_ledger::contract::reply),
    )
}

fn contract_home_ledger() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        home_ledger::contract::execute,
        home_ledger::contract::instantiate,
        home_ledger::contract::query,
    ))
}

pub struct Suite {
    pub app: App,
    pub owner: Addr,
    /// Depositor on the origin chain
    pub alice: Addr,
    /// Trader on the settlement chain
    pub bob: Addr,
    pub usdc: Addr,
    pub relay: Addr,
    pub router: Addr,
    pub price_feed: Addr,
    pub margin: Addr,
    pub insurance: Addr,
    pub remote: Addr,
    pub home: Addr,
}

impl Suite {
    pub fn new() -> Self {
        Self::with_gas(REMOTE_GAS, HOME_GAS)
    }

    /// Suite whose ledgers start with the given native gas balances.
    pub fn with_gas(remote_gas: u128, home_gas: u128) -> Self {
        let mut app = App::default();
        let owner = Addr::unchecked("owner");
        let alice = Addr::unchecked("alice");
        let bob = Addr::unchecked("bob");

        app.init_modules(|router, _, storage| {
            router
                .bank
                .init_balance(
                    storage,
                    &owner,
                    vec![
                        Coin::new(10 * REMOTE_GAS, REMOTE_DENOM),
                        Coin::new(10 * HOME_GAS, HOME_DENOM),
                    ],
                )
                .unwrap();
            router
                .bank
                .init_balance(storage, &alice, coins(REMOTE_GAS, REMOTE_DENOM))
                .unwrap();
            router
                .bank
                .init_balance(storage, &bob, coins(REMOTE_GAS, HOME_DENOM))
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
                    base_fee: Uint128::new(RELAY_BASE_FEE),
                    fee_per_byte: Uint128::zero(),
                },
                &[],
                "relay",
                None,
            )
            .unwrap();

        let swap_code = app.store_code(mock_swap::contract());
        let router = app
            .instantiate_contract(
                swap_code,
                owner.clone(),
                &mock_swap::InstantiateMsg {
                    native_fee: Uint128::new(SWAP_NATIVE_FEE),
                    fee_denom: REMOTE_DENOM.to_string(),
                    fee_bps: SWAP_FEE_BPS,
                },
                &[],
                "router",
                None,
            )
            .unwrap();

        let cw20_code = app.store_code(cw20_contract());
        let usdc = app
            .instantiate_contract(
                cw20_code,
                owner.clone(),
                &cw20_base::msg::InstantiateMsg {
                    name: "USD Coin".to_string(),
                    symbol: "USDC".to_string(),
                    decimals: 6,
                    initial_balances: vec![
                        Cw20Coin {
                            address: router.to_string(),
                            amount: Uint128::new(ROUTER_LIQUIDITY),
                        },
                        Cw20Coin {
                            address: alice.to_string(),
                            amount: Uint128::new(10_000 * USDC),
                        },
                    ],
                    mint: None,
                    marketing: None,
                },
                &[],
                "usdc",
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

        let remote_code = app.store_code(contract_remote_ledger());
        let remote = app
            .instantiate_contract(
                remote_code,
                owner.clone(),
                &remote_ledger::msg::InstantiateMsg {
                    owner: owner.to_string(),
                    relay_endpoint: relay.to_string(),
                    stargate_router: Some(router.to_string()),
                    price_feed: price_feed.to_string(),
                    home_chain_id: HOME_CHAIN_ID,
                    native_denom: REMOTE_DENOM.to_string(),
                    native_decimals: 18,
                    native_price_feed_id: NATIVE_PRICE_ID.to_string(),
                },
                &[],
                "remote-ledger",
                Some(owner.to_string()),
            )
            .unwrap();

        let home_code = app.store_code(contract_home_ledger());
        let home = app
            .instantiate_contract(
                home_code,
                owner.clone(),
                &home_ledger::msg::InstantiateMsg {
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
                Some(owner.to_string()),
            )
            .unwrap();

        let mut suite = Suite {
            app,
            owner,
            alice,
            bob,
            usdc,
            relay,
            router,
            price_feed,
            margin,
            insurance,
            remote,
            home,
        };
        suite.wire(remote_gas, home_gas);
        suite
    }

    fn wire(&mut self, remote_gas: u128, home_gas: u128) {
        let owner = self.owner.clone();

        for (application, chain_id, fee_denom) in [
            (&self.remote, REMOTE_CHAIN_ID, REMOTE_DENOM),
            (&self.home, HOME_CHAIN_ID, HOME_DENOM),
        ] {
            self.app
                .execute_contract(
                    owner.clone(),
                    self.relay.clone(),
                    &mock_relay::ExecuteMsg::RegisterApplication {
                        application: application.to_string(),
                        chain_id,
                        fee_denom: fee_denom.to_string(),
                    },
                    &[],
                )
                .unwrap();
        }

        self.app
            .execute_contract(
                owner.clone(),
                self.router.clone(),
                &mock_swap::ExecuteMsg::SetPool {
                    pool_id: 1,
                    token: self.usdc.to_string(),
                },
                &[],
            )
            .unwrap();

        let remote_msgs = [
            remote_ledger::msg::ExecuteMsg::SetTrustedRemote {
                chain_id: HOME_CHAIN_ID,
                remote: TrustedRemote::new(self.home.as_str(), self.remote.as_str()),
            },
            remote_ledger::msg::ExecuteMsg::SetWhitelistRelayer {
                relayer: self.router.to_string(),
                enabled: true,
            },
            remote_ledger::msg::ExecuteMsg::SetSupportedToken {
                token_index: 0,
                token: self.usdc.to_string(),
                price_feed_id: STABLE_PRICE_ID.to_string(),
                src_pool_id: 1,
                decimals: 6,
            },
        ];
        for msg in remote_msgs {
            self.app
                .execute_contract(owner.clone(), self.remote.clone(), &msg, &[])
                .unwrap();
        }

        let home_msgs = [
            home_ledger::msg::ExecuteMsg::SetTrustedRemote {
                chain_id: REMOTE_CHAIN_ID,
                remote: TrustedRemote::new(self.remote.as_str(), self.home.as_str()),
            },
            home_ledger::msg::ExecuteMsg::SetSupportedToken {
                token_index: 0,
                price_feed_id: STABLE_PRICE_ID.to_string(),
                decimals: 6,
            },
        ];
        for msg in home_msgs {
            self.app
                .execute_contract(owner.clone(), self.home.clone(), &msg, &[])
                .unwrap();
        }

        if remote_gas > 0 {
            self.app
                .send_tokens(owner.clone(), self.remote.clone(), &coins(remote_gas, REMOTE_DENOM))
                .unwrap();
        }
        if home_gas > 0 {
            let home = self.home.clone();
            self.fund(&home, home_gas, HOME_DENOM);
        }
    }

    pub fn fund(&mut self, addr: &Addr, amount: u128, denom: &str) {
        self.app
            .send_tokens(self.owner.clone(), addr.clone(), &coins(amount, denom))
            .unwrap();
    }

    // ------------------------------------------------------------------------
    // Network actions
    // ------------------------------------------------------------------------

    pub fn deposit_message(&self, to: &Addr, amount: u128, to_gas_amount: u128) -> DepositMessage {
        DepositMessage {
            from: self.alice.to_string(),
            to: to.to_string(),
            token_index: 0,
            amount: Uint128::new(amount),
            to_gas_amount: Uint128::new(to_gas_amount),
            is_insurance_fund_deposit: false,
            refund_address: self.alice.to_string(),
            zro_payment_address: None,
            adapter_params: Binary::default(),
        }
    }

    /// Swap network delivers `amount` USDC with `message` to the remote ledger.
    pub fn swap_deliver(&mut self, message: &DepositMessage, amount: u128) -> AppResponse {
        self.try_swap_deliver(message, amount).unwrap()
    }

    pub fn try_swap_deliver(
        &mut self,
        message: &DepositMessage,
        amount: u128,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.owner.clone(),
            self.router.clone(),
            &mock_swap::ExecuteMsg::Deliver {
                receiver: self.remote.to_string(),
                src_chain_id: ORIGIN_CHAIN_ID,
                src_address: Binary::from(b"origin-pool".to_vec()),
                src_pool_id: 1,
                token: self.usdc.to_string(),
                amount: Uint128::new(amount),
                payload: message.encode(),
            },
            &[],
        )
    }

    /// Deliver the oldest queued relay packet.
    pub fn relay_next(&mut self) -> AppResponse {
        self.try_relay_next().unwrap()
    }

    pub fn try_relay_next(&mut self) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.owner.clone(),
            self.relay.clone(),
            &mock_relay::ExecuteMsg::DeliverNext {},
            &[],
        )
    }

    pub fn pending_packets(&self) -> Vec<mock_relay::Packet> {
        self.app
            .wrap()
            .query_wasm_smart(&self.relay, &mock_relay::QueryMsg::Pending {})
            .unwrap()
    }

    pub fn withdraw_vars(
        &self,
        second_hop_chain_id: u16,
        to: &str,
        amount: u128,
        amount_min: u128,
    ) -> home_ledger::msg::WithdrawVars {
        home_ledger::msg::WithdrawVars {
            second_hop_chain_id,
            destination_pool_id: 1,
            to: to.to_string(),
            token_index: 0,
            amount: Uint128::new(amount),
            amount_min: Uint128::new(amount_min),
            refund_address: self.bob.to_string(),
            zro_payment_address: None,
            adapter_params: Binary::default(),
        }
    }

    pub fn withdraw(
        &mut self,
        trader: &Addr,
        vars: home_ledger::msg::WithdrawVars,
        fee: u128,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            trader.clone(),
            self.home.clone(),
            &home_ledger::msg::ExecuteMsg::Withdraw(vars),
            &coins(fee, HOME_DENOM),
        )
    }

    pub fn rescue(
        &mut self,
        sender: &Addr,
        amount: u128,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.remote.clone(),
            &remote_ledger::msg::ExecuteMsg::RescueMyFunds {
                token: self.usdc.to_string(),
                amount: Uint128::new(amount),
            },
            &[],
        )
    }

    // ------------------------------------------------------------------------
    // Observations
    // ------------------------------------------------------------------------

    pub fn usdc_balance(&self, addr: &Addr) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.usdc,
                &Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn native_balance(&self, addr: &Addr, denom: &str) -> u128 {
        self.app.wrap().query_balance(addr, denom).unwrap().amount.u128()
    }

    pub fn margin_of(&self, trader: &Addr) -> u128 {
        let margin: Uint128 = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.margin,
                &mock_margin::QueryMsg::Margin {
                    trader: trader.to_string(),
                    token_index: 0,
                },
            )
            .unwrap();
        margin.u128()
    }

    pub fn stake_of(&self, staker: &Addr) -> u128 {
        let stake: Uint128 = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.insurance,
                &mock_margin::QueryMsg::Stake {
                    staker: staker.to_string(),
                },
            )
            .unwrap();
        stake.u128()
    }

    pub fn circulating_supply(&self) -> u128 {
        let res: home_ledger::msg::CirculatingSupplyResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.home,
                &home_ledger::msg::QueryMsg::CirculatingSupply { token_index: 0 },
            )
            .unwrap();
        res.amount.u128()
    }

    pub fn pending_funds(&self, recipient: &str) -> u128 {
        let res: remote_ledger::msg::PendingFundsResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.remote,
                &remote_ledger::msg::QueryMsg::PendingFunds {
                    token: self.usdc.to_string(),
                    recipient: recipient.to_string(),
                },
            )
            .unwrap();
        res.amount.u128()
    }

    pub fn pending_total(&self) -> u128 {
        let res: remote_ledger::msg::PendingFundsResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.remote,
                &remote_ledger::msg::QueryMsg::PendingTotal {
                    token: self.usdc.to_string(),
                },
            )
            .unwrap();
        res.amount.u128()
    }

    pub fn collected_fee(&self) -> u128 {
        let res: remote_ledger::msg::TokenConfigResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.remote,
                &remote_ledger::msg::QueryMsg::SupportedToken { token_index: 0 },
            )
            .unwrap();
        res.collected_fee.u128()
    }

    pub fn swaps(&self) -> Vec<mock_swap::SwapRecord> {
        self.app
            .wrap()
            .query_wasm_smart(&self.router, &mock_swap::QueryMsg::Swaps {})
            .unwrap()
    }

    /// Everything the remote ledger holds is backed by supply on the
    /// settlement chain, owed to a rescuer, or retained as fees.
    pub fn assert_conserved(&self) {
        assert_eq!(
            self.usdc_balance(&self.remote),
            self.circulating_supply() + self.pending_total() + self.collected_fee(),
            "remote balance != supply + pending + collected fees"
        );
    }
}

/// Custom event emitted by a contract, as reported by cw-multi-test
pub fn find_event<'a>(res: &'a AppResponse, ty: &str) -> Option<&'a Event> {
    let wasm_ty = format!("wasm-{}", ty);
    res.events.iter().find(|e| e.ty == wasm_ty)
}

pub fn event_attr(event: &Event, key: &str) -> String {
    event
        .attributes
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
        .unwrap_or_else(|| panic!("attribute {} not found on {}", key, event.ty))
}
