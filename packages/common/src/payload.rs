//! Cross-chain message types and their byte encodings.
//!
//! Three payloads cross the two networks:
//!
//! | Payload          | Network        | Direction                    |
//! |------------------|----------------|------------------------------|
//! | `DepositMessage` | liquidity swap | origin chain → remote ledger |
//! | `RelayedDeposit` | message relay  | remote ledger → home ledger  |
//! | `WithdrawMessage`| message relay  | home ledger → remote ledger  |
//!
//! Relay payloads start with a packet-type word so each ledger can refuse a
//! message meant for the other direction before decoding the rest.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, StdError, StdResult, Uint128};

use crate::codec::{PayloadReader, PayloadWriter};

/// Packet type of a relayed deposit (remote → home)
pub const PT_DEPOSIT: u16 = 1;

/// Packet type of a withdrawal (home → remote)
pub const PT_WITHDRAW: u16 = 2;

/// Reads the packet-type word without consuming the payload.
pub fn packet_type(payload: &[u8]) -> StdResult<u16> {
    PayloadReader::new(payload).u16()
}

/// The wire has no distinct encoding for `Some("")`; it travels as `None`.
/// Build messages with this so a decoded copy compares equal to the original.
pub fn optional_address(value: Option<String>) -> Option<String> {
    value.filter(|address| !address.is_empty())
}

/// Deposit instructions carried by the liquidity-swap payload.
#[cw_serde]
pub struct DepositMessage {
    /// Depositor on the origin chain
    pub from: String,
    /// Recipient on the settlement chain
    pub to: String,
    pub token_index: u32,
    /// Amount the depositor intended to send (token decimals)
    pub amount: Uint128,
    /// Part of the amount to deliver as native gas on the settlement chain
    pub to_gas_amount: Uint128,
    pub is_insurance_fund_deposit: bool,
    pub refund_address: String,
    pub zro_payment_address: Option<String>,
    pub adapter_params: Binary,
}

impl DepositMessage {
    pub fn encode(&self) -> Binary {
        PayloadWriter::new()
            .string(&self.from)
            .string(&self.to)
            .u32(self.token_index)
            .uint128(self.amount)
            .uint128(self.to_gas_amount)
            .bool(self.is_insurance_fund_deposit)
            .string(&self.refund_address)
            .string(self.zro_payment_address.as_deref().unwrap_or_default())
            .bytes(self.adapter_params.as_slice())
            .finish()
    }

    pub fn decode(data: &[u8]) -> StdResult<Self> {
        let mut r = PayloadReader::new(data);
        let msg = Self {
            from: r.string()?,
            to: r.string()?,
            token_index: r.u32()?,
            amount: r.uint128()?,
            to_gas_amount: r.uint128()?,
            is_insurance_fund_deposit: r.bool()?,
            refund_address: r.string()?,
            zro_payment_address: optional_address(Some(r.string()?)),
            adapter_params: Binary::from(r.bytes()?),
        };
        r.finish()?;
        Ok(msg)
    }

    /// Gas-split intent forwarded alongside the relayed amount.
    pub fn metadata(&self) -> DepositMetadata {
        DepositMetadata {
            to_gas_amount: self.to_gas_amount,
            is_insurance_fund_deposit: self.is_insurance_fund_deposit,
        }
    }
}

/// Compact `(to_gas_amount, is_insurance_fund_deposit)` sub-encoding
#[cw_serde]
#[derive(Copy)]
pub struct DepositMetadata {
    pub to_gas_amount: Uint128,
    pub is_insurance_fund_deposit: bool,
}

impl DepositMetadata {
    pub fn encode(&self) -> Binary {
        PayloadWriter::new()
            .uint128(self.to_gas_amount)
            .bool(self.is_insurance_fund_deposit)
            .finish()
    }

    pub fn decode(data: &[u8]) -> StdResult<Self> {
        let mut r = PayloadReader::new(data);
        let metadata = Self {
            to_gas_amount: r.uint128()?,
            is_insurance_fund_deposit: r.bool()?,
        };
        r.finish()?;
        Ok(metadata)
    }
}

/// Deposit as forwarded by the remote ledger, net of the relay fee.
#[cw_serde]
pub struct RelayedDeposit {
    pub to: String,
    pub token_index: u32,
    pub amount: Uint128,
    pub metadata: DepositMetadata,
}

impl RelayedDeposit {
    pub fn encode(&self) -> Binary {
        PayloadWriter::new()
            .u16(PT_DEPOSIT)
            .string(&self.to)
            .u32(self.token_index)
            .uint128(self.amount)
            .bytes(self.metadata.encode().as_slice())
            .finish()
    }

    pub fn decode(data: &[u8]) -> StdResult<Self> {
        let mut r = PayloadReader::new(data);
        expect_packet_type(&mut r, PT_DEPOSIT)?;
        let msg = Self {
            to: r.string()?,
            token_index: r.u32()?,
            amount: r.uint128()?,
            metadata: DepositMetadata::decode(&r.bytes()?)?,
        };
        r.finish()?;
        Ok(msg)
    }
}

/// Withdrawal instructions sent from the home ledger to the remote ledger.
#[cw_serde]
pub struct WithdrawMessage {
    /// Chain of the remote ledger (the relay hop)
    pub destination_chain_id: u16,
    /// Final chain for the liquidity-swap hop, 0 to stay on the remote chain
    pub second_hop_chain_id: u16,
    pub destination_pool_id: u64,
    pub to: String,
    pub token_index: u32,
    pub amount: Uint128,
    /// Minimum amount accepted on the final chain, enforced by the swap network
    pub amount_min: Uint128,
    pub refund_address: String,
    pub zro_payment_address: Option<String>,
    pub adapter_params: Binary,
}

impl WithdrawMessage {
    pub fn encode(&self) -> Binary {
        PayloadWriter::new()
            .u16(PT_WITHDRAW)
            .u16(self.destination_chain_id)
            .u16(self.second_hop_chain_id)
            .u64(self.destination_pool_id)
            .string(&self.to)
            .u32(self.token_index)
            .uint128(self.amount)
            .uint128(self.amount_min)
            .string(&self.refund_address)
            .string(self.zro_payment_address.as_deref().unwrap_or_default())
            .bytes(self.adapter_params.as_slice())
            .finish()
    }

    pub fn decode(data: &[u8]) -> StdResult<Self> {
        let mut r = PayloadReader::new(data);
        expect_packet_type(&mut r, PT_WITHDRAW)?;
        let msg = Self {
            destination_chain_id: r.u16()?,
            second_hop_chain_id: r.u16()?,
            destination_pool_id: r.u64()?,
            to: r.string()?,
            token_index: r.u32()?,
            amount: r.uint128()?,
            amount_min: r.uint128()?,
            refund_address: r.string()?,
            zro_payment_address: optional_address(Some(r.string()?)),
            adapter_params: Binary::from(r.bytes()?),
        };
        r.finish()?;
        Ok(msg)
    }
}

fn expect_packet_type(r: &mut PayloadReader, expected: u16) -> StdResult<()> {
    let got = r.u16()?;
    if got != expected {
        return Err(StdError::parse_err(
            "packet_type",
            format!("expected {}, got {}", expected, got),
        ));
    }
    Ok(())
}
