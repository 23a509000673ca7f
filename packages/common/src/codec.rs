//! Word-aligned payload codec
//!
//! Both ledgers exchange payloads through networks that only carry opaque
//! bytes, so the layout is fixed here and shared.
//!
//! # Layout
//! Static values follow Solidity `abi.encode`:
//! - integers and bools occupy one 32-byte word, big-endian, left-padded
//! - byte strings are a length word followed by the data, right-padded to
//!   a multiple of 32 bytes
//!
//! Fields are written in declaration order with no offsets table, so a
//! payload is read back by calling the reader in the same order.

use cosmwasm_std::{Binary, StdError, StdResult, Uint128};

/// Size of one encoded word
pub const WORD: usize = 32;

/// Appends fields to a payload buffer
#[derive(Debug, Default)]
pub struct PayloadWriter {
    buf: Vec<u8>,
}

impl PayloadWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn word(&mut self, tail: &[u8]) -> &mut Self {
        let mut word = [0u8; WORD];
        word[WORD - tail.len()..].copy_from_slice(tail);
        self.buf.extend_from_slice(&word);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.word(&value.to_be_bytes())
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.word(&value.to_be_bytes())
    }

    pub fn u64(&mut self, value: u64) -> &mut Self {
        self.word(&value.to_be_bytes())
    }

    pub fn uint128(&mut self, value: Uint128) -> &mut Self {
        self.word(&value.u128().to_be_bytes())
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.word(&[value as u8])
    }

    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.u64(data.len() as u64);
        self.buf.extend_from_slice(data);
        let rem = data.len() % WORD;
        if rem != 0 {
            self.buf.extend(std::iter::repeat(0u8).take(WORD - rem));
        }
        self
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.bytes(value.as_bytes())
    }

    pub fn finish(&mut self) -> Binary {
        Binary::from(std::mem::take(&mut self.buf))
    }
}

/// Reads fields back out of a payload in write order
#[derive(Debug)]
pub struct PayloadReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> PayloadReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> StdResult<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                StdError::parse_err(
                    "payload",
                    format!(
                        "truncated: need {} bytes at offset {}, have {}",
                        len,
                        self.offset,
                        self.data.len()
                    ),
                )
            })?;
        let out = &self.data[self.offset..end];
        self.offset = end;
        Ok(out)
    }

    /// Reads one word and returns its low `width` bytes, rejecting any
    /// non-zero high byte.
    fn word(&mut self, width: usize, target: &str) -> StdResult<&'a [u8]> {
        let word = self.take(WORD)?;
        let (high, low) = word.split_at(WORD - width);
        if high.iter().any(|b| *b != 0) {
            return Err(StdError::parse_err(target, "value out of range"));
        }
        Ok(low)
    }

    pub fn u16(&mut self) -> StdResult<u16> {
        let low = self.word(2, "u16")?;
        Ok(u16::from_be_bytes([low[0], low[1]]))
    }

    pub fn u32(&mut self) -> StdResult<u32> {
        let low = self.word(4, "u32")?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(low);
        Ok(u32::from_be_bytes(buf))
    }

    pub fn u64(&mut self) -> StdResult<u64> {
        let low = self.word(8, "u64")?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(low);
        Ok(u64::from_be_bytes(buf))
    }

    pub fn uint128(&mut self) -> StdResult<Uint128> {
        let low = self.word(16, "Uint128")?;
        let mut buf = [0u8; 16];
        buf.copy_from_slice(low);
        Ok(Uint128::new(u128::from_be_bytes(buf)))
    }

    pub fn bool(&mut self) -> StdResult<bool> {
        match self.word(1, "bool")?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(StdError::parse_err(
                "bool",
                format!("invalid boolean word {}", other),
            )),
        }
    }

    pub fn bytes(&mut self) -> StdResult<Vec<u8>> {
        let len = usize::try_from(self.u64()?)
            .map_err(|_| StdError::parse_err("bytes", "length does not fit usize"))?;
        let padded = len
            .checked_add(WORD - 1)
            .map(|n| n / WORD * WORD)
            .ok_or_else(|| StdError::parse_err("bytes", "length overflow"))?;
        let chunk = self.take(padded)?;
        let (data, padding) = chunk.split_at(len);
        if padding.iter().any(|b| *b != 0) {
            return Err(StdError::parse_err("bytes", "non-zero padding"));
        }
        Ok(data.to_vec())
    }

    pub fn string(&mut self) -> StdResult<String> {
        String::from_utf8(self.bytes()?)
            .map_err(|e| StdError::parse_err("string", e.to_string()))
    }

    /// Fails if any bytes are left unread.
    pub fn finish(self) -> StdResult<()> {
        if self.offset != self.data.len() {
            return Err(StdError::parse_err(
                "payload",
                format!("{} trailing bytes", self.data.len() - self.offset),
            ));
        }
        Ok(())
    }
}
