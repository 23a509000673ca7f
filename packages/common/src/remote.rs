//! Trusted remote registration shared by both ledgers.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary};

/// Expected (source, destination) address pair for one remote chain.
///
/// A relayed message is accepted only if the relay reports `source_address`
/// as its origin and this contract is `destination_address`.
#[cw_serde]
pub struct TrustedRemote {
    pub source_address: Binary,
    pub destination_address: Binary,
}

impl TrustedRemote {
    pub fn new(source: &str, destination: &str) -> Self {
        Self {
            source_address: Binary::from(source.as_bytes()),
            destination_address: Binary::from(destination.as_bytes()),
        }
    }

    pub fn matches(&self, src_address: &[u8], local: &Addr) -> bool {
        self.source_address.as_slice() == src_address
            && self.destination_address.as_slice() == local.as_bytes()
    }

    /// Source address as a contract address string on the remote side
    pub fn source(&self) -> String {
        String::from_utf8_lossy(self.source_address.as_slice()).into_owned()
    }
}
