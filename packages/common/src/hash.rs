//! Payload hashing for cross-chain correlation
//!
//! Events on both chains carry `keccak256(payload)` so an indexer can pair a
//! send on one ledger with the matching receive on the other.

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Convert bytes32 to a 0x-prefixed hex string
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// 0x-prefixed keccak256 of a payload, as emitted in events
pub fn payload_hash(payload: &[u8]) -> String {
    bytes32_to_hex(&keccak256(payload))
}
