//! Cryptographic hash functions

use sha2::{Digest, Sha256};

/// SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Lowercase hex encoding of the SHA-256 hash of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
