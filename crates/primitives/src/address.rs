use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::{Error, PublicKey};

pub const ADDRESS_LENGTH: usize = 20;

/// Represents the lower 20 bytes of a Keccak-256 digest of an uncompressed
/// secp256k1 public key.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    pub fn new(public_key: PublicKey) -> Self {
        Self::from(public_key)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let raw: [u8; ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|_| Error::InvalidAddress(hex::encode(bytes)))?;

        Ok(Address(raw))
    }
}

impl From<PublicKey> for Address {
    fn from(item: PublicKey) -> Self {
        let mut hasher = Keccak256::new();
        let pk_bytes = item.serialize_uncompressed();
        hasher.update(&pk_bytes[1..]);
        let hash = hasher.finalize();

        let mut address_bytes = [0u8; ADDRESS_LENGTH];
        address_bytes.copy_from_slice(&hash[(hash.len() - ADDRESS_LENGTH)..]);
        Address(address_bytes)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s
            .strip_prefix("0x")
            .filter(|rest| rest.len() == ADDRESS_LENGTH * 2)
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;

        let bytes = hex::decode(hex_part).map_err(|_| Error::InvalidAddress(s.to_string()))?;

        Address::from_slice(&bytes)
    }
}
