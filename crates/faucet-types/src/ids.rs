//! Identifiers used throughout the faucet engine.
//!
//! Both identifiers serialize as `0x`-prefixed lowercase hex strings so they
//! can be used directly as JSON map keys in state snapshots.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use sha2::{Digest, Sha256};

use crate::{FaucetError, constants};

fn decode_hex<const N: usize>(s: &str) -> Result<[u8; N], String> {
    let raw = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(raw).map_err(|e| e.to_string())?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| format!("expected {N} bytes, got {}", v.len()))
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The null address. Never a valid disbursement target.
    pub const ZERO: Self = Self([0u8; 20]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Random address for tests.
    #[cfg(feature = "test-helpers")]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = FaucetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex::<20>(s)
            .map(Self)
            .map_err(|reason| FaucetError::Serialization(format!("invalid address {s:?}: {reason}")))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_hex::<20>(&s).map(Self).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// RoleId
// ---------------------------------------------------------------------------

/// Opaque fixed-width role identifier: SHA-256 of the role's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct RoleId(pub [u8; 32]);

impl RoleId {
    /// Derive a role identifier from its human-readable name.
    ///
    /// Deterministic: every engine derives the same id for the same name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(constants::ROLE_ID_DOMAIN);
        hasher.update(name.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    /// The self-administering owner role.
    #[must_use]
    pub fn owner() -> Self {
        Self::from_name(constants::OWNER_ROLE_NAME)
    }

    /// The role allowed to trigger disbursements.
    #[must_use]
    pub fn sender() -> Self {
        Self::from_name(constants::SENDER_ROLE_NAME)
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for RoleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_hex::<32>(&s).map(Self).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
