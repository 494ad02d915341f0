//! Disbursement tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FaucetError;

/// One of the two fixed disbursement categories.
///
/// Each tier has its own amount and its own cooldown clock per account.
/// The discriminants are the wire values accepted by [`Tier::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tier {
    Normal = 0,
    Twitter = 1,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Twitter => write!(f, "TWITTER"),
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = FaucetError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Twitter),
            other => Err(FaucetError::InvalidRequestType(other)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier as u8
    }
}
