//! Events emitted by the engine and transfer instructions handed to the host.

use serde::{Deserialize, Serialize};

use crate::{Address, RoleId, Tier};

/// Emitted on every successful disbursement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensSent {
    pub recipient: Address,
    pub amount: u128,
    pub tier: Tier,
}

/// An outbound movement of custodied funds.
///
/// The engine debits its own balance; the host settles the same amount on
/// the real asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub to: Address,
    pub amount: u128,
}

/// Every observable state change, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaucetEvent {
    TokensSent(TokensSent),
    RoleGranted {
        role: RoleId,
        account: Address,
        sender: Address,
    },
    RoleRevoked {
        role: RoleId,
        account: Address,
        sender: Address,
    },
    Paused {
        account: Address,
    },
    Unpaused {
        account: Address,
    },
    ConfigUpdated {
        field: String,
        value: u128,
    },
    FundsReceived {
        amount: u128,
    },
    FundsWithdrawn(Transfer),
}
