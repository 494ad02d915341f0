//! Fund custody for the distribution engine.
//!
//! Holds the engine's balance of the native asset as an owned value. The
//! balance check and the debit happen under the same `&mut` borrow, so a
//! transfer is either fully applied or the balance is unchanged.

use faucet_types::{Address, FaucetError, Result, Transfer};
use serde::{Deserialize, Serialize};

/// The asset balance the engine controls.
///
/// Outbound movements are returned as [`Transfer`] records for the host to
/// settle against the real asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Custody {
    balance: u128,
}

impl Custody {
    /// Create an empty custody account.
    #[must_use]
    pub fn new() -> Self {
        Self { balance: 0 }
    }

    /// Current balance.
    #[must_use]
    pub fn balance(&self) -> u128 {
        self.balance
    }

    /// Accept inbound funds. No gating of any kind.
    pub fn receive(&mut self, amount: u128) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Check that the balance covers `amount` without moving anything.
    ///
    /// # Errors
    /// Returns `OutOfFunds` if balance < amount.
    pub fn ensure_covers(&self, amount: u128) -> Result<()> {
        if self.balance < amount {
            tracing::warn!(needed = amount, available = self.balance, "custody shortfall");
            return Err(FaucetError::OutOfFunds {
                needed: amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    /// Debit `amount` and return the transfer to `to`.
    ///
    /// # Errors
    /// Returns `OutOfFunds` if balance < amount; the balance is unchanged.
    pub fn transfer_out(&mut self, to: Address, amount: u128) -> Result<Transfer> {
        self.ensure_covers(amount)?;
        self.balance -= amount;
        Ok(Transfer { to, amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receive_increases_balance() {
        let mut custody = Custody::new();
        custody.receive(1000);
        custody.receive(5);
        assert_eq!(custody.balance(), 1005);
    }

    #[test]
    fn transfer_out_debits() {
        let mut custody = Custody::new();
        custody.receive(1000);
        let to = Address::random();
        let transfer = custody.transfer_out(to, 400).unwrap();
        assert_eq!(transfer, Transfer { to, amount: 400 });
        assert_eq!(custody.balance(), 600);
    }

    #[test]
    fn transfer_out_insufficient_fails() {
        let mut custody = Custody::new();
        custody.receive(100);
        let err = custody.transfer_out(Address::random(), 200).unwrap_err();
        assert_eq!(
            err,
            FaucetError::OutOfFunds {
                needed: 200,
                available: 100
            }
        );
        // Balance unchanged
        assert_eq!(custody.balance(), 100);
    }

    #[test]
    fn exact_balance_can_be_sent() {
        let mut custody = Custody::new();
        custody.receive(3);
        custody.transfer_out(Address::random(), 3).unwrap();
        assert_eq!(custody.balance(), 0);
        assert!(custody.ensure_covers(1).is_err());
        assert!(custody.ensure_covers(0).is_ok());
    }
}
