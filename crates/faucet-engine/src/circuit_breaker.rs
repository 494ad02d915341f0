//! Global pause gate.
//!
//! Starts paused. While paused, disbursement is rejected; administration
//! (config setters, fund withdrawal, role management) stays available.

use std::fmt;

use faucet_types::{FaucetError, Result};
use serde::{Deserialize, Serialize};

/// The two states of the breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakerState {
    Active,
    Paused,
}

impl fmt::Display for BreakerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Paused => write!(f, "PAUSED"),
        }
    }
}

/// Reversible pause/unpause gate checked before any disbursement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreaker {
    state: BreakerState,
}

impl CircuitBreaker {
    /// Create a breaker in the `Paused` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: BreakerState::Paused,
        }
    }

    #[must_use]
    pub fn state(&self) -> BreakerState {
        self.state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state == BreakerState::Paused
    }

    /// `Active -> Paused`.
    ///
    /// # Errors
    /// [`FaucetError::AlreadyPaused`] if already paused.
    pub fn pause(&mut self) -> Result<()> {
        if self.is_paused() {
            return Err(FaucetError::AlreadyPaused);
        }
        self.state = BreakerState::Paused;
        Ok(())
    }

    /// `Paused -> Active`.
    ///
    /// # Errors
    /// [`FaucetError::NotPaused`] if already active.
    pub fn unpause(&mut self) -> Result<()> {
        if !self.is_paused() {
            return Err(FaucetError::NotPaused);
        }
        self.state = BreakerState::Active;
        Ok(())
    }

    /// Guard a disbursement attempt. Returns `Ok(())` if active,
    /// or [`FaucetError::ContractPaused`] if paused.
    pub fn check_active(&self) -> Result<()> {
        if self.is_paused() {
            Err(FaucetError::ContractPaused)
        } else {
            Ok(())
        }
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new()
    }
}
