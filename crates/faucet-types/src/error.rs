//! Error types for the faucet distribution engine.
//!
//! All errors use the `FC_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Access control errors
//! - 2xx: Configuration / lifecycle errors
//! - 3xx: Circuit breaker errors
//! - 4xx: Request errors
//! - 5xx: Custody errors
//! - 9xx: General / internal errors
//!
//! Every error is a rejection of the triggering call. The engine never
//! leaves partial state behind when it returns one of these.

use thiserror::Error;

use crate::{Address, RoleId};

/// Central error enum for all faucet operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FaucetError {
    // =================================================================
    // Access Control Errors (1xx)
    // =================================================================
    /// The caller lacks a required role.
    #[error("FC_ERR_100: Account {account} is missing role {role}")]
    Unauthorized { account: Address, role: RoleId },

    // =================================================================
    // Configuration Errors (2xx)
    // =================================================================
    /// A setter received a zero value.
    #[error("FC_ERR_200: Invalid config: {field} can not be 0")]
    InvalidConfig { field: &'static str },

    /// `initialize` was called on an engine that is already initialized.
    #[error("FC_ERR_201: Engine is already initialized")]
    AlreadyInitialized,

    /// Configuration could not be loaded (bad JSON, missing fields, etc.).
    #[error("FC_ERR_202: Configuration error: {0}")]
    Configuration(String),

    // =================================================================
    // Circuit Breaker Errors (3xx)
    // =================================================================
    /// Disbursement attempted while the circuit breaker is tripped.
    #[error("FC_ERR_300: Contract paused")]
    ContractPaused,

    /// `pause` called while already paused.
    #[error("FC_ERR_301: Already paused")]
    AlreadyPaused,

    /// `unpause` called while not paused.
    #[error("FC_ERR_302: Not paused")]
    NotPaused,

    // =================================================================
    // Request Errors (4xx)
    // =================================================================
    /// The target account is the null address.
    #[error("FC_ERR_400: Invalid address")]
    InvalidAddress,

    /// Unknown tier wire value.
    #[error("FC_ERR_401: Invalid request type: {0}")]
    InvalidRequestType(u8),

    /// Normal-tier cooldown has not elapsed for this account.
    #[error("FC_ERR_402: Already requested: cooldown ends at {available_at}")]
    AlreadyRequested { available_at: u64 },

    /// Twitter-tier cooldown has not elapsed for this account.
    #[error("FC_ERR_403: Has tweeted: cooldown ends at {available_at}")]
    HasTweeted { available_at: u64 },

    /// The request would push today's disbursements past the daily cap.
    #[error("FC_ERR_404: Daily limit reached: spent {spent} + {amount} > limit {limit}")]
    DailyLimitReached { spent: u128, amount: u128, limit: u128 },

    // =================================================================
    // Custody Errors (5xx)
    // =================================================================
    /// Custody balance cannot cover the transfer.
    #[error("FC_ERR_500: Out of funds: need {needed}, have {available}")]
    OutOfFunds { needed: u128, available: u128 },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("FC_ERR_900: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, FaucetError>;

impl From<serde_json::Error> for FaucetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
