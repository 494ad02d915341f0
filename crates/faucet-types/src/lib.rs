//! # faucet-types
//!
//! Shared types, errors, and configuration for the **faucet distribution
//! engine**.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`Address`], [`RoleId`]
//! - **Tiers**: [`Tier`]
//! - **Accounting**: [`DailyAccounting`], [`UserRequestRecord`], [`FaucetMetadata`],
//!   and the shared [`effective_spent`] rule
//! - **Events**: [`FaucetEvent`], [`TokensSent`], [`Transfer`]
//! - **Configuration**: [`FaucetConfig`]
//! - **Errors**: [`FaucetError`] with `FC_ERR_` prefix codes
//! - **Constants**: day length, role names, defaults

pub mod accounting;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod tier;

// Re-export all primary types at crate root for ergonomic imports:
//   use faucet_types::{Address, Tier, FaucetError, ...};

pub use accounting::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use tier::*;

// Constants are accessed via `faucet_types::constants::FOO`
// (not re-exported to avoid name collisions).
