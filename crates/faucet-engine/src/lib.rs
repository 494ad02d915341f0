//! # faucet-engine
//!
//! **Distribution Engine**: decides, for every disbursement request, whether
//! it is permitted and how much to send, and keeps the shared counters.
//!
//! ## Architecture
//!
//! Four subsystems, leaf first:
//! 1. **RoleRegistry**: role membership and the admin table
//! 2. **CircuitBreaker**: global pause gate, starts paused
//! 3. **RequestThrottle**: per-account tier cooldowns and the calendar-day cap
//! 4. **Custody**: the held balance and outbound transfers
//!
//! [`Faucet`] wires them together.
//!
//! ## Request Flow
//!
//! ```text
//! CircuitBreaker.check_active() → RoleRegistry.check_role(SENDER)
//!     → RequestThrottle.evaluate() → Custody.transfer_out()
//!     → RequestThrottle.commit() → TokensSent
//! ```
//!
//! The host serializes calls and supplies the timestamp; the engine does no
//! locking of its own.

pub mod access_control;
pub mod circuit_breaker;
pub mod custody;
pub mod faucet;
pub mod throttle;

pub use access_control::RoleRegistry;
pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use custody::Custody;
pub use faucet::{Context, Faucet};
pub use throttle::{Approval, RequestThrottle};
