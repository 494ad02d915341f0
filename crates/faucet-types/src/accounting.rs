//! Calendar-day accounting and per-account request records.
//!
//! The stored `spent_today` is a cache valid only for `last_active_day`.
//! Both the mutating request path and the read-only metadata path go
//! through [`effective_spent`], so an observer always sees the value the
//! next request would compute, without anyone having to reset storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Tier, constants};

/// Calendar-day index of a unix timestamp (seconds).
#[must_use]
pub fn calendar_day(now: u64) -> u64 {
    now / constants::SECONDS_PER_DAY
}

/// UTC midnight that starts the given calendar day, if representable.
#[must_use]
pub fn calendar_day_start(day: u64) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(day.checked_mul(constants::SECONDS_PER_DAY)?).ok()?;
    DateTime::<Utc>::from_timestamp(secs, 0)
}

/// Spent-today as seen at `now`: the stored value on its own day, zero on
/// any later day.
#[must_use]
pub fn effective_spent(now: u64, last_active_day: u64, spent_today: u128) -> u128 {
    if calendar_day(now) == last_active_day {
        spent_today
    } else {
        0
    }
}

/// Aggregate disbursement for the most recently active calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyAccounting {
    /// Day index of the last successful disbursement (or explicit rollover).
    pub last_active_day: u64,
    /// Sum disbursed on `last_active_day`.
    pub spent_today: u128,
}

impl DailyAccounting {
    /// Effective spent-today at `now`. Never mutates.
    #[must_use]
    pub fn effective_spent(&self, now: u64) -> u128 {
        effective_spent(now, self.last_active_day, self.spent_today)
    }

    /// Whether the stored figures belong to a day before `now`'s.
    #[must_use]
    pub fn is_stale(&self, now: u64) -> bool {
        calendar_day(now) != self.last_active_day
    }
}

/// Last successful request time per tier for one account. Zero = never.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserRequestRecord {
    pub last_normal_request: u64,
    pub last_twitter_request: u64,
}

impl UserRequestRecord {
    #[must_use]
    pub fn last_request(&self, tier: Tier) -> u64 {
        match tier {
            Tier::Normal => self.last_normal_request,
            Tier::Twitter => self.last_twitter_request,
        }
    }

    pub fn set_last_request(&mut self, tier: Tier, now: u64) {
        match tier {
            Tier::Normal => self.last_normal_request = now,
            Tier::Twitter => self.last_twitter_request = now,
        }
    }
}

/// Read-only snapshot of the faucet's limits and accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetMetadata {
    pub daily_limit: u128,
    /// Spent today with the staleness rule applied.
    pub spent_today: u128,
    pub normal_amount: u128,
    pub twitter_amount: u128,
    pub cooldown_seconds: u64,
    pub balance: u128,
    pub paused: bool,
}
