//! Request throttle: per-account tier cooldowns and the calendar-day cap.
//!
//! A request is evaluated in two steps:
//!
//! 1. [`RequestThrottle::evaluate`] runs every check against current state
//!    and produces an [`Approval`] without touching anything.
//! 2. [`RequestThrottle::commit`] applies an approval once the transfer has
//!    gone through.
//!
//! Anything that fails between the two leaves the throttle unchanged.
//! Cooldowns are measured in absolute seconds; only the daily cap follows
//! the calendar day.

use std::collections::BTreeMap;

use faucet_types::{
    Address, DailyAccounting, FaucetConfig, FaucetError, Result, Tier, UserRequestRecord,
    calendar_day, calendar_day_start,
};
use serde::{Deserialize, Serialize};

/// Outcome of a successful evaluation, consumed by [`RequestThrottle::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Approval {
    pub account: Address,
    pub tier: Tier,
    pub amount: u128,
    /// Request time.
    pub now: u64,
    /// Calendar day of `now`.
    pub today: u64,
    /// Spent-today after this request is applied.
    pub spent_after: u128,
}

/// Cooldown and daily-cap state plus the configuration that drives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestThrottle {
    config: FaucetConfig,
    accounting: DailyAccounting,
    records: BTreeMap<Address, UserRequestRecord>,
}

impl RequestThrottle {
    /// Create a throttle with no history.
    #[must_use]
    pub fn new(config: FaucetConfig) -> Self {
        Self {
            config,
            accounting: DailyAccounting::default(),
            records: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &FaucetConfig {
        &self.config
    }

    /// Raw stored accounting, no staleness masking.
    #[must_use]
    pub fn accounting(&self) -> DailyAccounting {
        self.accounting
    }

    /// Spent-today as the next request would see it at `now`.
    #[must_use]
    pub fn effective_spent(&self, now: u64) -> u128 {
        self.accounting.effective_spent(now)
    }

    /// Raw last request time for `account` on `tier` (0 = never).
    #[must_use]
    pub fn last_request(&self, account: Address, tier: Tier) -> u64 {
        self.records
            .get(&account)
            .map_or(0, |rec| rec.last_request(tier))
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    pub fn set_normal_amount(&mut self, amount: u128) -> Result<()> {
        self.config.normal_amount = nonzero(amount, "normalAmount")?;
        Ok(())
    }

    pub fn set_twitter_amount(&mut self, amount: u128) -> Result<()> {
        self.config.twitter_amount = nonzero(amount, "twitterAmount")?;
        Ok(())
    }

    pub fn set_cooldown_seconds(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(FaucetError::InvalidConfig {
                field: "cooldownSeconds",
            });
        }
        self.config.cooldown_seconds = seconds;
        Ok(())
    }

    pub fn set_daily_limit(&mut self, limit: u128) -> Result<()> {
        self.config.daily_limit = nonzero(limit, "dailyLimit")?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Evaluation
    // ---------------------------------------------------------------------

    /// Run the address, cooldown and daily-cap checks for a request at `now`.
    ///
    /// # Errors
    /// - `InvalidAddress` if `account` is the null address
    /// - `AlreadyRequested` / `HasTweeted` if the tier's cooldown is running
    /// - `DailyLimitReached` if the cap would be exceeded
    pub fn evaluate(&self, account: Address, tier: Tier, now: u64) -> Result<Approval> {
        // 1. Null target
        if account.is_zero() {
            return Err(FaucetError::InvalidAddress);
        }

        // 2. Day rollover is computed, not persisted.
        let today = calendar_day(now);
        let spent = self.accounting.effective_spent(now);

        // 3. Tier selection
        let last = self.last_request(account, tier);
        let amount = self.config.amount_for(tier);

        // 4. Cooldown
        let cooldown = self.config.cooldown_seconds;
        if last != 0 && now.saturating_sub(last) < cooldown {
            let available_at = last.saturating_add(cooldown);
            tracing::debug!(%account, %tier, last, available_at, "request still in cooldown");
            return Err(match tier {
                Tier::Normal => FaucetError::AlreadyRequested { available_at },
                Tier::Twitter => FaucetError::HasTweeted { available_at },
            });
        }

        // 5. Daily cap
        let limit = self.config.daily_limit;
        let spent_after = match spent.checked_add(amount) {
            Some(total) if total <= limit => total,
            _ => {
                tracing::debug!(%account, %tier, spent, amount, limit, "daily limit reached");
                return Err(FaucetError::DailyLimitReached {
                    spent,
                    amount,
                    limit,
                });
            }
        };

        Ok(Approval {
            account,
            tier,
            amount,
            now,
            today,
            spent_after,
        })
    }

    /// Apply an approval: stamp the tier's clock and advance the day ledger.
    pub fn commit(&mut self, approval: &Approval) {
        if approval.today != self.accounting.last_active_day {
            tracing::debug!(
                from_day = self.accounting.last_active_day,
                to_day = approval.today,
                day_start = ?calendar_day_start(approval.today),
                stale_spent = self.accounting.spent_today,
                "daily accounting rolled over"
            );
        }
        self.records
            .entry(approval.account)
            .or_default()
            .set_last_request(approval.tier, approval.now);
        self.accounting = DailyAccounting {
            last_active_day: approval.today,
            spent_today: approval.spent_after,
        };
    }

    /// Persist the day rollover at `now` if the stored day is stale.
    ///
    /// Returns `true` if the ledger was reset. Requests never depend on this.
    pub fn roll_over(&mut self, now: u64) -> bool {
        if !self.accounting.is_stale(now) {
            return false;
        }
        self.accounting = DailyAccounting {
            last_active_day: calendar_day(now),
            spent_today: 0,
        };
        true
    }
}

fn nonzero(value: u128, field: &'static str) -> Result<u128> {
    if value == 0 {
        Err(FaucetError::InvalidConfig { field })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use faucet_types::constants::SECONDS_PER_DAY;

    use super::*;

    const T0: u64 = 1_700_000_000;

    fn throttle() -> RequestThrottle {
        RequestThrottle::new(FaucetConfig::new(1, 3, 240, 8))
    }

    fn request(th: &mut RequestThrottle, account: Address, tier: Tier, now: u64) -> Result<Approval> {
        let approval = th.evaluate(account, tier, now)?;
        th.commit(&approval);
        Ok(approval)
    }

    #[test]
    fn zero_address_rejected() {
        let th = throttle();
        let err = th.evaluate(Address::ZERO, Tier::Normal, T0).unwrap_err();
        assert_eq!(err, FaucetError::InvalidAddress);
    }

    #[test]
    fn evaluate_does_not_mutate() {
        let th = throttle();
        let user = Address::random();
        let approval = th.evaluate(user, Tier::Twitter, T0).unwrap();
        assert_eq!(approval.amount, 3);
        assert_eq!(approval.spent_after, 3);
        assert_eq!(th.last_request(user, Tier::Twitter), 0);
        assert_eq!(th.accounting(), DailyAccounting::default());
    }

    #[test]
    fn cooldown_per_tier() {
        let mut th = throttle();
        let user = Address::random();
        request(&mut th, user, Tier::Normal, T0).unwrap();

        let err = th.evaluate(user, Tier::Normal, T0 + 239).unwrap_err();
        assert_eq!(
            err,
            FaucetError::AlreadyRequested {
                available_at: T0 + 240
            }
        );
        // The other tier has its own clock.
        request(&mut th, user, Tier::Twitter, T0 + 1).unwrap();
        let err = th.evaluate(user, Tier::Twitter, T0 + 2).unwrap_err();
        assert!(matches!(err, FaucetError::HasTweeted { .. }));

        assert!(th.evaluate(user, Tier::Normal, T0 + 240).is_ok());
    }

    #[test]
    fn cooldown_is_per_account() {
        let mut th = throttle();
        request(&mut th, Address::random(), Tier::Normal, T0).unwrap();
        assert!(th.evaluate(Address::random(), Tier::Normal, T0).is_ok());
    }

    #[test]
    fn daily_cap_blocks_and_leaves_state() {
        let mut th = throttle();
        let user = Address::random();
        request(&mut th, user, Tier::Normal, T0).unwrap();
        request(&mut th, user, Tier::Twitter, T0).unwrap();
        request(&mut th, user, Tier::Normal, T0 + 240).unwrap();
        request(&mut th, user, Tier::Twitter, T0 + 240).unwrap();
        assert_eq!(th.accounting().spent_today, 8);

        let before = th.accounting();
        let err = th.evaluate(Address::random(), Tier::Normal, T0 + 300).unwrap_err();
        assert_eq!(
            err,
            FaucetError::DailyLimitReached {
                spent: 8,
                amount: 1,
                limit: 8
            }
        );
        assert_eq!(th.accounting(), before);
    }

    #[test]
    fn new_day_starts_from_zero() {
        let mut th = throttle();
        let user = Address::random();
        request(&mut th, user, Tier::Twitter, T0).unwrap();
        request(&mut th, Address::random(), Tier::Twitter, T0).unwrap();
        assert!(th.evaluate(Address::random(), Tier::Twitter, T0).is_err());

        let tomorrow = T0 + SECONDS_PER_DAY;
        assert_eq!(th.effective_spent(tomorrow), 0);
        assert_eq!(th.accounting().spent_today, 6);

        let approval = request(&mut th, Address::random(), Tier::Normal, tomorrow).unwrap();
        assert_eq!(approval.spent_after, 1);
        assert_eq!(th.accounting().last_active_day, calendar_day(tomorrow));
        assert_eq!(th.accounting().spent_today, 1);
    }

    #[test]
    fn overflowing_sum_counts_as_over_limit() {
        let mut th = RequestThrottle::new(FaucetConfig::new(u128::MAX, 1, 1, u128::MAX));
        request(&mut th, Address::random(), Tier::Twitter, T0).unwrap();
        let err = th.evaluate(Address::random(), Tier::Normal, T0).unwrap_err();
        assert!(matches!(err, FaucetError::DailyLimitReached { .. }));
    }

    #[test]
    fn setters_reject_zero() {
        let mut th = throttle();
        assert_eq!(
            th.set_normal_amount(0).unwrap_err(),
            FaucetError::InvalidConfig {
                field: "normalAmount"
            }
        );
        assert!(th.set_twitter_amount(0).is_err());
        assert!(th.set_cooldown_seconds(0).is_err());
        assert!(th.set_daily_limit(0).is_err());
        assert_eq!(*th.config(), FaucetConfig::new(1, 3, 240, 8));

        th.set_normal_amount(2).unwrap();
        th.set_twitter_amount(4).unwrap();
        th.set_cooldown_seconds(300).unwrap();
        th.set_daily_limit(10).unwrap();
        assert_eq!(*th.config(), FaucetConfig::new(2, 4, 300, 10));
    }

    #[test]
    fn explicit_roll_over() {
        let mut th = throttle();
        request(&mut th, Address::random(), Tier::Normal, T0).unwrap();
        assert!(!th.roll_over(T0 + 10));
        assert_eq!(th.accounting().spent_today, 1);

        assert!(th.roll_over(T0 + SECONDS_PER_DAY));
        assert_eq!(th.accounting().spent_today, 0);
        assert_eq!(
            th.accounting().last_active_day,
            calendar_day(T0 + SECONDS_PER_DAY)
        );
    }
}
