//! The distribution engine: wires the four subsystems behind one API.
//!
//! Every mutating call takes a [`Context`] carrying the caller and the
//! timestamp supplied by the host. Calls are atomic: all checks run before
//! the first write, so a rejected call leaves the engine exactly as it was.

use faucet_types::{
    Address, DailyAccounting, FaucetConfig, FaucetError, FaucetEvent, FaucetMetadata, Result,
    RoleId, Tier, TokensSent, Transfer,
};
use serde::{Deserialize, Serialize};

use crate::access_control::RoleRegistry;
use crate::circuit_breaker::CircuitBreaker;
use crate::custody::Custody;
use crate::throttle::RequestThrottle;

/// Who is calling, and when. Supplied by the host for every mutating call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub caller: Address,
    /// Unix timestamp in seconds.
    pub now: u64,
}

impl Context {
    #[must_use]
    pub fn new(caller: Address, now: u64) -> Self {
        Self { caller, now }
    }
}

/// The faucet distribution engine.
///
/// Serializable as a whole so a migration mechanism can snapshot and
/// restore it; the pending event log is not part of the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faucet {
    initialized: bool,
    roles: RoleRegistry,
    breaker: CircuitBreaker,
    throttle: RequestThrottle,
    custody: Custody,
    #[serde(skip)]
    events: Vec<FaucetEvent>,
}

impl Faucet {
    /// An uninitialized engine: no roles, paused, zero configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initialized: false,
            roles: RoleRegistry::new(),
            breaker: CircuitBreaker::new(),
            throttle: RequestThrottle::new(FaucetConfig::new(0, 0, 0, 0)),
            custody: Custody::new(),
            events: Vec::new(),
        }
    }

    /// Build and initialize in one step.
    pub fn with_config(owner: Address, config: FaucetConfig) -> Result<Self> {
        let mut faucet = Self::new();
        faucet.initialize(
            owner,
            config.normal_amount,
            config.twitter_amount,
            config.cooldown_seconds,
            config.daily_limit,
        )?;
        Ok(faucet)
    }

    /// One-time setup. Grants the owner role, wires the admin table, leaves
    /// the engine paused. Configuration is stored as given, without zero checks.
    ///
    /// # Errors
    /// [`FaucetError::AlreadyInitialized`] on any call after the first.
    pub fn initialize(
        &mut self,
        owner: Address,
        normal_amount: u128,
        twitter_amount: u128,
        cooldown_seconds: u64,
        daily_limit: u128,
    ) -> Result<()> {
        if self.initialized {
            return Err(FaucetError::AlreadyInitialized);
        }
        self.initialized = true;

        self.roles.set_role_admin(RoleId::owner(), RoleId::owner());
        self.roles.set_role_admin(RoleId::sender(), RoleId::owner());
        self.roles.insert_member(RoleId::owner(), owner);
        self.events.push(FaucetEvent::RoleGranted {
            role: RoleId::owner(),
            account: owner,
            sender: owner,
        });

        self.breaker = CircuitBreaker::new();
        self.throttle = RequestThrottle::new(FaucetConfig::new(
            normal_amount,
            twitter_amount,
            cooldown_seconds,
            daily_limit,
        ));

        tracing::info!(
            %owner,
            normal_amount,
            twitter_amount,
            cooldown_seconds,
            daily_limit,
            "faucet initialized"
        );
        Ok(())
    }

    // =====================================================================
    // Disbursement
    // =====================================================================

    /// Send the tier's fixed amount to `account`.
    ///
    /// Check order: paused, sender role, null address, cooldown, daily cap,
    /// custody balance.
    pub fn request_tokens(&mut self, ctx: Context, account: Address, tier: Tier) -> Result<TokensSent> {
        self.breaker.check_active()?;
        self.roles.check_role(RoleId::sender(), ctx.caller)?;

        let approval = self.throttle.evaluate(account, tier, ctx.now)?;
        let transfer = self.custody.transfer_out(account, approval.amount)?;
        self.throttle.commit(&approval);

        let sent = TokensSent {
            recipient: transfer.to,
            amount: transfer.amount,
            tier,
        };
        self.events.push(FaucetEvent::TokensSent(sent));
        tracing::info!(
            %account,
            amount = transfer.amount,
            %tier,
            spent_today = approval.spent_after,
            "tokens sent"
        );
        Ok(sent)
    }

    // =====================================================================
    // Configuration (owner only, not gated by pause)
    // =====================================================================

    pub fn set_normal_request_tokens(&mut self, ctx: Context, amount: u128) -> Result<()> {
        self.roles.check_role(RoleId::owner(), ctx.caller)?;
        self.throttle.set_normal_amount(amount)?;
        self.config_updated("normalAmount", amount);
        Ok(())
    }

    pub fn set_twitter_request_tokens(&mut self, ctx: Context, amount: u128) -> Result<()> {
        self.roles.check_role(RoleId::owner(), ctx.caller)?;
        self.throttle.set_twitter_amount(amount)?;
        self.config_updated("twitterAmount", amount);
        Ok(())
    }

    pub fn set_cooldown_period(&mut self, ctx: Context, seconds: u64) -> Result<()> {
        self.roles.check_role(RoleId::owner(), ctx.caller)?;
        self.throttle.set_cooldown_seconds(seconds)?;
        self.config_updated("cooldownSeconds", u128::from(seconds));
        Ok(())
    }

    pub fn set_daily_limit(&mut self, ctx: Context, limit: u128) -> Result<()> {
        self.roles.check_role(RoleId::owner(), ctx.caller)?;
        self.throttle.set_daily_limit(limit)?;
        self.config_updated("dailyLimit", limit);
        Ok(())
    }

    fn config_updated(&mut self, field: &str, value: u128) {
        tracing::info!(field, value, "config updated");
        self.events.push(FaucetEvent::ConfigUpdated {
            field: field.to_string(),
            value,
        });
    }

    /// Persist a stale day's rollover now instead of on the next request.
    ///
    /// Returns `true` if the ledger was reset.
    pub fn roll_over_day(&mut self, ctx: Context) -> Result<bool> {
        self.roles.check_role(RoleId::owner(), ctx.caller)?;
        Ok(self.throttle.roll_over(ctx.now))
    }

    // =====================================================================
    // Custody
    // =====================================================================

    /// Inbound funding. Accepted at any time from anyone, including while paused.
    pub fn receive(&mut self, amount: u128) {
        self.custody.receive(amount);
        self.events.push(FaucetEvent::FundsReceived { amount });
    }

    /// Send the whole balance to `to`. Owner only; no cooldown or cap applies.
    pub fn transfer_all_funds(&mut self, ctx: Context, to: Address) -> Result<Transfer> {
        self.roles.check_role(RoleId::owner(), ctx.caller)?;
        if to.is_zero() {
            return Err(FaucetError::InvalidAddress);
        }
        let transfer = self.custody.transfer_out(to, self.custody.balance())?;
        self.events.push(FaucetEvent::FundsWithdrawn(transfer));
        tracing::info!(%to, amount = transfer.amount, "all funds transferred");
        Ok(transfer)
    }

    // =====================================================================
    // Access control
    // =====================================================================

    pub fn grant_role(&mut self, ctx: Context, role: RoleId, account: Address) -> Result<()> {
        if self.roles.grant_role(ctx.caller, role, account)? {
            self.events.push(FaucetEvent::RoleGranted {
                role,
                account,
                sender: ctx.caller,
            });
        }
        Ok(())
    }

    pub fn revoke_role(&mut self, ctx: Context, role: RoleId, account: Address) -> Result<()> {
        if self.roles.revoke_role(ctx.caller, role, account)? {
            self.events.push(FaucetEvent::RoleRevoked {
                role,
                account,
                sender: ctx.caller,
            });
        }
        Ok(())
    }

    pub fn renounce_role(&mut self, ctx: Context, role: RoleId, account: Address) -> Result<()> {
        if self.roles.renounce_role(ctx.caller, role, account)? {
            self.events.push(FaucetEvent::RoleRevoked {
                role,
                account,
                sender: ctx.caller,
            });
        }
        Ok(())
    }

    // =====================================================================
    // Circuit breaker
    // =====================================================================

    pub fn pause(&mut self, ctx: Context) -> Result<()> {
        self.roles.check_role(RoleId::owner(), ctx.caller)?;
        self.breaker.pause()?;
        self.events.push(FaucetEvent::Paused {
            account: ctx.caller,
        });
        tracing::info!(account = %ctx.caller, "faucet paused");
        Ok(())
    }

    pub fn unpause(&mut self, ctx: Context) -> Result<()> {
        self.roles.check_role(RoleId::owner(), ctx.caller)?;
        self.breaker.unpause()?;
        self.events.push(FaucetEvent::Unpaused {
            account: ctx.caller,
        });
        tracing::info!(account = %ctx.caller, "faucet unpaused");
        Ok(())
    }

    // =====================================================================
    // Reads
    // =====================================================================

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn paused(&self) -> bool {
        self.breaker.is_paused()
    }

    #[must_use]
    pub fn faucet_balance(&self) -> u128 {
        self.custody.balance()
    }

    /// Raw last normal-request time for `account` (0 = never).
    #[must_use]
    pub fn last_request_timestamp(&self, account: Address) -> u64 {
        self.throttle.last_request(account, Tier::Normal)
    }

    /// Raw last Twitter-request time for `account` (0 = never).
    #[must_use]
    pub fn last_request_twitter_timestamp(&self, account: Address) -> u64 {
        self.throttle.last_request(account, Tier::Twitter)
    }

    /// Limits and accounting as seen at `now`, with the stale-day rule applied.
    #[must_use]
    pub fn faucet_metadata(&self, now: u64) -> FaucetMetadata {
        let config = self.throttle.config();
        FaucetMetadata {
            daily_limit: config.daily_limit,
            spent_today: self.throttle.effective_spent(now),
            normal_amount: config.normal_amount,
            twitter_amount: config.twitter_amount,
            cooldown_seconds: config.cooldown_seconds,
            balance: self.custody.balance(),
            paused: self.breaker.is_paused(),
        }
    }

    #[must_use]
    pub fn config(&self) -> FaucetConfig {
        *self.throttle.config()
    }

    #[must_use]
    pub fn normal_request_tokens(&self) -> u128 {
        self.throttle.config().normal_amount
    }

    #[must_use]
    pub fn twitter_request_tokens(&self) -> u128 {
        self.throttle.config().twitter_amount
    }

    #[must_use]
    pub fn cooldown_period(&self) -> u64 {
        self.throttle.config().cooldown_seconds
    }

    #[must_use]
    pub fn daily_limit(&self) -> u128 {
        self.throttle.config().daily_limit
    }

    /// Raw stored spent-today; may belong to an earlier day.
    #[must_use]
    pub fn today_spent(&self) -> u128 {
        self.throttle.accounting().spent_today
    }

    #[must_use]
    pub fn last_active_day(&self) -> u64 {
        self.throttle.accounting().last_active_day
    }

    #[must_use]
    pub fn daily_accounting(&self) -> DailyAccounting {
        self.throttle.accounting()
    }

    #[must_use]
    pub fn has_role(&self, role: RoleId, account: Address) -> bool {
        self.roles.has_role(role, account)
    }

    #[must_use]
    pub fn role_admin(&self, role: RoleId) -> RoleId {
        self.roles.role_admin(role)
    }

    #[must_use]
    pub fn role_members(&self, role: RoleId) -> Vec<Address> {
        self.roles.members(role)
    }

    // =====================================================================
    // Events & snapshots
    // =====================================================================

    /// Events not yet drained, oldest first.
    #[must_use]
    pub fn events(&self) -> &[FaucetEvent] {
        &self.events
    }

    /// Hand the pending events to the host and clear the log.
    pub fn drain_events(&mut self) -> Vec<FaucetEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serialize the engine state (without pending events).
    pub fn snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore an engine from [`Faucet::snapshot`] output.
    pub fn restore(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Faucet {
    fn default() -> Self {
        Self::new()
    }
}
