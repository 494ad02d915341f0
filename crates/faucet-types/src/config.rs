//! Distribution configuration.

use serde::{Deserialize, Serialize};

use crate::{FaucetError, Result, Tier, constants};

/// The four scalars that govern disbursement.
///
/// Amounts are in the asset's smallest unit. `initialize` stores whatever it
/// is given; the per-field setters on the engine reject zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetConfig {
    /// Amount sent per normal request.
    pub normal_amount: u128,
    /// Amount sent per Twitter request.
    pub twitter_amount: u128,
    /// Minimum seconds between two requests of the same tier by one account.
    pub cooldown_seconds: u64,
    /// Cap on the sum disbursed within one calendar day.
    pub daily_limit: u128,
}

impl FaucetConfig {
    #[must_use]
    pub fn new(
        normal_amount: u128,
        twitter_amount: u128,
        cooldown_seconds: u64,
        daily_limit: u128,
    ) -> Self {
        Self {
            normal_amount,
            twitter_amount,
            cooldown_seconds,
            daily_limit,
        }
    }

    /// Parse a config from JSON and reject zero fields.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| FaucetError::Configuration(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject any zero field, naming the first offender.
    pub fn validate(&self) -> Result<()> {
        if self.normal_amount == 0 {
            return Err(FaucetError::InvalidConfig {
                field: "normalAmount",
            });
        }
        if self.twitter_amount == 0 {
            return Err(FaucetError::InvalidConfig {
                field: "twitterAmount",
            });
        }
        if self.cooldown_seconds == 0 {
            return Err(FaucetError::InvalidConfig {
                field: "cooldownSeconds",
            });
        }
        if self.daily_limit == 0 {
            return Err(FaucetError::InvalidConfig {
                field: "dailyLimit",
            });
        }
        Ok(())
    }

    /// Amount disbursed for a request of the given tier.
    #[must_use]
    pub fn amount_for(&self, tier: Tier) -> u128 {
        match tier {
            Tier::Normal => self.normal_amount,
            Tier::Twitter => self.twitter_amount,
        }
    }
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            normal_amount: constants::DEFAULT_NORMAL_AMOUNT,
            twitter_amount: constants::DEFAULT_TWITTER_AMOUNT,
            cooldown_seconds: constants::DEFAULT_COOLDOWN_SECONDS,
            daily_limit: constants::DEFAULT_DAILY_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let cfg = FaucetConfig::default();
        assert_eq!(cfg.normal_amount, constants::ONE_TOKEN);
        assert_eq!(cfg.twitter_amount, 3 * constants::ONE_TOKEN);
        assert_eq!(cfg.cooldown_seconds, 240);
        assert_eq!(cfg.daily_limit, 8 * constants::ONE_TOKEN);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn amount_for_tier() {
        let cfg = FaucetConfig::new(1, 3, 240, 8);
        assert_eq!(cfg.amount_for(Tier::Normal), 1);
        assert_eq!(cfg.amount_for(Tier::Twitter), 3);
    }

    #[test]
    fn from_json_accepts_camel_case() {
        let json = r#"{"normalAmount":1,"twitterAmount":3,"cooldownSeconds":240,"dailyLimit":8}"#;
        let cfg = FaucetConfig::from_json(json).unwrap();
        assert_eq!(cfg, FaucetConfig::new(1, 3, 240, 8));
    }

    #[test]
    fn from_json_rejects_zero_field() {
        let json = r#"{"normalAmount":1,"twitterAmount":3,"cooldownSeconds":0,"dailyLimit":8}"#;
        let err = FaucetConfig::from_json(json).unwrap_err();
        assert_eq!(
            err,
            FaucetError::InvalidConfig {
                field: "cooldownSeconds"
            }
        );
    }

    #[test]
    fn from_json_rejects_missing_field() {
        let err = FaucetConfig::from_json(r#"{"normalAmount":1}"#).unwrap_err();
        assert!(matches!(err, FaucetError::Configuration(_)));
    }
}
