use crate::core::error::{LedgerError, LedgerResult};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Largest scale `rust_decimal` can represent.
const MAX_SCALE: u32 = 28;

/// Numeric policy for a computation.
///
/// `tolerance` is the absolute threshold below which a monetary difference
/// counts as zero. It absorbs the residue left by equal-split division
/// (10.00 split three ways). `scale` is the number of decimal places used
/// when an amount leaves the engine.
///
/// # Examples
///
/// ```
/// use splitledger::core::config::EngineConfig;
/// use rust_decimal_macros::dec;
///
/// let cents = EngineConfig::default();
/// assert_eq!(cents.tolerance, dec!(0.01));
///
/// let yen = EngineConfig::for_scale(0);
/// assert_eq!(yen.tolerance, dec!(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tolerance: Decimal,
    pub scale: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: dec!(0.01),
            scale: 2,
        }
    }
}

impl EngineConfig {
    /// Config for a currency with `scale` minor digits; tolerance is one minor unit.
    /// Scales past 28 are capped; use `with_scale` to reject them instead.
    pub fn for_scale(scale: u32) -> Self {
        let scale = scale.min(MAX_SCALE);
        Self {
            tolerance: Decimal::new(1, scale),
            scale,
        }
    }

    /// Change the output scale, keeping the tolerance.
    pub fn with_scale(mut self, scale: u32) -> LedgerResult<Self> {
        self.scale = scale;
        self.validate()?;
        Ok(self)
    }

    /// One unit of the smallest amount at this scale.
    pub fn minor_unit(&self) -> Decimal {
        Decimal::new(1, self.scale.min(MAX_SCALE))
    }

    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.tolerance < Decimal::ZERO {
            return Err(LedgerError::InvalidConfig(format!(
                "tolerance must not be negative, got {}",
                self.tolerance
            )));
        }
        if self.scale > MAX_SCALE {
            return Err(LedgerError::InvalidConfig(format!(
                "scale must be at most {}, got {}",
                MAX_SCALE, self.scale
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> LedgerResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LedgerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// True when `amount` is within tolerance of zero.
    pub fn is_negligible(&self, amount: Decimal) -> bool {
        amount.abs() <= self.tolerance
    }

    /// Round an amount for output. Only called at the engine's boundary.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.is_negligible(dec!(0.01)));
        assert!(config.is_negligible(dec!(-0.004)));
        assert!(!config.is_negligible(dec!(0.011)));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        let config = EngineConfig::default();
        assert_eq!(config.round(dec!(3.335)), dec!(3.34));
        assert_eq!(config.round(dec!(-3.335)), dec!(-3.34));
        assert_eq!(config.round(dec!(3.3333333)), dec!(3.33));
    }

    #[test]
    fn test_for_scale() {
        assert_eq!(EngineConfig::for_scale(3).tolerance, dec!(0.001));
        assert_eq!(EngineConfig::for_scale(40).scale, 28);
    }

    #[test]
    fn test_with_scale_keeps_tolerance_and_checks_range() {
        let config = EngineConfig::default()
            .with_tolerance(dec!(0.05))
            .with_scale(3)
            .unwrap();
        assert_eq!(config.scale, 3);
        assert_eq!(config.tolerance, dec!(0.05));
        assert_eq!(config.minor_unit(), dec!(0.001));

        assert!(matches!(
            EngineConfig::default().with_scale(40),
            Err(LedgerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let config = EngineConfig::default().with_tolerance(dec!(-0.5));
        assert!(matches!(
            config.validate(),
            Err(LedgerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let config = EngineConfig::from_json_str(r#"{"tolerance": "0.5"}"#).unwrap();
        assert_eq!(config.tolerance, dec!(0.5));
        assert_eq!(config.scale, 2);

        assert!(EngineConfig::from_json_str(r#"{"scale": 99}"#).is_err());
        assert!(EngineConfig::from_json_str("not json").is_err());
    }
}
