//! Risk Configuration Domain Value Object
//!
//! Holds every parameter the trade-level generator uses to place stops and
//! targets, filter setups and size positions. Passing it explicitly lets each
//! analysis run with its own risk profile.

use thiserror::Error;

/// Error type for RiskConfig validation
#[derive(Debug, Error, PartialEq)]
pub enum RiskConfigError {
    #[error("Invalid ratio: {field} = {value}. Must be between 0.0 and 1.0")]
    InvalidRatio { field: String, value: f64 },

    #[error("Invalid value: {field} = {value}. Must be positive")]
    NotPositive { field: String, value: f64 },

    #[error("Invalid period: {field} = {value}. Must be at least 1")]
    InvalidPeriod { field: String, value: usize },
}

/// Trade-level and sizing parameters
///
/// # Invariants
///
/// - `min_rrr`, both target multiples, `atr_multiplier` and `equity` are > 0
/// - `zone_buffer_pct` and `distance_tolerance_pct` are ratios in [0.0, 1.0]
/// - `risk_per_trade_percent` is a percentage in [0.0, 100.0]
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    /// Minimum reward/risk a setup must offer to be admitted
    pub min_rrr: f64,

    /// Risk multiple used to place take-profit 1
    pub primary_target_multiple: f64,

    /// Risk multiple used to place take-profit 2
    pub extended_target_multiple: f64,

    pub atr_period: usize,

    /// ATR multiple for the volatility-based stop distance
    pub atr_multiplier: f64,

    /// Stop buffer beyond the zone edge (0.001 = 0.1%)
    pub zone_buffer_pct: f64,

    /// Maximum distance between zone mid and current price (0.05 = 5%)
    pub distance_tolerance_pct: f64,

    /// Account equity assumed for position sizing
    pub equity: f64,

    /// Share of equity risked per trade, in percent (1.0 = 1%)
    pub risk_per_trade_percent: f64,
}

impl RiskConfig {
    /// Validate all invariants
    pub fn validate(&self) -> Result<(), RiskConfigError> {
        self.validate_positive("min_rrr", self.min_rrr)?;
        self.validate_positive("primary_target_multiple", self.primary_target_multiple)?;
        self.validate_positive("extended_target_multiple", self.extended_target_multiple)?;
        self.validate_positive("atr_multiplier", self.atr_multiplier)?;
        self.validate_positive("equity", self.equity)?;
        self.validate_ratio("zone_buffer_pct", self.zone_buffer_pct)?;
        self.validate_ratio("distance_tolerance_pct", self.distance_tolerance_pct)?;
        self.validate_ratio("risk_per_trade_percent", self.risk_per_trade_percent / 100.0)?;

        if self.atr_period == 0 {
            return Err(RiskConfigError::InvalidPeriod {
                field: "atr_period".to_string(),
                value: self.atr_period,
            });
        }

        Ok(())
    }

    /// Dollar amount put at risk on a single trade
    pub fn risk_budget(&self) -> f64 {
        self.equity * (self.risk_per_trade_percent / 100.0)
    }

    fn validate_positive(&self, field: &str, value: f64) -> Result<(), RiskConfigError> {
        if value.is_nan() || value <= 0.0 {
            return Err(RiskConfigError::NotPositive {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    fn validate_ratio(&self, field: &str, value: f64) -> Result<(), RiskConfigError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(RiskConfigError::InvalidRatio {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            min_rrr: 2.0,
            primary_target_multiple: 2.0,
            extended_target_multiple: 3.5,
            atr_period: 14,
            atr_multiplier: 2.0,
            zone_buffer_pct: 0.001,
            distance_tolerance_pct: 0.05,
            equity: 10_000.0,
            risk_per_trade_percent: 1.0,
        }
    }
}
