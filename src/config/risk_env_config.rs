//! Risk management configuration parsing from environment variables.
//!
//! Admission filter, stop/target geometry and position sizing.

use crate::domain::config::RiskConfig;
use anyhow::{Context, Result};
use std::env;

pub struct RiskEnvConfig;

impl RiskEnvConfig {
    /// Unset variables fall back to `RiskConfig::default()`.
    pub fn from_env() -> Result<RiskConfig> {
        let defaults = RiskConfig::default();

        Ok(RiskConfig {
            min_rrr: Self::parse_f64("MIN_RRR", defaults.min_rrr)?,
            primary_target_multiple: Self::parse_f64(
                "PRIMARY_TARGET_MULTIPLE",
                defaults.primary_target_multiple,
            )?,
            extended_target_multiple: Self::parse_f64(
                "EXTENDED_TARGET_MULTIPLE",
                defaults.extended_target_multiple,
            )?,
            atr_period: Self::parse_usize("ATR_PERIOD", defaults.atr_period)?,
            atr_multiplier: Self::parse_f64("ATR_MULTIPLIER", defaults.atr_multiplier)?,
            zone_buffer_pct: Self::parse_f64("ZONE_BUFFER_PCT", defaults.zone_buffer_pct)?,
            distance_tolerance_pct: Self::parse_f64(
                "DISTANCE_TOLERANCE_PCT",
                defaults.distance_tolerance_pct,
            )?,
            equity: Self::parse_f64("EQUITY", defaults.equity)?,
            risk_per_trade_percent: Self::parse_f64(
                "RISK_PER_TRADE_PERCENT",
                defaults.risk_per_trade_percent,
            )?,
        })
    }

    fn parse_usize(key: &str, default: usize) -> Result<usize> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<usize>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_f64(key: &str, default: f64) -> Result<f64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<f64>()
            .context(format!("Failed to parse {}", key))
    }
}
