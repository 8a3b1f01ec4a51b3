//! Analysis parameter parsing from environment variables.
//!
//! Indicator periods, structure thresholds, detector windows and the
//! governing/trigger timeframe pair.

use crate::domain::config::AnalysisConfig;
use crate::domain::market::timeframe::Timeframe;
use anyhow::{Context, Result};
use std::env;

pub struct AnalysisEnvConfig;

impl AnalysisEnvConfig {
    /// Unset variables fall back to `AnalysisConfig::default()`.
    pub fn from_env() -> Result<AnalysisConfig> {
        let defaults = AnalysisConfig::default();

        let governing_timeframe =
            Self::parse_timeframe("GOVERNING_TIMEFRAME", defaults.governing_timeframe)?;
        let trigger_timeframe =
            Self::parse_timeframe("TRIGGER_TIMEFRAME", defaults.trigger_timeframe)?;

        Ok(AnalysisConfig {
            governing_timeframe,
            trigger_timeframe,
            rsi_period: Self::parse_usize("RSI_PERIOD", defaults.rsi_period)?,
            macd_fast_period: Self::parse_usize("MACD_FAST_PERIOD", defaults.macd_fast_period)?,
            macd_slow_period: Self::parse_usize("MACD_SLOW_PERIOD", defaults.macd_slow_period)?,
            structure_min_candles: Self::parse_usize(
                "STRUCTURE_MIN_CANDLES",
                defaults.structure_min_candles,
            )?,
            bias_slope_threshold: Self::parse_f64(
                "BIAS_SLOPE_THRESHOLD",
                defaults.bias_slope_threshold,
            )?,
            order_block_window: Self::parse_usize("OB_SCAN_WINDOW", defaults.order_block_window)?,
            sweep_window: Self::parse_usize("SWEEP_WINDOW", defaults.sweep_window)?,
            rsi_overbought: Self::parse_f64("RSI_OVERBOUGHT", defaults.rsi_overbought)?,
            rsi_oversold: Self::parse_f64("RSI_OVERSOLD", defaults.rsi_oversold)?,
            funding_rate_threshold: Self::parse_f64(
                "FUNDING_RATE_THRESHOLD",
                defaults.funding_rate_threshold,
            )?,
            volatility_high_ratio: Self::parse_f64(
                "VOLATILITY_HIGH_RATIO",
                defaults.volatility_high_ratio,
            )?,
            volatility_low_ratio: Self::parse_f64(
                "VOLATILITY_LOW_RATIO",
                defaults.volatility_low_ratio,
            )?,
        })
    }

    fn parse_timeframe(key: &str, default: Timeframe) -> Result<Timeframe> {
        env::var(key)
            .unwrap_or_else(|_| default.label().to_string())
            .parse::<Timeframe>()
            .context(format!("Failed to parse {}", key))
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
