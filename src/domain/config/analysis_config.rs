//! Analysis Configuration Domain Value Object
//!
//! Indicator periods, classification thresholds and detector windows used by
//! the signal composer.

use crate::domain::market::timeframe::Timeframe;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisConfigError {
    #[error("Invalid period: {field} = {value}. Must be at least {min}")]
    InvalidPeriod {
        field: String,
        value: usize,
        min: usize,
    },

    #[error("MACD fast period {fast} must be shorter than slow period {slow}")]
    MacdPeriods { fast: usize, slow: usize },

    #[error("RSI bounds must satisfy 0 <= oversold ({oversold}) < overbought ({overbought}) <= 100")]
    RsiBounds { oversold: f64, overbought: f64 },

    #[error("Volatility bands must satisfy 0 <= low ({low}) <= high ({high})")]
    VolatilityBands { low: f64, high: f64 },

    #[error("Invalid threshold: {field} = {value}. Must not be negative")]
    NegativeThreshold { field: String, value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Timeframe whose structure governs the trade (order blocks, bias, ATR).
    /// The ATR period itself lives in `RiskConfig`.
    pub governing_timeframe: Timeframe,
    /// Timeframe used for momentum and sweep confluence
    pub trigger_timeframe: Timeframe,

    pub rsi_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,

    /// Fewer candles than this classify as Sideways
    pub structure_min_candles: usize,
    /// Whole-window slope beyond which a timeframe is trending (0.01 = 1%)
    pub bias_slope_threshold: f64,

    pub order_block_window: usize,
    pub sweep_window: usize,

    pub rsi_overbought: f64,
    pub rsi_oversold: f64,

    /// |funding rate| above this raises a squeeze warning
    pub funding_rate_threshold: f64,

    /// ATR/price above this is High volatility
    pub volatility_high_ratio: f64,
    /// ATR/price below this is Low volatility
    pub volatility_low_ratio: f64,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), AnalysisConfigError> {
        Self::validate_period("rsi_period", self.rsi_period, 1)?;
        Self::validate_period("macd_fast_period", self.macd_fast_period, 1)?;
        Self::validate_period("structure_min_candles", self.structure_min_candles, 2)?;
        Self::validate_period("order_block_window", self.order_block_window, 2)?;
        Self::validate_period("sweep_window", self.sweep_window, 2)?;

        if self.macd_fast_period >= self.macd_slow_period {
            return Err(AnalysisConfigError::MacdPeriods {
                fast: self.macd_fast_period,
                slow: self.macd_slow_period,
            });
        }

        if !(0.0 <= self.rsi_oversold
            && self.rsi_oversold < self.rsi_overbought
            && self.rsi_overbought <= 100.0)
        {
            return Err(AnalysisConfigError::RsiBounds {
                oversold: self.rsi_oversold,
                overbought: self.rsi_overbought,
            });
        }

        if !(0.0 <= self.volatility_low_ratio && self.volatility_low_ratio <= self.volatility_high_ratio)
        {
            return Err(AnalysisConfigError::VolatilityBands {
                low: self.volatility_low_ratio,
                high: self.volatility_high_ratio,
            });
        }

        for (field, value) in [
            ("bias_slope_threshold", self.bias_slope_threshold),
            ("funding_rate_threshold", self.funding_rate_threshold),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(AnalysisConfigError::NegativeThreshold {
                    field: field.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }

    fn validate_period(field: &str, value: usize, min: usize) -> Result<(), AnalysisConfigError> {
        if value < min {
            return Err(AnalysisConfigError::InvalidPeriod {
                field: field.to_string(),
                value,
                min,
            });
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            governing_timeframe: Timeframe::FourHour,
            trigger_timeframe: Timeframe::OneHour,
            rsi_period: 14,
            macd_fast_period: 12,
            macd_slow_period: 26,
            structure_min_candles: 20,
            bias_slope_threshold: 0.01,
            order_block_window: 10,
            sweep_window: 5,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            funding_rate_threshold: 0.0005,
            volatility_high_ratio: 0.02,
            volatility_low_ratio: 0.005,
        }
    }
}
