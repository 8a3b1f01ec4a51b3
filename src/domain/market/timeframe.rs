use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle bucket sizes the analyzer understands.
///
/// Serialized with the exchange-style labels (`"1h"`, `"4h"`, `"1d"`) so that
/// per-timeframe maps render as `{"1h": ..., "4h": ...}` in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHour,
    #[serde(rename = "1d")]
    OneDay,
}

impl Timeframe {
    /// Returns the duration of this timeframe in minutes
    pub fn to_minutes(&self) -> usize {
        match self {
            Timeframe::OneHour => 60,
            Timeframe::FourHour => 240,
            Timeframe::OneDay => 1440,
        }
    }

    /// Returns the duration in milliseconds
    pub fn to_millis(&self) -> i64 {
        (self.to_minutes() * 60_000) as i64
    }

    /// Exchange interval label, also used in data file names
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "1h",
            Timeframe::FourHour => "4h",
            Timeframe::OneDay => "1d",
        }
    }

    /// How many candles the market-data collaborator loads for this timeframe
    pub fn fetch_limit(&self) -> usize {
        match self {
            Timeframe::OneHour => 300,
            Timeframe::FourHour => 300,
            Timeframe::OneDay => 200,
        }
    }

    /// Returns all timeframes in ascending order
    pub fn all() -> Vec<Timeframe> {
        vec![Timeframe::OneHour, Timeframe::FourHour, Timeframe::OneDay]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1h" | "1hour" | "h1" => Ok(Timeframe::OneHour),
            "4h" | "4hour" | "h4" => Ok(Timeframe::FourHour),
            "1d" | "1day" | "d" => Ok(Timeframe::OneDay),
            _ => Err(anyhow!("Invalid timeframe: {}. Must be '1h', '4h' or '1d'", s)),
        }
    }
}
