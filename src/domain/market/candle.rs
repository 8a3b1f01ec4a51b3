use serde::{Deserialize, Serialize};
use std::ops::Deref;
use thiserror::Error;

/// One OHLCV bucket. `open_time` is a unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(open_time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Lower and upper edge of the open/close body
    pub fn body_bounds(&self) -> (f64, f64) {
        (self.open.min(self.close), self.open.max(self.close))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("open_time must be strictly increasing: candle {index} at {open_time} follows {previous}")]
    NotIncreasing {
        index: usize,
        open_time: i64,
        previous: i64,
    },
}

/// Candles for one (symbol, timeframe) pair, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Candle>", into = "Vec<Candle>")]
pub struct CandleSeries(Vec<Candle>);

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, SeriesError> {
        for (index, pair) in candles.windows(2).enumerate() {
            if pair[1].open_time <= pair[0].open_time {
                return Err(SeriesError::NotIncreasing {
                    index: index + 1,
                    open_time: pair[1].open_time,
                    previous: pair[0].open_time,
                });
            }
        }
        Ok(Self(candles))
    }

    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|c| c.close).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.0.last().map(|c| c.close)
    }

    /// Keeps only the most recent `limit` candles.
    pub fn tail(&self, limit: usize) -> Self {
        let start = self.0.len().saturating_sub(limit);
        Self(self.0[start..].to_vec())
    }
}

impl Deref for CandleSeries {
    type Target = [Candle];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<Candle>> for CandleSeries {
    type Error = SeriesError;

    fn try_from(candles: Vec<Candle>) -> Result<Self, Self::Error> {
        Self::new(candles)
    }
}

impl From<CandleSeries> for Vec<Candle> {
    fn from(series: CandleSeries) -> Self {
        series.0
    }
}
