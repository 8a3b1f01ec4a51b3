use crate::domain::market::candle::{Candle, CandleSeries};
use crate::domain::market::timeframe::Timeframe;
use crate::domain::sentiment::Sentiment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Quote asset appended to bare coin names
pub const QUOTE_ASSET: &str = "USDT";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BundleError {
    #[error("No {0} candles to derive the current price from")]
    NoPrice(Timeframe),
}

/// Everything one analysis needs, assembled by the market-data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataBundle {
    pub symbol: String,
    pub candles: BTreeMap<Timeframe, CandleSeries>,
    #[serde(default)]
    pub sentiment: Sentiment,
    pub current_price: f64,
}

impl MarketDataBundle {
    pub fn new(
        symbol: impl Into<String>,
        candles: BTreeMap<Timeframe, CandleSeries>,
        sentiment: Sentiment,
        current_price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            candles,
            sentiment,
            current_price,
        }
    }

    /// Builds a bundle priced at the last close of the `price_timeframe` series.
    pub fn from_series(
        symbol: impl Into<String>,
        candles: BTreeMap<Timeframe, CandleSeries>,
        sentiment: Sentiment,
        price_timeframe: Timeframe,
    ) -> Result<Self, BundleError> {
        let current_price = candles
            .get(&price_timeframe)
            .and_then(|s| s.last_close())
            .ok_or(BundleError::NoPrice(price_timeframe))?;
        Ok(Self::new(symbol, candles, sentiment, current_price))
    }

    /// Candles for a timeframe; empty when the collaborator supplied none.
    pub fn candles_for(&self, timeframe: Timeframe) -> &[Candle] {
        self.candles
            .get(&timeframe)
            .map(|s| &s[..])
            .unwrap_or(&[])
    }

    pub fn coin_name(&self) -> String {
        coin_name(&self.symbol)
    }
}

/// "BTC/USDT" -> "BTC"
pub fn coin_name(symbol: &str) -> String {
    symbol
        .replace(&format!("/{}", QUOTE_ASSET), "")
        .replace('/', "")
}

/// "btc" -> "BTC/USDT"; symbols that already name a pair are only upper-cased.
pub fn normalize_symbol(input: &str) -> String {
    let upper = input.trim().to_uppercase();
    if upper.contains('/') {
        upper
    } else {
        format!("{}/{}", upper, QUOTE_ASSET)
    }
}
