//! Market data read from a directory of exported files.
//!
//! Layout, per coin:
//! - `<COIN>_1h.csv`, `<COIN>_4h.csv`, `<COIN>_1d.csv` with a header row
//!   `open_time,open,high,low,close,volume`, oldest first
//! - `<COIN>_sentiment.json` (optional) `{"funding_rate": .., "long_short_ratio": ..}`

use crate::domain::analysis::{MarketDataBundle, coin_name};
use crate::domain::market::candle::{Candle, CandleSeries};
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ports::MarketDataProvider;
use crate::domain::sentiment::Sentiment;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

pub struct CsvMarketDataProvider {
    data_dir: PathBuf,
}

impl CsvMarketDataProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn series_path(&self, coin: &str, timeframe: Timeframe) -> PathBuf {
        self.data_dir.join(format!("{}_{}.csv", coin, timeframe.label()))
    }

    fn sentiment_path(&self, coin: &str) -> PathBuf {
        self.data_dir.join(format!("{}_sentiment.json", coin))
    }

    async fn load_series(&self, coin: &str, timeframe: Timeframe) -> Result<CandleSeries> {
        let path = self.series_path(coin, timeframe);
        let bytes = fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {} candles from {}", timeframe, path.display()))?;

        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let mut candles = Vec::new();
        for row in rdr.deserialize() {
            let candle: Candle =
                row.with_context(|| format!("Malformed candle row in {}", path.display()))?;
            candles.push(candle);
        }

        let series = CandleSeries::new(candles)
            .with_context(|| format!("Invalid candle order in {}", path.display()))?;
        let trimmed = series.tail(timeframe.fetch_limit());
        debug!(
            "CsvMarketDataProvider: loaded {} {} candles for {}",
            trimmed.len(),
            timeframe,
            coin
        );
        Ok(trimmed)
    }

    async fn load_sentiment(&self, coin: &str) -> Sentiment {
        let path = self.sentiment_path(coin);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "CsvMarketDataProvider: no sentiment for {} ({}), using defaults",
                    coin, e
                );
                return Sentiment::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(
                "CsvMarketDataProvider: unreadable sentiment in {} ({}), using defaults",
                path.display(),
                e
            );
            Sentiment::default()
        })
    }
}

#[async_trait]
impl MarketDataProvider for CsvMarketDataProvider {
    async fn fetch_bundle(&self, symbol: &str) -> Result<MarketDataBundle> {
        let coin = coin_name(symbol);

        let mut candles = BTreeMap::new();
        for timeframe in Timeframe::all() {
            let series = self.load_series(&coin, timeframe).await?;
            candles.insert(timeframe, series);
        }
        let sentiment = self.load_sentiment(&coin).await;

        MarketDataBundle::from_series(symbol, candles, sentiment, Timeframe::OneHour)
            .with_context(|| format!("Cannot price {}", symbol))
    }
}
