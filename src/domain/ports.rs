use crate::domain::analysis::MarketDataBundle;
use anyhow::Result;
use async_trait::async_trait;

/// Source of candle series and sentiment for one symbol.
///
/// Implementations own fetching, retries and normalization; the analysis
/// core only ever sees the assembled bundle.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_bundle(&self, symbol: &str) -> Result<MarketDataBundle>;
}
