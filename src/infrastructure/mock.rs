use crate::domain::analysis::MarketDataBundle;
use crate::domain::ports::MarketDataProvider;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Serves pre-built bundles keyed by symbol
#[derive(Clone, Default)]
pub struct MockMarketDataProvider {
    bundles: Arc<RwLock<HashMap<String, MarketDataBundle>>>,
}

impl MockMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, bundle: MarketDataBundle) {
        info!("MockMarketDataProvider: registered {}", bundle.symbol);
        self.bundles
            .write()
            .await
            .insert(bundle.symbol.clone(), bundle);
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    async fn fetch_bundle(&self, symbol: &str) -> Result<MarketDataBundle> {
        match self.bundles.read().await.get(symbol) {
            Some(bundle) => Ok(bundle.clone()),
            None => bail!("MockMarketDataProvider: no data for {}", symbol),
        }
    }
}
