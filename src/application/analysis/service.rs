use crate::application::analysis::SignalComposer;
use crate::domain::analysis::{AnalysisRecord, AnalysisResult, MarketDataBundle, normalize_symbol};
use crate::domain::ports::MarketDataProvider;
use crate::domain::repositories::AnalysisRepository;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome for one symbol of a batch; fetch failures do not sink the batch.
#[derive(Debug)]
pub struct BatchAnalysisResult {
    pub symbol: String,
    pub result: Result<AnalysisResult, String>,
}

/// Fetch -> compose -> persist -> log.
///
/// The composer is pure; all I/O happens here through the two ports.
pub struct AnalysisService {
    provider: Arc<dyn MarketDataProvider>,
    repository: Arc<dyn AnalysisRepository>,
    composer: Arc<SignalComposer>,
    persist_all: bool,
}

impl AnalysisService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        repository: Arc<dyn AnalysisRepository>,
        composer: Arc<SignalComposer>,
    ) -> Self {
        Self {
            provider,
            repository,
            composer,
            persist_all: false,
        }
    }

    /// Also store analyses that ended without trade levels
    pub fn with_persist_all(mut self, persist_all: bool) -> Self {
        self.persist_all = persist_all;
        self
    }

    pub async fn analyze_symbol(&self, input: &str) -> Result<AnalysisResult> {
        let started = Instant::now();
        let symbol = normalize_symbol(input);

        let bundle = self
            .provider
            .fetch_bundle(&symbol)
            .await
            .with_context(|| format!("Failed to fetch market data for {}", symbol))?;

        let result = self.composer.analyze(&bundle);
        self.persist(&result).await;
        log_completion(&result, started);

        Ok(result)
    }

    /// Analyzes every symbol; output order matches `inputs`.
    pub async fn analyze_symbols(&self, inputs: &[String]) -> Result<Vec<BatchAnalysisResult>> {
        let started = Instant::now();
        let symbols: Vec<String> = inputs.iter().map(|s| normalize_symbol(s)).collect();

        let fetched = join_all(symbols.iter().map(|symbol| self.provider.fetch_bundle(symbol))).await;

        let mut bundles: Vec<MarketDataBundle> = Vec::new();
        let mut slots: Vec<Result<usize, String>> = Vec::with_capacity(symbols.len());
        for (symbol, outcome) in symbols.iter().zip(fetched) {
            match outcome {
                Ok(bundle) => {
                    slots.push(Ok(bundles.len()));
                    bundles.push(bundle);
                }
                Err(e) => {
                    warn!("AnalysisService: fetch failed for {}: {:#}", symbol, e);
                    slots.push(Err(format!("{:#}", e)));
                }
            }
        }

        let composer = self.composer.clone();
        let mut results: Vec<Option<AnalysisResult>> =
            tokio::task::spawn_blocking(move || composer.analyze_many(&bundles))
                .await
                .context("Analysis worker panicked")?
                .into_iter()
                .map(Some)
                .collect();

        let mut batch = Vec::with_capacity(symbols.len());
        for (symbol, slot) in symbols.into_iter().zip(slots) {
            let result = match slot {
                Ok(index) => match results.get_mut(index).and_then(Option::take) {
                    Some(result) => {
                        self.persist(&result).await;
                        log_completion(&result, started);
                        Ok(result)
                    }
                    None => Err(format!("No analysis produced for {}", symbol)),
                },
                Err(e) => Err(e),
            };
            batch.push(BatchAnalysisResult { symbol, result });
        }

        Ok(batch)
    }

    /// Most recent stored analyses first
    pub async fn history(&self, limit: usize) -> Result<Vec<AnalysisRecord>> {
        self.repository
            .find_recent(limit)
            .await
            .context("Failed to load analysis history")
    }

    pub async fn history_entry(&self, id: Uuid) -> Result<Option<AnalysisRecord>> {
        self.repository
            .find_by_id(id)
            .await
            .with_context(|| format!("Failed to load analysis {}", id))
    }

    async fn persist(&self, result: &AnalysisResult) {
        if !self.persist_all && !result.has_trade_levels() {
            return;
        }

        let record = AnalysisRecord::from_result(result);
        if let Err(e) = self.repository.save(&record).await {
            // Storage trouble never hides a computed analysis from the caller
            warn!(
                "AnalysisService: failed to persist analysis for {}: {:#}",
                result.coin_name, e
            );
        }
    }
}

fn log_completion(result: &AnalysisResult, started: Instant) {
    info!(
        "{} | {} | {:.3}s",
        result.coin_name,
        result.recommendation,
        started.elapsed().as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::candle::{Candle, CandleSeries};
    use crate::domain::market::timeframe::Timeframe;
    use crate::domain::sentiment::Sentiment;
    use crate::infrastructure::{InMemoryAnalysisRepository, MockMarketDataProvider};
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    fn flat_bundle(symbol: &str) -> MarketDataBundle {
        let series = CandleSeries::new(
            (0..40)
                .map(|i| Candle::new(i * 3_600_000, 100.0, 100.1, 99.9, 100.0, 1.0))
                .collect(),
        )
        .unwrap();
        let mut candles = BTreeMap::new();
        candles.insert(Timeframe::OneHour, series.clone());
        candles.insert(Timeframe::FourHour, series);
        MarketDataBundle::from_series(symbol, candles, Sentiment::default(), Timeframe::OneHour)
            .unwrap()
    }

    async fn service_with(
        symbols: &[&str],
        persist_all: bool,
    ) -> (AnalysisService, Arc<InMemoryAnalysisRepository>) {
        let provider = MockMarketDataProvider::new();
        for symbol in symbols {
            provider.insert(flat_bundle(symbol)).await;
        }
        let repository = Arc::new(InMemoryAnalysisRepository::new());
        let service = AnalysisService::new(
            Arc::new(provider),
            repository.clone(),
            Arc::new(SignalComposer::default()),
        )
        .with_persist_all(persist_all);
        (service, repository)
    }

    #[tokio::test]
    async fn test_analyze_symbol_normalizes_input() {
        let (service, _) = service_with(&["BTC/USDT"], false).await;
        let result = service.analyze_symbol("btc").await.unwrap();
        assert_eq!(result.coin_name, "BTC");
        assert!(result.recommendation.is_neutral());
    }

    #[tokio::test]
    async fn test_neutral_analyses_not_persisted_by_default() {
        let (service, repository) = service_with(&["BTC/USDT"], false).await;
        service.analyze_symbol("BTC").await.unwrap();
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_persist_all_stores_every_analysis() {
        let (service, _) = service_with(&["BTC/USDT"], true).await;
        service.analyze_symbol("BTC").await.unwrap();

        let history = service.history(10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].recommendation, "NEUTRAL");
        assert!(!history[0].has_trade_levels());

        let entry = service.history_entry(history[0].id).await.unwrap();
        assert_eq!(entry.map(|r| r.coin_name), Some("BTC".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_an_error() {
        let (service, _) = service_with(&[], false).await;
        let err = service.analyze_symbol("DOGE").await.unwrap_err();
        assert!(err.to_string().contains("DOGE/USDT"));
    }

    #[tokio::test]
    async fn test_batch_keeps_order_and_isolates_failures() {
        let (service, _) = service_with(&["BTC/USDT", "ETH/USDT"], false).await;
        let inputs = vec!["eth".to_string(), "missing".to_string(), "btc".to_string()];
        let batch = service.analyze_symbols(&inputs).await.unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].symbol, "ETH/USDT");
        assert_eq!(batch[0].result.as_ref().unwrap().coin_name, "ETH");
        assert_eq!(batch[1].symbol, "MISSING/USDT");
        assert!(batch[1].result.is_err());
        assert_eq!(batch[2].result.as_ref().unwrap().coin_name, "BTC");
    }

    struct FailingRepository;

    #[async_trait]
    impl AnalysisRepository for FailingRepository {
        async fn save(&self, _record: &AnalysisRecord) -> Result<()> {
            anyhow::bail!("disk full")
        }

        async fn find_recent(&self, _limit: usize) -> Result<Vec<AnalysisRecord>> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<AnalysisRecord>> {
            Ok(None)
        }

        async fn count(&self) -> Result<usize> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_persistence_failure_is_not_fatal() {
        let provider = MockMarketDataProvider::new();
        provider.insert(flat_bundle("BTC/USDT")).await;
        let service = AnalysisService::new(
            Arc::new(provider),
            Arc::new(FailingRepository),
            Arc::new(SignalComposer::default()),
        )
        .with_persist_all(true);

        assert!(service.analyze_symbol("BTC").await.is_ok());
    }
}
