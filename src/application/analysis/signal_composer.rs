use crate::application::analysis::narrative;
use crate::application::market_data::StructureClassifier;
use crate::application::market_data::indicators::{self, latest_rsi_window};
use crate::application::risk_management::{TradeLevelGenerator, classify_volatility};
use crate::application::strategies::{LiquiditySweepDetector, OrderBlockDetector};
use crate::domain::analysis::{AnalysisResult, Decision, IndicatorSnapshot, MarketDataBundle};
use crate::domain::config::{AnalysisConfig, RiskConfig};
use crate::domain::market::bias::Bias;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::sentiment::FundingWarning;
use crate::domain::trading::types::{LiquiditySweep, TradeLevels};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Assembles one `AnalysisResult` per bundle.
///
/// Priority ladder:
/// 1. Admitted trade levels -> limit order on the zone.
/// 2. Trending governing bias with room in trigger RSI -> wait for a retracement.
/// 3. Trending bias without that room (or no RSI) -> neutral consolidation.
/// 4. Sideways -> neutral, avoid directional trades.
///
/// The funding overlay and volatility bucket are attached on every branch.
#[derive(Debug, Clone)]
pub struct SignalComposer {
    config: AnalysisConfig,
    structure: StructureClassifier,
    order_blocks: OrderBlockDetector,
    sweeps: LiquiditySweepDetector,
    levels: TradeLevelGenerator,
}

impl SignalComposer {
    pub fn new(config: AnalysisConfig, risk: RiskConfig) -> Self {
        Self {
            structure: StructureClassifier::new(
                config.structure_min_candles,
                config.bias_slope_threshold,
            ),
            order_blocks: OrderBlockDetector::new(config.order_block_window),
            sweeps: LiquiditySweepDetector::new(config.sweep_window),
            levels: TradeLevelGenerator::new(risk),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn risk_config(&self) -> &RiskConfig {
        self.levels.config()
    }

    pub fn analyze(&self, bundle: &MarketDataBundle) -> AnalysisResult {
        let governing_tf = self.config.governing_timeframe;
        let trigger = bundle.candles_for(self.config.trigger_timeframe);
        let governing = bundle.candles_for(governing_tf);
        let trigger_closes: Vec<f64> = trigger.iter().map(|c| c.close).collect();

        let rsi_period = self.config.rsi_period;
        let rsi = indicators::rsi(latest_rsi_window(&trigger_closes, rsi_period), rsi_period).ok();
        let macd = indicators::macd(
            &trigger_closes,
            self.config.macd_fast_period,
            self.config.macd_slow_period,
        )
        .ok();
        let atr = indicators::atr(governing, self.risk_config().atr_period);

        let market_structure = self.classify_timeframes(bundle);
        let governing_bias = market_structure
            .get(&governing_tf)
            .copied()
            .unwrap_or(Bias::Sideways);

        let liquidity = self.sweeps.detect(trigger).unwrap_or_else(|reason| {
            debug!("SignalComposer [{}]: sweep check skipped - {}", bundle.symbol, reason);
            LiquiditySweep::NoSweep
        });

        let order_block = self.order_blocks.detect(governing);
        let setup = order_block.clone().and_then(|zone| {
            self.levels
                .generate(&zone, governing_bias, bundle.current_price, governing)
        });

        let decision = self.decide(setup.as_ref().ok(), governing_bias, rsi, liquidity);
        debug!("SignalComposer [{}]: decision {:?}", bundle.symbol, decision);

        let (trade_levels, setup_rejection) = match setup {
            Ok(levels) => (Some(levels), None),
            Err(reason) => {
                debug!("SignalComposer [{}]: no trade levels - {}", bundle.symbol, reason);
                (None, Some(reason))
            }
        };

        let mut result = AnalysisResult {
            symbol: bundle.symbol.clone(),
            coin_name: bundle.coin_name(),
            current_price: bundle.current_price,
            market_structure,
            indicators: IndicatorSnapshot { rsi, macd, atr },
            sentiment: bundle.sentiment,
            volatility: classify_volatility(
                atr,
                bundle.current_price,
                self.config.volatility_low_ratio,
                self.config.volatility_high_ratio,
            ),
            liquidity,
            order_block: order_block.ok(),
            trade_levels,
            setup_rejection,
            recommendation: decision.recommendation(),
            decision,
            funding_warning: FundingWarning::from_funding_rate(
                bundle.sentiment.funding_rate,
                self.config.funding_rate_threshold,
            ),
            narrative: String::new(),
        };
        result.narrative = narrative::render(&result, &self.config, self.risk_config());
        result
    }

    /// Runs independent bundles in parallel; output order matches input order.
    pub fn analyze_many(&self, bundles: &[MarketDataBundle]) -> Vec<AnalysisResult> {
        bundles.par_iter().map(|bundle| self.analyze(bundle)).collect()
    }

    fn classify_timeframes(&self, bundle: &MarketDataBundle) -> BTreeMap<Timeframe, Bias> {
        let mut structure: BTreeMap<Timeframe, Bias> = bundle
            .candles
            .iter()
            .map(|(timeframe, series)| (*timeframe, self.structure.classify(series)))
            .collect();
        for timeframe in [self.config.trigger_timeframe, self.config.governing_timeframe] {
            structure.entry(timeframe).or_insert(Bias::Sideways);
        }
        structure
    }

    fn decide(
        &self,
        levels: Option<&TradeLevels>,
        bias: Bias,
        rsi: Option<f64>,
        liquidity: LiquiditySweep,
    ) -> Decision {
        if let Some(levels) = levels {
            return Decision::LimitOrder {
                side: levels.side,
                ob_kind: levels.ob_kind,
                rrr: levels.rrr,
                sweep_confirmed: liquidity.confirms(levels.side),
                counter_trend: levels.is_counter_trend,
            };
        }

        match (bias, rsi) {
            (Bias::Bullish, Some(rsi)) if rsi < self.config.rsi_overbought => {
                Decision::AwaitRetracement { bias, rsi }
            }
            (Bias::Bearish, Some(rsi)) if rsi > self.config.rsi_oversold => {
                Decision::AwaitRetracement { bias, rsi }
            }
            (Bias::Sideways, _) => Decision::AvoidDirectional,
            (bias, rsi) => Decision::Consolidation { bias, rsi },
        }
    }
}

impl Default for SignalComposer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default(), RiskConfig::default())
    }
}
