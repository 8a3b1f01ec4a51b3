use crate::domain::analysis::result::{AnalysisResult, Volatility};
use crate::domain::market::bias::Bias;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::trading::types::OrderBlockKind;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PRICE_DP: u32 = 4;
const RATIO_DP: u32 = 2;

/// Flat row handed to the persistence collaborator.
///
/// Trade-level columns are `None` when the analysis produced no setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub coin_name: String,
    pub entry_price: Option<Decimal>,
    pub market_structure_1h: Bias,
    pub market_structure_4h: Bias,
    pub rsi_1h: Option<Decimal>,
    pub macd_1h: Option<Decimal>,
    pub funding_rate: f64,
    pub long_short_ratio: f64,
    pub volatility_prediction: Volatility,
    pub recommendation: String,
    pub entry: Option<Decimal>,
    pub sl: Option<Decimal>,
    pub tp1: Option<Decimal>,
    pub rrr: Option<Decimal>,
    pub position_size_units: Option<u64>,
    pub ob_type: Option<OrderBlockKind>,
}

impl AnalysisRecord {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let levels = result.trade_levels.as_ref();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            coin_name: result.coin_name.clone(),
            entry_price: rounded(result.current_price, PRICE_DP),
            market_structure_1h: result.bias(Timeframe::OneHour),
            market_structure_4h: result.bias(Timeframe::FourHour),
            rsi_1h: result.indicators.rsi.and_then(|v| rounded(v, RATIO_DP)),
            macd_1h: result.indicators.macd.and_then(|v| rounded(v, PRICE_DP)),
            funding_rate: result.sentiment.funding_rate,
            long_short_ratio: result.sentiment.long_short_ratio,
            volatility_prediction: result.volatility,
            recommendation: result.recommendation.to_string(),
            entry: levels.and_then(|l| rounded(l.entry, PRICE_DP)),
            sl: levels.and_then(|l| rounded(l.stop_loss, PRICE_DP)),
            tp1: levels.and_then(|l| rounded(l.take_profit_1, PRICE_DP)),
            rrr: levels.and_then(|l| rounded(l.rrr, RATIO_DP)),
            position_size_units: levels.map(|l| l.position_size_units),
            ob_type: levels.map(|l| l.ob_kind),
        }
    }

    pub fn has_trade_levels(&self) -> bool {
        self.entry.is_some() && self.sl.is_some() && self.tp1.is_some() && self.rrr.is_some()
    }
}

fn rounded(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value).map(|d| d.round_dp(dp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analysis::SignalComposer;
    use crate::domain::analysis::MarketDataBundle;
    use crate::domain::market::candle::{Candle, CandleSeries};
    use crate::domain::sentiment::Sentiment;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    #[test]
    fn test_rounding_to_presentation_precision() {
        assert_eq!(rounded(98.901234567, PRICE_DP), Some(dec!(98.9012)));
        assert_eq!(rounded(2.0049, RATIO_DP), Some(dec!(2.00)));
        assert_eq!(rounded(f64::NAN, PRICE_DP), None);
    }

    fn flat_result(price: f64) -> AnalysisResult {
        let series = CandleSeries::new(
            (0..40)
                .map(|i| Candle::new(i * 3_600_000, price, price + 0.1, price - 0.1, price, 1.0))
                .collect(),
        )
        .unwrap();
        let mut candles = BTreeMap::new();
        candles.insert(Timeframe::OneHour, series.clone());
        candles.insert(Timeframe::FourHour, series);
        let bundle =
            MarketDataBundle::from_series("ETH/USDT", candles, Sentiment::default(), Timeframe::OneHour)
                .unwrap();
        SignalComposer::default().analyze(&bundle)
    }

    #[test]
    fn test_neutral_result_leaves_level_columns_empty() {
        let record = AnalysisRecord::from_result(&flat_result(50.0));
        assert_eq!(record.coin_name, "ETH");
        assert_eq!(record.entry_price, Some(dec!(50)));
        assert_eq!(record.recommendation, "NEUTRAL");
        assert!(!record.has_trade_levels());
    }

    #[test]
    fn test_non_finite_price_is_not_stored_as_zero() {
        let mut result = flat_result(50.0);
        result.current_price = f64::NAN;
        assert_eq!(AnalysisRecord::from_result(&result).entry_price, None);
    }
}
