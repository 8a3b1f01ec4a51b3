use crate::domain::analysis::decision::{Decision, Recommendation};
use crate::domain::errors::Unavailable;
use crate::domain::market::bias::Bias;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::sentiment::{FundingWarning, Sentiment};
use crate::domain::trading::types::{LiquiditySweep, OrderBlock, TradeLevels};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    Low,
    Moderate,
    High,
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volatility::Low => write!(f, "Low Volatility"),
            Volatility::Moderate => write!(f, "Moderate"),
            Volatility::High => write!(f, "High Volatility"),
        }
    }
}

/// Momentum readings on the trigger timeframe plus governing ATR
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub atr: f64,
}

/// Output of one analysis call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub coin_name: String,
    pub current_price: f64,
    pub market_structure: BTreeMap<Timeframe, Bias>,
    pub indicators: IndicatorSnapshot,
    pub sentiment: Sentiment,
    pub volatility: Volatility,
    pub liquidity: LiquiditySweep,
    pub order_block: Option<OrderBlock>,
    pub trade_levels: Option<TradeLevels>,
    /// Why `trade_levels` is absent
    pub setup_rejection: Option<Unavailable>,
    pub decision: Decision,
    pub funding_warning: Option<FundingWarning>,
    pub recommendation: Recommendation,
    pub narrative: String,
}

impl AnalysisResult {
    pub fn bias(&self, timeframe: Timeframe) -> Bias {
        self.market_structure
            .get(&timeframe)
            .copied()
            .unwrap_or(Bias::Sideways)
    }

    pub fn has_trade_levels(&self) -> bool {
        self.trade_levels.is_some()
    }
}
