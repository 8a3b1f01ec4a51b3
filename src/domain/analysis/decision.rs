use crate::domain::market::bias::Bias;
use crate::domain::trading::types::{OrderBlockKind, TradeSide};
use serde::{Serialize, Serializer};
use std::fmt;

/// Which branch of the signal priority ladder fired, with the facts that
/// drove it. Renderers turn this into text; tests assert on it directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "branch")]
pub enum Decision {
    /// A precise limit-order setup passed every filter.
    LimitOrder {
        side: TradeSide,
        ob_kind: OrderBlockKind,
        rrr: f64,
        sweep_confirmed: bool,
        counter_trend: bool,
    },
    /// Trending structure with healthy momentum, no precise levels yet.
    AwaitRetracement { bias: Bias, rsi: f64 },
    /// Trending structure but momentum is stretched or unknown.
    Consolidation { bias: Bias, rsi: Option<f64> },
    AvoidDirectional,
}

impl Decision {
    pub fn recommendation(&self) -> Recommendation {
        match self {
            Decision::LimitOrder { side, .. } => Recommendation::LimitOrder(*side),
            Decision::AwaitRetracement { bias, .. } => Recommendation::Wait(*bias),
            Decision::Consolidation { .. } | Decision::AvoidDirectional => Recommendation::Neutral,
        }
    }
}

/// Top-level tag shown to users and persisted with each analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Neutral,
    LimitOrder(TradeSide),
    Wait(Bias),
}

impl Recommendation {
    pub fn is_neutral(&self) -> bool {
        matches!(self, Recommendation::Neutral)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Neutral => write!(f, "NEUTRAL"),
            Recommendation::LimitOrder(side) => write!(f, "{} (Limit Order)", side),
            Recommendation::Wait(Bias::Bearish) => write!(f, "Bearish (Wait for Pullback)"),
            Recommendation::Wait(bias) => write!(f, "{} (Wait for Retracement)", bias),
        }
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
