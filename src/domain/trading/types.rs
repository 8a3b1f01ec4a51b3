use crate::domain::market::bias::Bias;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Long,
    Short,
}

impl TradeSide {
    /// True when this side fights the given trend bias.
    pub fn opposes(&self, bias: Bias) -> bool {
        matches!(
            (self, bias),
            (TradeSide::Long, Bias::Bearish) | (TradeSide::Short, Bias::Bullish)
        )
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Long => write!(f, "Long"),
            TradeSide::Short => write!(f, "Short"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderBlockKind {
    Demand,
    Supply,
}

impl OrderBlockKind {
    /// Demand zones are bought, supply zones are sold.
    pub fn trade_side(&self) -> TradeSide {
        match self {
            OrderBlockKind::Demand => TradeSide::Long,
            OrderBlockKind::Supply => TradeSide::Short,
        }
    }
}

impl fmt::Display for OrderBlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBlockKind::Demand => write!(f, "Demand"),
            OrderBlockKind::Supply => write!(f, "Supply"),
        }
    }
}

/// A candle-derived price zone, not a single price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBlock {
    pub kind: OrderBlockKind,
    pub low: f64,
    pub high: f64,
    pub mid: f64,
}

impl OrderBlock {
    pub fn new(kind: OrderBlockKind, low: f64, high: f64) -> Self {
        Self {
            kind,
            low,
            high,
            mid: (high + low) / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiquiditySweep {
    BuySide,
    SellSide,
    NoSweep,
}

impl LiquiditySweep {
    /// A sweep of resting stops on the opposite side confirms the trade.
    pub fn confirms(&self, side: TradeSide) -> bool {
        matches!(
            (self, side),
            (LiquiditySweep::SellSide, TradeSide::Long) | (LiquiditySweep::BuySide, TradeSide::Short)
        )
    }
}

impl fmt::Display for LiquiditySweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiquiditySweep::BuySide => write!(f, "Buy-side liquidity sweep"),
            LiquiditySweep::SellSide => write!(f, "Sell-side liquidity sweep"),
            LiquiditySweep::NoSweep => write!(f, "None"),
        }
    }
}

/// Admitted limit-order setup.
///
/// Built only by `TradeLevelGenerator`, which guarantees
/// `rrr >= required_rrr`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct TradeLevels {
    pub side: TradeSide,
    pub ob_kind: OrderBlockKind,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub rrr: f64,
    pub required_rrr: f64,
    pub position_size_units: u64,
    pub is_counter_trend: bool,
}
