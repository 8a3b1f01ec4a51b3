use crate::application::market_data::indicators;
use crate::application::risk_management::sizing_engine::SizingEngine;
use crate::domain::config::RiskConfig;
use crate::domain::errors::{Rejection, Unavailable};
use crate::domain::market::bias::Bias;
use crate::domain::market::candle::Candle;
use crate::domain::trading::types::{OrderBlock, TradeLevels, TradeSide};
use tracing::debug;

/// Slack for floating-point noise when a setup sits exactly on the RRR floor
const RRR_TOLERANCE: f64 = 1e-9;

/// Reward distance over risk distance, both measured from entry.
pub fn reward_risk_ratio(entry: f64, stop_loss: f64, target: f64) -> f64 {
    let risk = (entry - stop_loss).abs();
    let reward = (target - entry).abs();
    if risk > 0.0 { reward / risk } else { 0.0 }
}

/// Turns an order block into limit-order levels, or explains why not.
///
/// Filters, in order:
/// 1. The zone mid must sit on the limit-order side of price (below for a
///    long, above for a short) and within the distance tolerance.
/// 2. The recomputed reward/risk to take-profit 1 must reach `min_rrr`.
#[derive(Debug, Clone)]
pub struct TradeLevelGenerator {
    config: RiskConfig,
}

impl TradeLevelGenerator {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Uses ATR over `candles`, which should be the zone's own timeframe.
    pub fn generate(
        &self,
        zone: &OrderBlock,
        bias: Bias,
        current_price: f64,
        candles: &[Candle],
    ) -> Result<TradeLevels, Unavailable> {
        let atr = indicators::atr(candles, self.config.atr_period);
        self.generate_with_atr(zone, bias, current_price, atr)
    }

    pub fn generate_with_atr(
        &self,
        zone: &OrderBlock,
        bias: Bias,
        current_price: f64,
        atr: f64,
    ) -> Result<TradeLevels, Unavailable> {
        let side = zone.kind.trade_side();
        let entry = zone.mid;

        self.check_placement(side, entry, current_price)?;

        // The farther of the zone-edge buffer and the ATR distance wins
        let atr_risk = atr * self.config.atr_multiplier;
        let stop_loss = match side {
            TradeSide::Long => (zone.low * (1.0 - self.config.zone_buffer_pct)).min(entry - atr_risk),
            TradeSide::Short => {
                (zone.high * (1.0 + self.config.zone_buffer_pct)).max(entry + atr_risk)
            }
        };

        let risk = (entry - stop_loss).abs();
        if !risk.is_finite() || risk <= 0.0 {
            debug!("TradeLevelGenerator: REJECTED {} setup - zero risk distance", side);
            return Err(Rejection::ZeroRisk.into());
        }

        let direction = match side {
            TradeSide::Long => 1.0,
            TradeSide::Short => -1.0,
        };
        let take_profit_1 = entry + direction * risk * self.config.primary_target_multiple;
        let take_profit_2 = entry + direction * risk * self.config.extended_target_multiple;

        let rrr = reward_risk_ratio(entry, stop_loss, take_profit_1);
        if rrr + RRR_TOLERANCE < self.config.min_rrr {
            debug!(
                "TradeLevelGenerator: REJECTED {} setup - RRR {:.2} < {:.2}",
                side, rrr, self.config.min_rrr
            );
            return Err(Rejection::BelowMinRrr {
                rrr,
                required: self.config.min_rrr,
            }
            .into());
        }
        // Noise inside the tolerance never reports a ratio under the floor
        let rrr = rrr.max(self.config.min_rrr);

        let position_size_units =
            SizingEngine::calculate_units(self.config.risk_budget(), entry, stop_loss);

        Ok(TradeLevels {
            side,
            ob_kind: zone.kind,
            entry,
            stop_loss,
            take_profit_1,
            take_profit_2,
            rrr,
            required_rrr: self.config.min_rrr,
            position_size_units,
            is_counter_trend: side.opposes(bias),
        })
    }

    fn check_placement(&self, side: TradeSide, entry: f64, price: f64) -> Result<(), Rejection> {
        let on_limit_side = match side {
            TradeSide::Long => entry < price,
            TradeSide::Short => entry > price,
        };
        if !on_limit_side {
            debug!(
                "TradeLevelGenerator: REJECTED {} setup - entry {:.4} vs price {:.4}",
                side, entry, price
            );
            return Err(Rejection::WrongSide { entry, price });
        }

        let distance = (entry - price).abs() / price;
        if distance > self.config.distance_tolerance_pct {
            debug!(
                "TradeLevelGenerator: REJECTED {} setup - {:.2}% from price",
                side,
                distance * 100.0
            );
            return Err(Rejection::TooFar {
                distance_pct: distance * 100.0,
                tolerance_pct: self.config.distance_tolerance_pct * 100.0,
            });
        }

        Ok(())
    }
}

impl Default for TradeLevelGenerator {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}
