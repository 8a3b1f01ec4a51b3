//! Human-readable rendering of an `AnalysisResult`.
//!
//! Everything here reads from the already-decided result; no thresholds are
//! re-evaluated, so the text can never disagree with the `Decision` record.

use crate::domain::analysis::{AnalysisResult, Decision};
use crate::domain::config::{AnalysisConfig, RiskConfig};
use crate::domain::market::bias::Bias;
use crate::domain::trading::types::{TradeLevels, TradeSide};

pub fn render(result: &AnalysisResult, config: &AnalysisConfig, risk: &RiskConfig) -> String {
    let mut text = String::new();
    let governing = config.governing_timeframe;

    match &result.decision {
        Decision::LimitOrder {
            side,
            ob_kind,
            rrr,
            sweep_confirmed,
            counter_trend,
        } => {
            let direction = match side {
                TradeSide::Long => "BULLISH",
                TradeSide::Short => "BEARISH",
            };
            text.push_str(&format!(
                "RECOMMENDATION: {} REVERSAL EXPECTED. Price is approaching a {} order block on the {} timeframe. ",
                direction, ob_kind, governing
            ));
            if *sweep_confirmed {
                text.push_str(&format!(
                    "A {} on the {} timeframe confirms the setup. ",
                    result.liquidity.to_string().to_lowercase(),
                    config.trigger_timeframe
                ));
            } else {
                text.push_str("Liquidity sweep NOT confirmed. ");
            }
            text.push_str(&format!("RRR passes the filter ({:.2}). ", rrr));
            if *counter_trend {
                text.push_str(&format!(
                    "WARNING: this {} setup trades against the {} {} structure. ",
                    side,
                    result.bias(governing),
                    governing
                ));
            }
            if let Some(levels) = &result.trade_levels {
                text.push('\n');
                text.push_str(&level_details(levels, risk));
            }
        }
        Decision::AwaitRetracement { bias, rsi } => {
            let (zone, order) = match bias {
                Bias::Bearish => ("supply", "sell"),
                _ => ("demand", "buy"),
            };
            text.push_str(&format!(
                "{} structure on {} with RSI at {:.1}. No precise order block within range yet. \
                 Look for a {} limit at the next {} zone.",
                bias, governing, rsi, order, zone
            ));
        }
        Decision::Consolidation { bias, rsi } => {
            let rsi = rsi
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "n/a".to_string());
            text.push_str(&format!(
                "{} structure on {} but momentum is stretched (RSI {}). Expect consolidation before the next leg.",
                bias, governing, rsi
            ));
        }
        Decision::AvoidDirectional => {
            text.push_str("Market is Sideways. Avoid directional trades.");
        }
    }

    if let Some(warning) = result.funding_warning {
        text.push_str(&format!("\nSENTIMENT WARNING: {}", warning));
    }

    text
}

fn level_details(levels: &TradeLevels, risk: &RiskConfig) -> String {
    format!(
        "Entry: {:.4} | Stop-loss: {:.4} | TP1: {:.4} | TP2: {:.4} | Size: {} units ({}% risk)",
        levels.entry,
        levels.stop_loss,
        levels.take_profit_1,
        levels.take_profit_2,
        levels.position_size_units,
        risk.risk_per_trade_percent
    )
}
