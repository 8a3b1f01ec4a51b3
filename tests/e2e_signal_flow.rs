use hybrid_analyzer::application::analysis::SignalComposer;
use hybrid_analyzer::domain::analysis::{Decision, MarketDataBundle, Recommendation};
use hybrid_analyzer::domain::config::{AnalysisConfig, RiskConfig};
use hybrid_analyzer::domain::market::bias::Bias;
use hybrid_analyzer::domain::market::candle::{Candle, CandleSeries};
use hybrid_analyzer::domain::market::timeframe::Timeframe;
use hybrid_analyzer::domain::sentiment::{FundingWarning, Sentiment};
use hybrid_analyzer::domain::trading::types::{OrderBlockKind, TradeSide};
use std::collections::BTreeMap;

fn stamp(candles: Vec<Candle>, timeframe: Timeframe) -> CandleSeries {
    let stamped = candles
        .into_iter()
        .enumerate()
        .map(|(i, mut c)| {
            c.open_time = i as i64 * timeframe.to_millis();
            c
        })
        .collect();
    CandleSeries::new(stamped).unwrap()
}

fn doji(price: f64, spread: f64) -> Candle {
    Candle::new(0, price, price + spread, price - spread, price, 10.0)
}

/// 4h uptrend from 95 with a bearish candle (body 99.5..100.5, range 99..101)
/// at the oldest scan slot and price closing at 102.
fn governing_with_demand_zone() -> Vec<Candle> {
    let mut candles: Vec<Candle> = (0..30)
        .map(|i| doji(95.0 + i as f64 * 5.0 / 29.0, 0.05))
        .collect();
    candles[20] = Candle::new(0, 100.5, 101.0, 99.0, 99.5, 10.0);
    candles[29] = Candle::new(0, 101.9, 102.1, 101.8, 102.0, 10.0);
    candles
}

/// 1h climb from 100 to 102, then a choppy stretch whose last 15 closes
/// gain 1.375 and lose 1.125 in total (RSI 55), ending with a stop-run below
/// the lows.
fn trigger_with_sell_side_sweep() -> Vec<Candle> {
    let mut closes: Vec<f64> = (0..26).map(|i| 100.0 + i as f64 * 0.0625).collect();
    let mut close = 101.75;
    closes.push(close);
    for delta in [
        0.25, -0.25, 0.25, -0.25, 0.25, -0.25, 0.25, -0.25, 0.125, -0.125, 0.125, 0.0, 0.125,
    ] {
        close += delta;
        closes.push(close);
    }

    let mut candles: Vec<Candle> = closes.into_iter().map(|c| doji(c, 0.05)).collect();
    candles.push(Candle::new(0, 102.0, 102.0, 101.0, 102.0, 10.0));
    candles
}

fn bundle(sentiment: Sentiment) -> MarketDataBundle {
    let mut candles = BTreeMap::new();
    candles.insert(
        Timeframe::OneHour,
        stamp(trigger_with_sell_side_sweep(), Timeframe::OneHour),
    );
    candles.insert(
        Timeframe::FourHour,
        stamp(governing_with_demand_zone(), Timeframe::FourHour),
    );
    MarketDataBundle::from_series("BTC/USDT", candles, sentiment, Timeframe::OneHour).unwrap()
}

#[test]
fn test_demand_zone_in_uptrend_yields_long_limit_order() {
    let composer = SignalComposer::default();
    let result = composer.analyze(&bundle(Sentiment::default()));

    assert_eq!(result.coin_name, "BTC");
    assert_eq!(result.current_price, 102.0);
    assert_eq!(result.bias(Timeframe::FourHour), Bias::Bullish);
    assert_eq!(result.bias(Timeframe::OneHour), Bias::Bullish);
    assert!((result.indicators.rsi.unwrap() - 55.0).abs() < 1e-9);
    assert_eq!(result.recommendation, Recommendation::LimitOrder(TradeSide::Long));
    assert_eq!(result.recommendation.to_string(), "Long (Limit Order)");
    assert!(result.setup_rejection.is_none());

    let levels = result.trade_levels.as_ref().unwrap();
    assert_eq!(levels.ob_kind, OrderBlockKind::Demand);
    assert_eq!(levels.entry, 100.0);
    assert!(levels.stop_loss < 99.0);
    assert!(levels.take_profit_1 > result.current_price);
    assert!(levels.take_profit_2 > levels.take_profit_1);
    assert!(levels.rrr >= levels.required_rrr);
    assert!(levels.position_size_units > 0);
    assert!(!levels.is_counter_trend);

    assert!(matches!(
        result.decision,
        Decision::LimitOrder {
            sweep_confirmed: true,
            counter_trend: false,
            ..
        }
    ));

    let text = &result.narrative;
    assert!(text.contains("BULLISH REVERSAL EXPECTED"));
    assert!(text.contains("Entry: 100.0000"));
    assert!(text.contains("Stop-loss:"));
    assert!(text.contains("TP1:"));
    assert!(text.contains(&format!("{} units", levels.position_size_units)));
}

#[test]
fn test_tighter_rrr_floor_falls_back_to_wait() {
    let risk = RiskConfig {
        min_rrr: 3.0,
        ..RiskConfig::default()
    };
    let composer = SignalComposer::new(AnalysisConfig::default(), risk);
    let result = composer.analyze(&bundle(Sentiment::default()));

    assert!(result.trade_levels.is_none());
    assert!(result.order_block.is_some());
    assert!(result.setup_rejection.is_some());
    // 1h RSI sits at 55, well below overbought
    assert_eq!(result.recommendation, Recommendation::Wait(Bias::Bullish));
}

#[test]
fn test_funding_overlay_accompanies_limit_order() {
    let composer = SignalComposer::default();
    let result = composer.analyze(&bundle(Sentiment {
        funding_rate: -0.002,
        long_short_ratio: 0.6,
    }));

    assert!(result.has_trade_levels());
    assert_eq!(result.funding_warning, Some(FundingWarning::ShortSqueeze));
    assert!(result.narrative.contains("SENTIMENT WARNING"));
}

#[test]
fn test_result_serializes_for_presentation() {
    let result = SignalComposer::default().analyze(&bundle(Sentiment::default()));
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["recommendation"], "Long (Limit Order)");
    assert_eq!(json["market_structure"]["4h"], "Bullish");
    assert_eq!(json["decision"]["branch"], "LimitOrder");
    assert_eq!(json["trade_levels"]["side"], "Long");
}
