//! Classical technical indicators
//!
//! Pure functions over closing prices or candles. RSI and ATR are
//! deliberately simple single-window averages rather than Wilder-smoothed
//! forms; callers decide which window they pass in.

use crate::domain::errors::Unavailable;
use crate::domain::market::candle::Candle;

/// Relative Strength Index over the first `period` deltas of `closes`.
///
/// Uses the plain mean of gains and losses in that window. A window without
/// losses reads 100 when it has gains and 50 when it is completely flat.
///
/// # Returns
/// * `Ok(f64)` - RSI in [0, 100]
/// * `Err(InsufficientHistory)` - fewer than `period + 1` closes
pub fn rsi(closes: &[f64], period: usize) -> Result<f64, Unavailable> {
    if period == 0 || closes.len() < period + 1 {
        return Err(Unavailable::insufficient(period + 1, closes.len()));
    }

    let (gain_sum, loss_sum) = closes
        .windows(2)
        .take(period)
        .fold((0.0, 0.0), |(gains, losses), w| {
            let delta = w[1] - w[0];
            if delta > 0.0 {
                (gains + delta, losses)
            } else {
                (gains, losses - delta)
            }
        });

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return Ok(if avg_gain > 0.0 { 100.0 } else { 50.0 });
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - 100.0 / (1.0 + rs))
}

/// The trailing `period + 1` closes, i.e. the latest RSI window.
pub fn latest_rsi_window(closes: &[f64], period: usize) -> &[f64] {
    &closes[closes.len().saturating_sub(period + 1)..]
}

/// Exponential Moving Average seeded with the SMA of the first `period` points.
///
/// Output has `series.len() - period + 1` values; empty when the series is
/// shorter than `period`.
pub fn ema(series: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || series.len() < period {
        return Vec::new();
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let seed = series[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(series.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for &value in &series[period..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        result.push(prev);
    }

    result
}

/// Latest MACD-line value, EMA(fast) - EMA(slow).
///
/// The longer fast EMA is right-aligned with the slow one by dropping its
/// extra leading points. Signal and histogram lines are not computed.
pub fn macd(closes: &[f64], fast: usize, slow: usize) -> Result<f64, Unavailable> {
    if closes.len() < slow {
        return Err(Unavailable::insufficient(slow, closes.len()));
    }

    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    if fast_ema.is_empty() || slow_ema.is_empty() {
        return Err(Unavailable::insufficient(fast.max(slow), closes.len()));
    }

    let skip = fast_ema.len().saturating_sub(slow_ema.len());
    fast_ema[skip..]
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .last()
        .ok_or(Unavailable::insufficient(slow, closes.len()))
}

/// Average True Range as the plain mean of the last `period` true ranges.
///
/// True range needs a previous close, so more than `period` candles are
/// required; otherwise 0.0 is returned.
pub fn atr(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() <= period {
        return 0.0;
    }

    let true_ranges: Vec<f64> = candles
        .windows(2)
        .map(|w| true_range(&w[1], w[0].close))
        .collect();

    true_ranges[true_ranges.len() - period..].iter().sum::<f64>() / period as f64
}

fn true_range(candle: &Candle, prev_close: f64) -> f64 {
    (candle.high - candle.low)
        .max((candle.high - prev_close).abs())
        .max((candle.low - prev_close).abs())
}
