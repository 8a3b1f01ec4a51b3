use crate::domain::errors::{Rejection, Unavailable};
use crate::domain::market::candle::Candle;
use crate::domain::trading::types::{LiquiditySweep, OrderBlock, OrderBlockKind};

/// Smart Money Concepts (SMC) Order Block detection
///
/// An order block is the body of a recent opposite-colored candle that marks
/// where institutional orders presumably rest:
/// 1. Bearish candle -> Demand zone (expected to be bought on a revisit).
/// 2. Bullish candle -> Supply zone (expected to be sold on a revisit).
///
/// The scan walks the window oldest to newest and returns the first match,
/// so older zones win over ones closer to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBlockDetector {
    pub window: usize,
}

impl OrderBlockDetector {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Scans indices `len - window ..= len - 2`; the newest candle only
    /// supplies the current close.
    pub fn detect(&self, candles: &[Candle]) -> Result<OrderBlock, Unavailable> {
        if candles.len() < self.window || candles.len() < 2 {
            return Err(Unavailable::insufficient(self.window.max(2), candles.len()));
        }

        let current_price = candles[candles.len() - 1].close;
        let start = candles.len() - self.window;

        for candle in &candles[start..candles.len() - 1] {
            // Price already trading inside the body has consumed the zone
            let (body_low, body_high) = candle.body_bounds();
            if body_low < current_price && current_price < body_high {
                continue;
            }

            let kind = if candle.is_bearish() {
                OrderBlockKind::Demand
            } else if candle.is_bullish() {
                OrderBlockKind::Supply
            } else {
                continue;
            };

            return Ok(OrderBlock::new(kind, candle.low, candle.high));
        }

        Err(Rejection::NoOrderBlock.into())
    }
}

impl Default for OrderBlockDetector {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Stop-hunt detection on the most recent candles.
///
/// Only used as confluence for a setup, never as a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquiditySweepDetector {
    pub window: usize,
}

impl LiquiditySweepDetector {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Compares the last candle with the `window - 1` candles before it.
    /// A buy-side sweep is checked first and wins when both sides break.
    pub fn detect(&self, candles: &[Candle]) -> Result<LiquiditySweep, Unavailable> {
        let window = self.window.max(2);
        if candles.len() < window {
            return Err(Unavailable::insufficient(window, candles.len()));
        }

        let recent = &candles[candles.len() - window..];
        let (last, prior) = match recent.split_last() {
            Some(split) => split,
            None => return Ok(LiquiditySweep::NoSweep),
        };

        let prior_high = prior.iter().map(|c| c.high).fold(f64::MIN, f64::max);
        let prior_low = prior.iter().map(|c| c.low).fold(f64::MAX, f64::min);

        if last.high > prior_high {
            Ok(LiquiditySweep::BuySide)
        } else if last.low < prior_low {
            Ok(LiquiditySweep::SellSide)
        } else {
            Ok(LiquiditySweep::NoSweep)
        }
    }
}

impl Default for LiquiditySweepDetector {
    fn default() -> Self {
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle::new(0, open, high, low, close, 1000.0)
    }

    fn doji(price: f64) -> Candle {
        mock_candle(price, price + 1.0, price - 1.0, price)
    }

    #[test]
    fn test_ob_insufficient_history() {
        let candles = vec![doji(100.0); 9];
        let err = OrderBlockDetector::default().detect(&candles).unwrap_err();
        assert_eq!(err, Unavailable::insufficient(10, 9));
    }

    #[test]
    fn test_ob_returns_oldest_qualifying_candle() {
        let mut candles = Vec::new();
        // Older history outside the scan window is ignored
        candles.push(mock_candle(120.0, 121.0, 90.0, 95.0));
        // Index len-10: bearish candle -> Demand
        candles.push(mock_candle(98.0, 99.0, 94.0, 95.0));
        // Index len-9: bullish candle -> Supply (newer, must not win)
        candles.push(mock_candle(96.0, 104.0, 95.5, 103.0));
        for _ in 0..7 {
            candles.push(doji(100.0));
        }
        // Current candle closes at 100
        candles.push(doji(100.0));
        assert_eq!(candles.len(), 11);

        let ob = OrderBlockDetector::default().detect(&candles).unwrap();
        assert_eq!(ob.kind, OrderBlockKind::Demand);
        assert_eq!(ob.low, 94.0);
        assert_eq!(ob.high, 99.0);
        assert_eq!(ob.mid, 96.5);
    }

    #[test]
    fn test_ob_skips_candle_containing_current_price() {
        let mut candles = Vec::new();
        // Bearish body 95..105 contains the current close of 100
        candles.push(mock_candle(105.0, 106.0, 94.0, 95.0));
        // Bullish body 100.5..102 lies above price -> Supply
        candles.push(mock_candle(100.5, 103.0, 100.0, 102.0));
        for _ in 0..7 {
            candles.push(doji(100.0));
        }
        candles.push(doji(100.0));

        let ob = OrderBlockDetector::default().detect(&candles).unwrap();
        assert_eq!(ob.kind, OrderBlockKind::Supply);
        assert_eq!(ob.high, 103.0);
    }

    #[test]
    fn test_ob_ignores_newest_candle() {
        let mut candles = vec![doji(100.0); 9];
        // Only the newest candle has a body; it is never a candidate
        candles.push(mock_candle(104.0, 105.0, 99.0, 100.0));
        let err = OrderBlockDetector::default().detect(&candles).unwrap_err();
        assert_eq!(err, Unavailable::NoQualifyingSignal(Rejection::NoOrderBlock));
    }

    #[test]
    fn test_buy_side_sweep() {
        let candles = vec![
            doji(100.0),
            doji(100.0),
            doji(100.0),
            doji(100.0),
            mock_candle(100.0, 102.0, 99.5, 100.5),
        ];
        assert_eq!(
            LiquiditySweepDetector::default().detect(&candles).unwrap(),
            LiquiditySweep::BuySide
        );
    }

    #[test]
    fn test_sell_side_sweep() {
        let candles = vec![
            doji(100.0),
            doji(100.0),
            doji(100.0),
            doji(100.0),
            mock_candle(100.0, 100.5, 98.0, 99.5),
        ];
        assert_eq!(
            LiquiditySweepDetector::default().detect(&candles).unwrap(),
            LiquiditySweep::SellSide
        );
    }

    #[test]
    fn test_buy_side_wins_when_both_break() {
        let candles = vec![
            doji(100.0),
            doji(100.0),
            doji(100.0),
            doji(100.0),
            mock_candle(100.0, 103.0, 97.0, 100.0),
        ];
        assert_eq!(
            LiquiditySweepDetector::default().detect(&candles).unwrap(),
            LiquiditySweep::BuySide
        );
    }

    #[test]
    fn test_no_sweep_inside_range() {
        let candles = vec![doji(100.0); 6];
        assert_eq!(
            LiquiditySweepDetector::default().detect(&candles).unwrap(),
            LiquiditySweep::NoSweep
        );
    }

    #[test]
    fn test_sweep_needs_five_candles() {
        let candles = vec![doji(100.0); 4];
        assert!(
            LiquiditySweepDetector::default()
                .detect(&candles)
                .unwrap_err()
                .is_insufficient_history()
        );
    }
}
