use crate::domain::market::bias::Bias;
use crate::domain::market::candle::Candle;

/// Classifies trend bias from the slope across the whole supplied window.
///
/// This is a whole-window proxy, not a rolling measure: pass exactly the
/// lookback that should be classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureClassifier {
    min_candles: usize,
    slope_threshold: f64,
}

impl StructureClassifier {
    pub fn new(min_candles: usize, slope_threshold: f64) -> Self {
        Self {
            min_candles,
            slope_threshold,
        }
    }

    pub fn classify(&self, candles: &[Candle]) -> Bias {
        if candles.len() < self.min_candles.max(2) {
            return Bias::Sideways;
        }

        let first = candles[0].close;
        let last = candles[candles.len() - 1].close;
        if first == 0.0 {
            return Bias::Sideways;
        }

        let slope = (last - first) / first;
        if slope > self.slope_threshold {
            Bias::Bullish
        } else if slope < -self.slope_threshold {
            Bias::Bearish
        } else {
            Bias::Sideways
        }
    }
}

impl Default for StructureClassifier {
    fn default() -> Self {
        Self::new(20, 0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(n: usize, first: f64, last: f64) -> Vec<Candle> {
        let step = (last - first) / (n as f64 - 1.0);
        (0..n)
            .map(|i| {
                let close = if i == n - 1 { last } else { first + step * i as f64 };
                Candle::new(i as i64, close, close, close, close, 1.0)
            })
            .collect()
    }

    #[test]
    fn test_too_few_candles_is_sideways() {
        let classifier = StructureClassifier::default();
        assert_eq!(classifier.classify(&linear(19, 100.0, 150.0)), Bias::Sideways);
    }

    #[test]
    fn test_flat_is_sideways() {
        let classifier = StructureClassifier::default();
        assert_eq!(classifier.classify(&linear(30, 100.0, 100.0)), Bias::Sideways);
    }

    #[test]
    fn test_exact_one_percent_is_not_trending() {
        let classifier = StructureClassifier::default();
        assert_eq!(classifier.classify(&linear(20, 100.0, 101.0)), Bias::Sideways);
        assert_eq!(classifier.classify(&linear(20, 100.0, 99.0)), Bias::Sideways);
    }

    #[test]
    fn test_just_beyond_one_percent_is_trending() {
        let classifier = StructureClassifier::default();
        assert_eq!(classifier.classify(&linear(20, 100.0, 101.01)), Bias::Bullish);
        assert_eq!(classifier.classify(&linear(20, 100.0, 98.99)), Bias::Bearish);
    }

    #[test]
    fn test_slope_uses_endpoints_only() {
        let classifier = StructureClassifier::default();
        let mut candles = linear(25, 100.0, 105.0);
        // Deep dip mid-window does not change the whole-window slope
        candles[12].close = 50.0;
        assert_eq!(classifier.classify(&candles), Bias::Bullish);
    }
}
