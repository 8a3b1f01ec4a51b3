use crate::domain::analysis::Volatility;

/// Buckets ATR relative to price.
///
/// `atr / price` above `high_ratio` is High, below `low_ratio` is Low,
/// anything else (including a non-positive price) is Moderate.
pub fn classify_volatility(atr: f64, price: f64, low_ratio: f64, high_ratio: f64) -> Volatility {
    if price <= 0.0 || !price.is_finite() {
        return Volatility::Moderate;
    }

    let ratio = atr / price;
    if ratio > high_ratio {
        Volatility::High
    } else if ratio < low_ratio {
        Volatility::Low
    } else {
        Volatility::Moderate
    }
}
