use serde::{Deserialize, Serialize};
use std::fmt;

/// Derivatives positioning snapshot for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    #[serde(default)]
    pub funding_rate: f64,
    #[serde(default = "default_long_short_ratio")]
    pub long_short_ratio: f64,
}

fn default_long_short_ratio() -> f64 {
    1.0
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            funding_rate: 0.0,
            long_short_ratio: default_long_short_ratio(),
        }
    }
}

/// Squeeze risk implied by an extreme funding rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundingWarning {
    /// Longs are paying heavily; a flush of longs is likely.
    LongSqueeze,
    /// Shorts are paying heavily; a short squeeze is likely.
    ShortSqueeze,
}

impl FundingWarning {
    pub fn from_funding_rate(funding_rate: f64, threshold: f64) -> Option<Self> {
        if funding_rate > threshold {
            Some(Self::LongSqueeze)
        } else if funding_rate < -threshold {
            Some(Self::ShortSqueeze)
        } else {
            None
        }
    }
}

impl fmt::Display for FundingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LongSqueeze => write!(f, "Funding rate is high. Long squeeze risk is rising."),
            Self::ShortSqueeze => write!(
                f,
                "Funding rate is deeply negative. Short squeeze risk is rising."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let s: Sentiment = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Sentiment::default());
        assert_eq!(s.long_short_ratio, 1.0);
    }

    #[test]
    fn test_funding_warning_thresholds() {
        assert_eq!(
            FundingWarning::from_funding_rate(0.0006, 0.0005),
            Some(FundingWarning::LongSqueeze)
        );
        assert_eq!(
            FundingWarning::from_funding_rate(-0.0006, 0.0005),
            Some(FundingWarning::ShortSqueeze)
        );
        assert_eq!(FundingWarning::from_funding_rate(0.0005, 0.0005), None);
        assert_eq!(FundingWarning::from_funding_rate(-0.0005, 0.0005), None);
    }
}
