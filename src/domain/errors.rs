use serde::Serialize;
use thiserror::Error;

/// Why an indicator, detector or trade setup produced no value.
///
/// Neither variant is a fault: both are ordinary outcomes that the signal
/// composer folds into one of its narrative branches.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum Unavailable {
    #[error("Insufficient history: need {required} data points, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("No qualifying signal: {0}")]
    NoQualifyingSignal(Rejection),
}

impl Unavailable {
    pub fn insufficient(required: usize, available: usize) -> Self {
        Self::InsufficientHistory {
            required,
            available,
        }
    }

    pub fn is_insufficient_history(&self) -> bool {
        matches!(self, Self::InsufficientHistory { .. })
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::NoQualifyingSignal(reason) => Some(*reason),
            Self::InsufficientHistory { .. } => None,
        }
    }
}

impl From<Rejection> for Unavailable {
    fn from(reason: Rejection) -> Self {
        Self::NoQualifyingSignal(reason)
    }
}

/// Filters that turn a candidate zone away
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize)]
pub enum Rejection {
    #[error("no order block in the scan window")]
    NoOrderBlock,

    #[error("zone mid {entry:.4} is on the wrong side of price {price:.4} for a limit order")]
    WrongSide { entry: f64, price: f64 },

    #[error("zone is {distance_pct:.2}% from price, tolerance is {tolerance_pct:.2}%")]
    TooFar {
        distance_pct: f64,
        tolerance_pct: f64,
    },

    #[error("stop-loss coincides with entry")]
    ZeroRisk,

    #[error("reward/risk {rrr:.2} below required {required:.2}")]
    BelowMinRrr { rrr: f64, required: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_formatting() {
        let err = Unavailable::insufficient(15, 4);
        let msg = err.to_string();
        assert!(msg.contains("15"));
        assert!(msg.contains("4"));
        assert!(err.is_insufficient_history());
        assert_eq!(err.rejection(), None);
    }

    #[test]
    fn test_rejection_formatting() {
        let err: Unavailable = Rejection::TooFar {
            distance_pct: 6.0,
            tolerance_pct: 5.0,
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("6.00%"));
        assert!(msg.contains("5.00%"));
        assert!(!err.is_insufficient_history());
    }
}
