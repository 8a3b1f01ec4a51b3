use tracing::debug;

pub struct SizingEngine;

impl SizingEngine {
    /// Whole units that lose exactly `risk_budget` (or less) when stopped out.
    ///
    /// Returns 0 when the stop distance is not positive or the budget cannot
    /// cover a single unit.
    pub fn calculate_units(risk_budget: f64, entry: f64, stop_loss: f64) -> u64 {
        let risk_per_unit = (entry - stop_loss).abs();
        if !risk_per_unit.is_finite() || risk_per_unit <= 0.0 || risk_budget <= 0.0 {
            debug!(
                "SizingEngine: Cannot size position - RiskBudget={}, RiskPerUnit={}",
                risk_budget, risk_per_unit
            );
            return 0;
        }

        let units = (risk_budget / risk_per_unit).floor();

        debug!(
            "SizingEngine: {} units (${:.2} budget / ${:.4} risk per unit)",
            units, risk_budget, risk_per_unit
        );

        // `as` saturates for values beyond u64::MAX
        units as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_percent_of_ten_thousand_over_two_dollar_stop() {
        assert_eq!(SizingEngine::calculate_units(100.0, 100.0, 98.0), 50);
    }

    #[test]
    fn test_floors_fractional_units() {
        assert_eq!(SizingEngine::calculate_units(100.0, 100.0, 97.0), 33);
        // Short side: stop above entry
        assert_eq!(SizingEngine::calculate_units(100.0, 100.0, 103.0), 33);
    }

    #[test]
    fn test_zero_risk_is_zero_units() {
        assert_eq!(SizingEngine::calculate_units(100.0, 100.0, 100.0), 0);
    }

    #[test]
    fn test_budget_smaller_than_unit_risk() {
        assert_eq!(SizingEngine::calculate_units(1.0, 100.0, 90.0), 0);
    }
}
