//! Goal seeking: invert the SIP formula for contribution or duration

use log::{debug, warn};

use crate::error::{ProjectionError, ProjectionResult};
use super::engine::annuity_due_factor;
use super::params::{
    ensure_finite, ensure_finite_rate, ensure_horizon, ensure_positive_amount,
    ensure_positive_growth_factor, monthly_rate, MAX_PROJECTION_YEARS, MONTHS_PER_YEAR,
};

/// Monthly contribution that grows to `target_amount` after `years`.
///
/// With a zero return rate this is `target_amount / months`.
pub fn required_periodic_contribution(
    target_amount: f64,
    years: u32,
    annual_return_rate_pct: f64,
) -> ProjectionResult<f64> {
    ensure_positive_amount("target_amount", target_amount)?;
    ensure_horizon(years, MAX_PROJECTION_YEARS)?;

    let r = monthly_rate(annual_return_rate_pct);
    ensure_positive_growth_factor("annual_return_rate_pct", annual_return_rate_pct, r)?;

    let months = years * MONTHS_PER_YEAR;
    if r == 0.0 {
        debug!("Zero return rate, splitting target evenly over {} months", months);
    }

    let factor = annuity_due_factor(r, months);
    if factor == 0.0 || !factor.is_finite() {
        return Err(ProjectionError::InvalidRate {
            field: "annual_return_rate_pct",
            value: annual_return_rate_pct,
            reason: format!("annuity factor over {} months is {}", months, factor),
        });
    }

    ensure_finite("required_periodic_contribution", target_amount / factor)
}

/// Years of monthly contributions needed to reach `target_amount`.
///
/// The answer is real-valued; a target smaller than one contribution gives a
/// duration under one month. A zero return rate gives the straight-line
/// `target_amount / (periodic_amount * 12)`.
pub fn required_duration(
    periodic_amount: f64,
    target_amount: f64,
    annual_return_rate_pct: f64,
) -> ProjectionResult<f64> {
    ensure_positive_amount("periodic_amount", periodic_amount)?;
    ensure_positive_amount("target_amount", target_amount)?;
    ensure_finite_rate("annual_return_rate_pct", annual_return_rate_pct)?;

    let r = monthly_rate(annual_return_rate_pct);
    ensure_positive_growth_factor("annual_return_rate_pct", annual_return_rate_pct, r)?;

    if r == 0.0 {
        debug!("Zero return rate, straight-line duration");
        return ensure_finite(
            "required_duration",
            target_amount / (periodic_amount * MONTHS_PER_YEAR as f64),
        );
    }

    // (1+r)^n = 1 + T*r / (P*(1+r))
    let ratio = target_amount * r / (periodic_amount * (1.0 + r));
    if !ratio.is_finite() {
        return Err(ProjectionError::NonFiniteResult { quantity: "required_duration" });
    }
    if 1.0 + ratio <= 0.0 {
        warn!(
            "Goal {} unreachable at {} per month and {}% return",
            target_amount, periodic_amount, annual_return_rate_pct
        );
        return Err(ProjectionError::GoalUnreachable {
            target: target_amount,
            periodic_amount,
            annual_return_rate_pct,
        });
    }

    let months = ratio.ln_1p() / r.ln_1p();
    ensure_finite("required_duration", months / MONTHS_PER_YEAR as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::engine::project_recurring;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_contribution_round_trip() {
        for (target, years, rate) in [(1_000_000.0, 10, 12.0), (250_000.0, 3, 7.5), (5e7, 30, 15.0)] {
            let amount = required_periodic_contribution(target, years, rate).unwrap();
            let series = project_recurring(amount, years, rate, 6.0).unwrap();
            let reached = series.final_point().unwrap().expected_amount;
            assert_relative_eq!(reached, target, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_contribution_zero_rate() {
        let amount = required_periodic_contribution(600_000.0, 10, 0.0).unwrap();
        assert_eq!(amount, 5000.0);
    }

    #[test]
    fn test_contribution_at_tiny_rate() {
        let amount = required_periodic_contribution(120_000.0, 10, 1e-9).unwrap();
        assert_abs_diff_eq!(amount, 999.999_999_949_583, epsilon = 1e-9);
    }

    #[test]
    fn test_contribution_reference_value() {
        let amount = required_periodic_contribution(1_161_695.38, 10, 12.0).unwrap();
        assert_abs_diff_eq!(amount, 5000.0, epsilon = 1e-3);
    }

    #[test]
    fn test_contribution_rejects_degenerate_inputs() {
        assert!(matches!(
            required_periodic_contribution(0.0, 10, 12.0),
            Err(ProjectionError::InvalidAmount { field: "target_amount", .. })
        ));
        assert!(matches!(
            required_periodic_contribution(1000.0, 0, 12.0),
            Err(ProjectionError::InvalidHorizon { .. })
        ));
        assert!(matches!(
            required_periodic_contribution(1000.0, 10, -1200.0),
            Err(ProjectionError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_duration_inverts_projection() {
        let series = project_recurring(5000.0, 10, 12.0, 6.0).unwrap();
        let target = series.final_point().unwrap().expected_amount;
        let years = required_duration(5000.0, target, 12.0).unwrap();
        assert_relative_eq!(years, 10.0, max_relative = 1e-9);
    }

    #[test]
    fn test_duration_zero_rate() {
        let years = required_duration(5000.0, 600_000.0, 0.0).unwrap();
        assert_eq!(years, 10.0);
    }

    #[test]
    fn test_duration_under_one_month() {
        let years = required_duration(1_000_000.0, 1000.0, 12.0).unwrap();
        assert!(years > 0.0);
        assert!(years < 1.0 / 12.0);
    }

    #[test]
    fn test_duration_negative_rate() {
        // Reachable: losses are small relative to the target
        let years = required_duration(1000.0, 10_000.0, -3.0).unwrap();
        assert!(years > 10_000.0 / 12_000.0);

        // Unreachable: value saturates below the target
        assert!(matches!(
            required_duration(10.0, 1_000_000.0, -50.0),
            Err(ProjectionError::GoalUnreachable { .. })
        ));
    }

    #[test]
    fn test_duration_rejects_invalid_amounts() {
        assert!(required_duration(0.0, 1000.0, 12.0).is_err());
        assert!(required_duration(1000.0, -1.0, 12.0).is_err());
        assert!(required_duration(1000.0, 1000.0, f64::INFINITY).is_err());
    }
}
