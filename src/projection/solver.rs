//! Implied return rate for a SIP goal
//!
//! The SIP future value is strictly increasing in the monthly rate on
//! (-1, inf), so a bracketed bisection always converges when a root exists.

use log::warn;

use crate::error::{ProjectionError, ProjectionResult};
use super::engine::annuity_due_factor;
use super::params::{ensure_horizon, ensure_positive_amount, MAX_PROJECTION_YEARS, MONTHS_PER_YEAR};

/// Lowest monthly rate searched (-99% per month)
const MIN_MONTHLY_RATE: f64 = -0.99;

/// Highest monthly rate searched (100% per month)
const MAX_MONTHLY_RATE: f64 = 1.0;

/// Relative gap below which a target counts as the zero-return straight sum
const TOLERANCE: f64 = 1e-12;

/// Bracket width at which bisection stops (monthly rate)
const RATE_TOLERANCE: f64 = 1e-15;
const MAX_ITERATIONS: u32 = 500;

/// Find a root of an increasing function inside `[low, high]` by bisection.
///
/// Returns `None` if the function does not change sign over the bracket.
pub fn bisect<F>(f: F, mut low: f64, mut high: f64) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let f_low = f(low);
    let f_high = f(high);

    if f_low == 0.0 {
        return Some(low);
    }
    if f_high == 0.0 {
        return Some(high);
    }
    if f_low * f_high > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let f_mid = f(mid);

        if f_mid == 0.0 || (high - low) / 2.0 < RATE_TOLERANCE {
            return Some(mid);
        }

        if f_mid * f(low) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    Some((low + high) / 2.0)
}

/// Annual return (percent) at which `periodic_amount` per month reaches
/// `target_amount` after `years`.
pub fn required_return_rate(
    periodic_amount: f64,
    years: u32,
    target_amount: f64,
) -> ProjectionResult<f64> {
    ensure_positive_amount("periodic_amount", periodic_amount)?;
    ensure_positive_amount("target_amount", target_amount)?;
    ensure_horizon(years, MAX_PROJECTION_YEARS)?;

    let months = years * MONTHS_PER_YEAR;
    let straight_sum = periodic_amount * months as f64;
    if ((target_amount - straight_sum) / target_amount).abs() < TOLERANCE {
        return Ok(0.0);
    }

    // Scale by the target so the residual stays well-conditioned
    let residual = |r: f64| {
        let value = periodic_amount * annuity_due_factor(r, months) / target_amount - 1.0;
        if value.is_nan() {
            f64::INFINITY
        } else {
            value
        }
    };

    let unreachable = || {
        warn!(
            "No return rate in [{}%, {}%] reaches {} with {} per month over {} years",
            MIN_MONTHLY_RATE * 1200.0,
            MAX_MONTHLY_RATE * 1200.0,
            target_amount,
            periodic_amount,
            years
        );
        ProjectionError::NoReturnRate {
            target: target_amount,
            periodic_amount,
            years,
        }
    };

    let monthly = bisect(residual, MIN_MONTHLY_RATE, MAX_MONTHLY_RATE).ok_or_else(unreachable)?;
    Ok(monthly * MONTHS_PER_YEAR as f64 * 100.0)
}
