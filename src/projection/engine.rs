//! Core projection engine for recurring (SIP) and lumpsum investments

use log::debug;

use crate::error::ProjectionResult;
use super::goal;
use super::params::{
    ensure_finite, ensure_finite_rate, ensure_horizon, ensure_positive_amount,
    ensure_positive_growth_factor, monthly_rate, InvestmentMode, InvestmentParameters,
    DEFAULT_INFLATION_RATE_PCT, MAX_PROJECTION_YEARS, MONTHS_PER_YEAR,
};
use super::series::{ProjectionSeries, YearlyProjectionPoint};
use super::solver;

/// Future value of one unit paid at the start of each of `months` periods.
///
/// Falls back to the straight sum `months` when the rate is exactly zero.
/// `(1+r)^n - 1` is evaluated as `exp_m1(n * ln_1p(r))` so tiny rates keep
/// their precision.
pub(crate) fn annuity_due_factor(monthly_rate: f64, months: u32) -> f64 {
    let n = months as f64;
    if monthly_rate == 0.0 {
        return n;
    }
    let growth = if monthly_rate > -1.0 {
        (n * monthly_rate.ln_1p()).exp_m1()
    } else {
        (1.0 + monthly_rate).powi(months as i32) - 1.0
    };
    growth / monthly_rate * (1.0 + monthly_rate)
}

/// Project a fixed monthly contribution, invested at the start of each month.
///
/// Returns one point per completed year, `years` points in ascending order.
pub fn project_recurring(
    periodic_amount: f64,
    years: u32,
    annual_return_rate_pct: f64,
    annual_inflation_rate_pct: f64,
) -> ProjectionResult<ProjectionSeries> {
    ensure_positive_amount("periodic_amount", periodic_amount)?;
    ensure_horizon(years, MAX_PROJECTION_YEARS)?;
    ensure_finite_rate("annual_return_rate_pct", annual_return_rate_pct)?;

    let r = monthly_rate(annual_return_rate_pct);
    let f = monthly_rate(annual_inflation_rate_pct);
    ensure_positive_growth_factor("annual_inflation_rate_pct", annual_inflation_rate_pct, f)?;

    debug!(
        "SIP projection: {} per month for {} years at {}% (inflation {}%)",
        periodic_amount, years, annual_return_rate_pct, annual_inflation_rate_pct
    );
    if r == 0.0 {
        debug!("Zero return rate, using straight-line contributions");
    }

    let mut series = ProjectionSeries::with_capacity(InvestmentMode::Recurring, years);
    for year in 1..=years {
        let months = year * MONTHS_PER_YEAR;

        let invested_amount = periodic_amount * months as f64;
        let expected_amount = ensure_finite(
            "expected_amount",
            periodic_amount * annuity_due_factor(r, months),
        )?;
        let deflator = (1.0 + f).powi(months as i32);
        let inflation_adjusted_amount =
            ensure_finite("inflation_adjusted_amount", expected_amount / deflator)?;

        series.push(YearlyProjectionPoint {
            year,
            invested_amount,
            expected_amount,
            inflation_adjusted_amount,
        });
    }

    Ok(series)
}

/// Project a one-time investment compounded annually.
///
/// `invested_amount` stays at `principal` for every year.
pub fn project_lumpsum(
    principal: f64,
    years: u32,
    annual_return_rate_pct: f64,
    annual_inflation_rate_pct: f64,
) -> ProjectionResult<ProjectionSeries> {
    ensure_positive_amount("principal", principal)?;
    ensure_horizon(years, MAX_PROJECTION_YEARS)?;
    ensure_finite_rate("annual_return_rate_pct", annual_return_rate_pct)?;

    let a = annual_return_rate_pct / 100.0;
    let g = annual_inflation_rate_pct / 100.0;
    ensure_positive_growth_factor("annual_inflation_rate_pct", annual_inflation_rate_pct, g)?;

    debug!(
        "Lumpsum projection: {} for {} years at {}% (inflation {}%)",
        principal, years, annual_return_rate_pct, annual_inflation_rate_pct
    );

    let mut series = ProjectionSeries::with_capacity(InvestmentMode::Lumpsum, years);
    for year in 1..=years {
        let expected_amount =
            ensure_finite("expected_amount", principal * (1.0 + a).powi(year as i32))?;
        let inflation_adjusted_amount = ensure_finite(
            "inflation_adjusted_amount",
            expected_amount / (1.0 + g).powi(year as i32),
        )?;

        series.push(YearlyProjectionPoint {
            year,
            invested_amount: principal,
            expected_amount,
            inflation_adjusted_amount,
        });
    }

    Ok(series)
}

/// Configuration for a projection engine
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Inflation used when a request does not carry one (percent per year)
    pub default_inflation_rate_pct: f64,

    /// Longest horizon this engine accepts
    pub max_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            default_inflation_rate_pct: DEFAULT_INFLATION_RATE_PCT,
            max_years: MAX_PROJECTION_YEARS,
        }
    }
}

/// Stateless projection engine
///
/// Every call computes a fresh result from its inputs; the engine only carries
/// defaults and limits, so it can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Build parameters, filling inflation from the engine default when absent
    pub fn parameters(
        &self,
        amount: f64,
        years: u32,
        annual_return_rate_pct: f64,
        annual_inflation_rate_pct: Option<f64>,
    ) -> InvestmentParameters {
        InvestmentParameters::new(amount, years, annual_return_rate_pct).with_inflation(
            annual_inflation_rate_pct.unwrap_or(self.config.default_inflation_rate_pct),
        )
    }

    /// Run the projection matching `mode`
    pub fn project(
        &self,
        mode: InvestmentMode,
        params: &InvestmentParameters,
    ) -> ProjectionResult<ProjectionSeries> {
        match mode {
            InvestmentMode::Recurring => self.project_recurring(params),
            InvestmentMode::Lumpsum => self.project_lumpsum(params),
        }
    }

    pub fn project_recurring(&self, params: &InvestmentParameters) -> ProjectionResult<ProjectionSeries> {
        ensure_horizon(params.years, self.config.max_years)?;
        project_recurring(
            params.amount,
            params.years,
            params.annual_return_rate_pct,
            params.annual_inflation_rate_pct,
        )
    }

    pub fn project_lumpsum(&self, params: &InvestmentParameters) -> ProjectionResult<ProjectionSeries> {
        ensure_horizon(params.years, self.config.max_years)?;
        project_lumpsum(
            params.amount,
            params.years,
            params.annual_return_rate_pct,
            params.annual_inflation_rate_pct,
        )
    }

    /// Monthly contribution needed to reach `target_amount` in `years`
    pub fn required_periodic_contribution(
        &self,
        target_amount: f64,
        years: u32,
        annual_return_rate_pct: f64,
    ) -> ProjectionResult<f64> {
        ensure_horizon(years, self.config.max_years)?;
        goal::required_periodic_contribution(target_amount, years, annual_return_rate_pct)
    }

    /// Years of monthly contributions needed to reach `target_amount`
    pub fn required_duration(
        &self,
        periodic_amount: f64,
        target_amount: f64,
        annual_return_rate_pct: f64,
    ) -> ProjectionResult<f64> {
        goal::required_duration(periodic_amount, target_amount, annual_return_rate_pct)
    }

    /// Annual return (percent) needed for a monthly contribution to reach `target_amount`
    pub fn required_return_rate(
        &self,
        periodic_amount: f64,
        years: u32,
        target_amount: f64,
    ) -> ProjectionResult<f64> {
        ensure_horizon(years, self.config.max_years)?;
        solver::required_return_rate(periodic_amount, years, target_amount)
    }
}
