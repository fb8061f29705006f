//! Investment inputs and their validation

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, ProjectionResult};

/// Inflation assumed when the caller does not supply one (percent per year)
pub const DEFAULT_INFLATION_RATE_PCT: f64 = 6.0;

/// Contributions and compounding for recurring plans happen monthly
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest horizon the projection accepts
pub const MAX_PROJECTION_YEARS: u32 = 1000;

/// How the money goes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentMode {
    /// Fixed monthly contribution (SIP)
    #[serde(rename = "SIP")]
    Recurring,
    /// Single up-front investment
    #[serde(rename = "Lumpsum")]
    Lumpsum,
}

impl std::fmt::Display for InvestmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recurring => write!(f, "SIP"),
            Self::Lumpsum => write!(f, "Lumpsum"),
        }
    }
}

/// Inputs for a single projection
///
/// `amount` is the monthly contribution for a recurring plan and the principal
/// for a lumpsum plan. Rates are annual percentages (12 means 12%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentParameters {
    pub amount: f64,
    pub years: u32,
    pub annual_return_rate_pct: f64,
    #[serde(default = "default_inflation")]
    pub annual_inflation_rate_pct: f64,
}

fn default_inflation() -> f64 {
    DEFAULT_INFLATION_RATE_PCT
}

impl InvestmentParameters {
    /// Create parameters with the default 6% inflation
    pub fn new(amount: f64, years: u32, annual_return_rate_pct: f64) -> Self {
        Self {
            amount,
            years,
            annual_return_rate_pct,
            annual_inflation_rate_pct: DEFAULT_INFLATION_RATE_PCT,
        }
    }

    pub fn with_inflation(mut self, annual_inflation_rate_pct: f64) -> Self {
        self.annual_inflation_rate_pct = annual_inflation_rate_pct;
        self
    }

    /// Annual return as a decimal
    pub fn annual_return_rate(&self) -> f64 {
        self.annual_return_rate_pct / 100.0
    }

    /// Annual inflation as a decimal
    pub fn annual_inflation_rate(&self) -> f64 {
        self.annual_inflation_rate_pct / 100.0
    }

    /// Monthly return rate (nominal annual / 12)
    pub fn monthly_return_rate(&self) -> f64 {
        monthly_rate(self.annual_return_rate_pct)
    }

    /// Monthly inflation rate (nominal annual / 12)
    pub fn monthly_inflation_rate(&self) -> f64 {
        monthly_rate(self.annual_inflation_rate_pct)
    }

    /// Number of months in the horizon
    pub fn months(&self) -> u32 {
        self.years * MONTHS_PER_YEAR
    }
}

/// Convert an annual percentage into a monthly decimal rate
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 100.0 / MONTHS_PER_YEAR as f64
}

pub(crate) fn ensure_positive_amount(field: &'static str, value: f64) -> ProjectionResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ProjectionError::InvalidAmount { field, value })
    }
}

pub(crate) fn ensure_horizon(years: u32, max: u32) -> ProjectionResult<()> {
    if years == 0 || years > max {
        return Err(ProjectionError::InvalidHorizon { years, max });
    }
    Ok(())
}

pub(crate) fn ensure_finite_rate(field: &'static str, value: f64) -> ProjectionResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProjectionError::InvalidRate {
            field,
            value,
            reason: "rate must be a finite number".to_string(),
        })
    }
}

/// A deflator `(1 + rate)^n` must stay strictly positive
pub(crate) fn ensure_positive_growth_factor(
    field: &'static str,
    annual_rate_pct: f64,
    per_period_rate: f64,
) -> ProjectionResult<()> {
    ensure_finite_rate(field, annual_rate_pct)?;
    if 1.0 + per_period_rate <= 0.0 {
        return Err(ProjectionError::InvalidRate {
            field,
            value: annual_rate_pct,
            reason: format!("growth factor 1 + {} is not positive", per_period_rate),
        });
    }
    Ok(())
}

pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> ProjectionResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProjectionError::NonFiniteResult { quantity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_inflation() {
        let params = InvestmentParameters::new(5000.0, 10, 12.0);
        assert_eq!(params.annual_inflation_rate_pct, 6.0);
        assert_eq!(params.months(), 120);

        let params = params.with_inflation(0.0);
        assert_eq!(params.annual_inflation_rate_pct, 0.0);
    }

    #[test]
    fn test_rate_conversions() {
        let params = InvestmentParameters::new(5000.0, 10, 12.0).with_inflation(6.0);
        assert_relative_eq!(params.monthly_return_rate(), 0.01);
        assert_relative_eq!(params.monthly_inflation_rate(), 0.005);
        assert_relative_eq!(params.annual_return_rate(), 0.12);
        assert_relative_eq!(params.annual_inflation_rate(), 0.06);
    }

    #[test]
    fn test_inflation_defaults_when_missing_from_json() {
        let params: InvestmentParameters =
            serde_json::from_str(r#"{"amount": 1000.0, "years": 3, "annual_return_rate_pct": 8.0}"#)
                .unwrap();
        assert_eq!(params.annual_inflation_rate_pct, DEFAULT_INFLATION_RATE_PCT);
    }

    #[test]
    fn test_mode_serializes_as_dashboard_labels() {
        assert_eq!(serde_json::to_string(&InvestmentMode::Recurring).unwrap(), "\"SIP\"");
        assert_eq!(serde_json::to_string(&InvestmentMode::Lumpsum).unwrap(), "\"Lumpsum\"");
        assert_eq!(InvestmentMode::Recurring.to_string(), "SIP");
    }

    #[test]
    fn test_validation_helpers() {
        assert!(ensure_positive_amount("amount", 1.0).is_ok());
        assert!(ensure_positive_amount("amount", 0.0).is_err());
        assert!(ensure_positive_amount("amount", f64::NAN).is_err());
        assert!(ensure_horizon(1, 30).is_ok());
        assert!(ensure_horizon(0, 30).is_err());
        assert!(ensure_horizon(31, 30).is_err());
        assert!(ensure_positive_growth_factor("inflation", -6.0, -0.005).is_ok());
        assert!(ensure_positive_growth_factor("inflation", -1200.0, -1.0).is_err());
        assert!(ensure_finite("x", f64::INFINITY).is_err());
    }
}
