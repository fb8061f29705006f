//! Error types for projection and configuration

use thiserror::Error;

/// Result type returned by every projection operation
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Failures raised by the projection operations.
///
/// Every variant is an invalid-argument failure: the inputs cannot produce a
/// finite, well-defined answer. A zero return rate is not an error; the
/// operations that divide by the rate take a straight-line path instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Amount or target is not a positive finite number
    #[error("invalid {field}: {value} (must be a positive finite amount)")]
    InvalidAmount {
        field: &'static str,
        value: f64,
    },

    /// Horizon is zero or beyond the supported maximum
    #[error("invalid horizon: {years} years (must be between 1 and {max})")]
    InvalidHorizon {
        years: u32,
        max: u32,
    },

    /// Rate is not finite or drives a factor to zero
    #[error("invalid {field}: {value}% - {reason}")]
    InvalidRate {
        field: &'static str,
        value: f64,
        reason: String,
    },

    /// No contribution horizon or rate reaches the target
    #[error(
        "goal of {target} is unreachable with {periodic_amount} per month at {annual_return_rate_pct}% annual return"
    )]
    GoalUnreachable {
        target: f64,
        periodic_amount: f64,
        annual_return_rate_pct: f64,
    },

    /// No return rate in the searched range reaches the target
    #[error(
        "goal of {target} is unreachable with {periodic_amount} per month over {years} years at any supported return rate"
    )]
    NoReturnRate {
        target: f64,
        periodic_amount: f64,
        years: u32,
    },

    /// A computed quantity overflowed or became NaN
    #[error("{quantity} is not a finite number")]
    NonFiniteResult {
        quantity: &'static str,
    },
}

impl ProjectionError {
    /// All projection failures are invalid-argument failures
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount { .. }
                | Self::InvalidHorizon { .. }
                | Self::InvalidRate { .. }
                | Self::GoalUnreachable { .. }
                | Self::NoReturnRate { .. }
                | Self::NonFiniteResult { .. }
        )
    }
}

/// Failures loading or applying calculator configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// User input outside the calculator's accepted bounds
    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Configuration whose own bounds cannot be satisfied
    #[error("invalid config bounds for {field}: {reason}")]
    InvalidBounds {
        field: &'static str,
        reason: String,
    },
}
