//! Investment Projection - SIP and lumpsum growth engine with inflation adjustment
//!
//! This library provides:
//! - Year-by-year projections for monthly (SIP) and one-time (lumpsum) investments
//! - Inflation-adjusted real values alongside nominal growth
//! - Goal seeking: required monthly contribution, required duration, implied return
//! - Parallel batch and rate-sweep scenarios
//! - Saved-plan summaries and CSV/JSON export

pub mod error;
pub mod projection;
pub mod config;
pub mod plan;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{ConfigError, ProjectionError, ProjectionResult};
pub use projection::{
    InvestmentMode, InvestmentParameters, ProjectionEngine, ProjectionSeries, ProjectionSummary,
    YearlyProjectionPoint,
};
pub use config::CalculatorConfig;
pub use plan::{InvestmentPlan, PlanBook};
pub use scenario::ScenarioRunner;
