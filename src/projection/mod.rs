//! Investment projection engine: SIP and lumpsum growth, goal seeking

mod params;
mod series;
mod engine;
mod goal;
mod solver;

pub use params::{
    monthly_rate, InvestmentMode, InvestmentParameters, DEFAULT_INFLATION_RATE_PCT,
    MAX_PROJECTION_YEARS, MONTHS_PER_YEAR,
};
pub use series::{ProjectionSeries, ProjectionSummary, YearlyProjectionPoint};
pub use engine::{project_lumpsum, project_recurring, ProjectionConfig, ProjectionEngine};
pub use goal::{required_duration, required_periodic_contribution};
pub use solver::{bisect, required_return_rate};
