//! Scenario runner for batch projections
//!
//! Runs many projections against one engine in parallel. Results come back in
//! input order, each with its own `Result` so one bad input does not sink the
//! rest of the batch.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::ProjectionResult;
use crate::projection::{
    InvestmentMode, InvestmentParameters, ProjectionEngine, ProjectionSeries, ProjectionSummary,
};

/// One evaluated scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub params: InvestmentParameters,
    #[serde(serialize_with = "serialize_result")]
    pub result: ProjectionResult<ProjectionSeries>,
}

impl ScenarioOutcome {
    pub fn summary(&self) -> Option<ProjectionSummary> {
        self.result.as_ref().ok().map(ProjectionSeries::summary)
    }
}

fn serialize_result<S>(result: &ProjectionResult<ProjectionSeries>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match result {
        Ok(series) => series.summary().serialize(serializer),
        Err(err) => serializer.serialize_str(&err.to_string()),
    }
}

/// Batch projection runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let base = InvestmentParameters::new(5000.0, 10, 12.0);
/// for outcome in runner.run_rate_sweep(InvestmentMode::Recurring, &base, &[8.0, 10.0, 12.0]) {
///     println!("{:?}", outcome.summary());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner with the default engine
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: ProjectionEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Run a single projection
    pub fn run(&self, mode: InvestmentMode, params: &InvestmentParameters) -> ScenarioOutcome {
        ScenarioOutcome {
            params: *params,
            result: self.engine.project(mode, params),
        }
    }

    /// Project every parameter set with the same mode
    pub fn run_batch(&self, mode: InvestmentMode, batch: &[InvestmentParameters]) -> Vec<ScenarioOutcome> {
        info!("Running {} {} projections", batch.len(), mode);
        batch.par_iter().map(|params| self.run(mode, params)).collect()
    }

    /// Re-run one parameter set across several annual return rates
    pub fn run_rate_sweep(
        &self,
        mode: InvestmentMode,
        base: &InvestmentParameters,
        return_rates_pct: &[f64],
    ) -> Vec<ScenarioOutcome> {
        info!("Sweeping {} return rates for {} projection", return_rates_pct.len(), mode);
        return_rates_pct
            .par_iter()
            .map(|&rate| {
                let params = InvestmentParameters {
                    annual_return_rate_pct: rate,
                    ..*base
                };
                self.run(mode, &params)
            })
            .collect()
    }
}

/// Evenly spaced rates from `from` to `to` inclusive
pub fn rate_range(from: f64, to: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !from.is_finite() || !to.is_finite() || to < from {
        return Vec::new();
    }
    let count = ((to - from) / step + 1e-9).floor() as usize + 1;
    (0..count).map(|i| from + step * i as f64).collect()
}
