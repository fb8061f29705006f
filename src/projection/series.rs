//! Year-by-year projection output

use serde::{Deserialize, Serialize};

use super::params::InvestmentMode;

/// Position of an investment after a whole number of years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjectionPoint {
    /// Completed years (1-indexed)
    pub year: u32,

    /// Cumulative nominal contribution to date
    pub invested_amount: f64,

    /// Nominal projected value
    pub expected_amount: f64,

    /// Projected value in present-day purchasing power
    pub inflation_adjusted_amount: f64,
}

/// Ordered projection, one point per completed year
///
/// `points()[i]` is always the position after `i + 1` years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    pub mode: InvestmentMode,
    points: Vec<YearlyProjectionPoint>,
}

impl ProjectionSeries {
    pub(crate) fn with_capacity(mode: InvestmentMode, years: u32) -> Self {
        Self {
            mode,
            points: Vec::with_capacity(years as usize),
        }
    }

    pub(crate) fn push(&mut self, point: YearlyProjectionPoint) {
        debug_assert_eq!(point.year as usize, self.points.len() + 1);
        self.points.push(point);
    }

    pub fn points(&self) -> &[YearlyProjectionPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point after `year` completed years (1-based)
    pub fn get(&self, year: u32) -> Option<&YearlyProjectionPoint> {
        let idx = (year as usize).checked_sub(1)?;
        self.points.get(idx)
    }

    pub fn final_point(&self) -> Option<&YearlyProjectionPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, YearlyProjectionPoint> {
        self.points.iter()
    }

    /// Headline figures at the end of the horizon
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.final_point().copied().unwrap_or(YearlyProjectionPoint {
            year: 0,
            invested_amount: 0.0,
            expected_amount: 0.0,
            inflation_adjusted_amount: 0.0,
        });

        ProjectionSummary {
            mode: self.mode,
            years: last.year,
            total_invested: last.invested_amount,
            expected_value: last.expected_amount,
            inflation_adjusted_value: last.inflation_adjusted_amount,
            wealth_gained: last.expected_amount - last.invested_amount,
            real_wealth_gained: last.inflation_adjusted_amount - last.invested_amount,
        }
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a YearlyProjectionPoint;
    type IntoIter = std::slice::Iter<'a, YearlyProjectionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub mode: InvestmentMode,
    pub years: u32,
    pub total_invested: f64,
    pub expected_value: f64,
    pub inflation_adjusted_value: f64,
    /// Expected value minus everything put in
    pub wealth_gained: f64,
    /// Inflation-adjusted value minus everything put in
    pub real_wealth_gained: f64,
}
