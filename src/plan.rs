//! Saved investment plan summaries
//!
//! A plan is the record a caller keeps after running a projection: what was
//! invested, for how long, at what rate, and the wealth it is expected to gain.
//! Storage is left to the caller; these types only (de)serialize.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::projection::{InvestmentMode, InvestmentParameters, ProjectionSeries};

/// Kind of plan, serialized as the dashboard labels "SIP" / "Lumpsum"
pub type PlanKind = InvestmentMode;

/// Summary of one saved projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlan {
    pub id: String,
    pub username: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlanKind,
    /// Monthly contribution for SIP, principal for lumpsum
    pub amount: f64,
    /// Horizon in years
    pub period: u32,
    /// Expected annual return, percent
    pub return_rate: f64,
    pub created_date: NaiveDate,
    /// Expected value minus total invested at the end of the horizon
    pub growth: f64,
}

impl InvestmentPlan {
    /// Summarize a projection into a plan record
    pub fn from_projection(
        id: impl Into<String>,
        username: impl Into<String>,
        name: impl Into<String>,
        params: &InvestmentParameters,
        series: &ProjectionSeries,
        created_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            name: name.into(),
            kind: series.mode,
            amount: params.amount,
            period: params.years,
            return_rate: params.annual_return_rate_pct,
            created_date,
            growth: series.summary().wealth_gained,
        }
    }
}

/// Collection of plans across users
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanBook {
    plans: Vec<InvestmentPlan>,
}

impl PlanBook {
    pub fn new(plans: Vec<InvestmentPlan>) -> Self {
        Self { plans }
    }

    pub fn add(&mut self, plan: InvestmentPlan) {
        self.plans.push(plan);
    }

    pub fn plans(&self) -> &[InvestmentPlan] {
        &self.plans
    }

    pub fn for_user<'a>(&'a self, username: &'a str) -> impl Iterator<Item = &'a InvestmentPlan> + 'a {
        self.plans.iter().filter(move |p| p.username == username)
    }

    /// Sum of monthly SIP contributions
    pub fn total_sip_monthly(&self, username: &str) -> f64 {
        self.sum_amount(username, Some(PlanKind::Recurring))
    }

    /// Sum of lumpsum principals
    pub fn total_lumpsum(&self, username: &str) -> f64 {
        self.sum_amount(username, Some(PlanKind::Lumpsum))
    }

    /// Monthly SIP amounts plus lumpsum principals
    pub fn total_invested(&self, username: &str) -> f64 {
        self.sum_amount(username, None)
    }

    pub fn total_growth(&self, username: &str) -> f64 {
        self.for_user(username).map(|p| p.growth).sum()
    }

    fn sum_amount(&self, username: &str, kind: Option<PlanKind>) -> f64 {
        self.for_user(username)
            .filter(|p| kind.map_or(true, |k| p.kind == k))
            .map(|p| p.amount)
            .sum()
    }
}
