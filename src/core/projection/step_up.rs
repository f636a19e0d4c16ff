//! SIP step-up projection - the monthly contribution grows once per completed year.
//!
//! The contribution schedule is piecewise constant per year, so the value is advanced
//! month by month: grow the running value, then add that month's contribution.

use super::{MONTHS_PER_YEAR, monthly_rate};
use serde::{Deserialize, Serialize};

/// Inputs for a SIP step-up projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipStepUpInput {
    /// Contribution made every month during the first year
    pub monthly_investment: f64,
    #[serde(deserialize_with = "super::whole_years")]
    pub duration_years: u32,
    /// Expected annual return in percent
    pub expected_return: f64,
    /// Percentage increase applied to the contribution at the start of each new year
    pub annual_increase: f64,
}

/// One year of a step-up projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipStepUpYear {
    pub year: u32,
    /// Contribution made every month of this year
    pub monthly_investment: f64,
    pub invested: f64,
    pub value: f64,
    pub returns: f64,
}

/// Complete step-up projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipStepUpResult {
    pub total_value: f64,
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub yearly_breakdown: Vec<SipStepUpYear>,
}

/// Monthly contribution in force during `year` (1-indexed).
#[must_use]
pub fn contribution_for_year(initial: f64, annual_increase: f64, year: u32) -> f64 {
    let step = 1.0 + annual_increase / 100.0;
    initial * step.powf(f64::from(year.saturating_sub(1)))
}

/// Projects a step-up SIP year by year.
#[must_use]
pub fn project(input: &SipStepUpInput) -> SipStepUpResult {
    let rate = monthly_rate(input.expected_return);
    let mut current_value = 0.0;
    let mut total_invested = 0.0;
    let mut yearly_breakdown = Vec::new();

    for year in 1..=input.duration_years {
        let monthly_investment =
            contribution_for_year(input.monthly_investment, input.annual_increase, year);

        for _month in 0..MONTHS_PER_YEAR {
            current_value = current_value * (1.0 + rate) + monthly_investment;
        }
        total_invested += monthly_investment * f64::from(MONTHS_PER_YEAR);

        yearly_breakdown.push(SipStepUpYear {
            year,
            monthly_investment,
            invested: total_invested,
            value: current_value,
            returns: current_value - total_invested,
        });
    }

    SipStepUpResult {
        total_value: current_value,
        invested_amount: total_invested,
        estimated_returns: current_value - total_invested,
        yearly_breakdown,
    }
}
