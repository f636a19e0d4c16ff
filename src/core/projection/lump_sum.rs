//! Lump sum projection - one investment compounded annually.

use serde::{Deserialize, Serialize};

/// Inputs for a lump sum projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpSumInput {
    pub investment: f64,
    #[serde(deserialize_with = "super::whole_years")]
    pub duration_years: u32,
    /// Expected annual return in percent
    pub expected_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpSumYear {
    pub year: u32,
    pub value: f64,
    pub returns: f64,
}

/// Complete lump sum projection. `invested_amount` is the original investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpSumResult {
    pub total_value: f64,
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub yearly_breakdown: Vec<LumpSumYear>,
}

/// Projects a lump sum year by year: `value(y) = A * (1 + r/100)^y`.
#[must_use]
pub fn project(input: &LumpSumInput) -> LumpSumResult {
    let growth = 1.0 + input.expected_return / 100.0;
    let value_at = |year: u32| input.investment * growth.powf(f64::from(year));

    let yearly_breakdown: Vec<LumpSumYear> = (1..=input.duration_years)
        .map(|year| {
            let value = value_at(year);
            LumpSumYear {
                year,
                value,
                returns: value - input.investment,
            }
        })
        .collect();

    let total_value = value_at(input.duration_years);

    LumpSumResult {
        total_value,
        invested_amount: input.investment,
        estimated_returns: total_value - input.investment,
        yearly_breakdown,
    }
}
