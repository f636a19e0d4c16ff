//! SIP projection - a fixed monthly contribution compounded monthly.
//!
//! Each year's value is the closed-form future value of an annuity-due: contributions
//! land at the start of every month and earn that month's growth.

use super::{MONTHS_PER_YEAR, monthly_rate};
use serde::{Deserialize, Serialize};

/// Inputs for a SIP projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipInput {
    /// Contribution made every month
    pub monthly_investment: f64,
    /// Projection horizon in whole years
    #[serde(deserialize_with = "super::whole_years")]
    pub duration_years: u32,
    /// Expected annual return in percent
    pub expected_return: f64,
}

/// One year of a SIP projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipYear {
    pub year: u32,
    /// Total contributed up to the end of this year
    pub invested: f64,
    /// Portfolio value at the end of this year
    pub value: f64,
    pub returns: f64,
}

/// Complete SIP projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub total_value: f64,
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub yearly_breakdown: Vec<SipYear>,
}

/// Future value after `months` contributions of `monthly_investment` at `rate` per month.
///
/// A zero rate degrades to plain accumulation.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn future_value(monthly_investment: f64, rate: f64, months: u32) -> f64 {
    let periods = f64::from(months);
    if rate == 0.0 {
        return monthly_investment * periods;
    }
    let growth = (1.0 + rate).powf(periods);
    monthly_investment * ((growth - 1.0) / rate) * (1.0 + rate)
}

/// Projects a SIP year by year.
#[must_use]
pub fn project(input: &SipInput) -> SipResult {
    let rate = monthly_rate(input.expected_return);

    let yearly_breakdown: Vec<SipYear> = (1..=input.duration_years)
        .map(|year| {
            let months = year.saturating_mul(MONTHS_PER_YEAR);
            let invested = input.monthly_investment * f64::from(months);
            let value = future_value(input.monthly_investment, rate, months);
            SipYear {
                year,
                invested,
                value,
                returns: value - invested,
            }
        })
        .collect();

    let invested_amount = input.monthly_investment
        * f64::from(input.duration_years)
        * f64::from(MONTHS_PER_YEAR);
    let total_value = yearly_breakdown.last().map_or(0.0, |row| row.value);

    SipResult {
        total_value,
        invested_amount,
        estimated_returns: total_value - invested_amount,
        yearly_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(monthly_investment: f64, duration_years: u32, expected_return: f64) -> SipInput {
        SipInput {
            monthly_investment,
            duration_years,
            expected_return,
        }
    }

    #[test]
    fn test_ten_year_sip_at_twelve_percent() {
        let result = project(&input(10_000.0, 10, 12.0));

        assert!((result.total_value - 2_323_391.0).abs() <= 1.0, "got {}", result.total_value);
        assert_relative_eq!(result.invested_amount, 1_200_000.0);
        assert!((result.estimated_returns - 1_123_391.0).abs() <= 1.0);
    }

    #[test]
    fn test_returns_equal_value_minus_invested() {
        let result = project(&input(2_500.0, 25, 9.5));

        assert_relative_eq!(
            result.estimated_returns,
            result.total_value - result.invested_amount,
            max_relative = 1e-12
        );
        for row in &result.yearly_breakdown {
            assert_relative_eq!(row.returns, row.value - row.invested, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_breakdown_is_contiguous_from_year_one() {
        let result = project(&input(5_000.0, 7, 10.0));

        let years: Vec<u32> = result.yearly_breakdown.iter().map(|row| row.year).collect();
        assert_eq!(years, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(
            result
                .yearly_breakdown
                .windows(2)
                .all(|pair| pair[1].invested >= pair[0].invested)
        );
    }

    #[test]
    fn test_zero_rate_accumulates_linearly() {
        let result = project(&input(1_000.0, 3, 0.0));

        assert_relative_eq!(result.total_value, 36_000.0);
        assert_relative_eq!(result.estimated_returns, 0.0);
        assert!(result.yearly_breakdown.iter().all(|row| row.value.is_finite()));
    }

    #[test]
    fn test_near_zero_rate_stays_close_to_linear() {
        let result = project(&input(1_000.0, 3, 1e-6));

        assert!(result.total_value.is_finite());
        assert_relative_eq!(result.total_value, 36_000.0, max_relative = 1e-5);
    }

    #[test]
    fn test_zero_duration_yields_empty_projection() {
        let result = project(&input(1_000.0, 0, 12.0));

        assert!(result.yearly_breakdown.is_empty());
        assert_relative_eq!(result.total_value, 0.0);
        assert_relative_eq!(result.invested_amount, 0.0);
    }
}
