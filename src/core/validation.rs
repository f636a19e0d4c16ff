//! Input bounds enforced before a calculation reaches the projection engine.
//!
//! All bounds are inclusive. A failure names the offending field by its wire name so the
//! API and the bot can point the user at it.

use crate::{
    core::{
        format::format_number,
        projection::{CalculationInput, LumpSumInput, SipInput, SipStepUpInput, SwpInput},
    },
    errors::{Error, Result},
};
use std::ops::RangeInclusive;

/// Monthly SIP contribution, in rupees.
pub const MONTHLY_INVESTMENT: RangeInclusive<f64> = 500.0..=10_000_000.0;
/// One-time investment for a lump sum.
pub const LUMP_SUM_INVESTMENT: RangeInclusive<f64> = 1_000.0..=100_000_000.0;
/// Starting corpus for an SWP.
pub const SWP_INVESTMENT: RangeInclusive<f64> = 10_000.0..=100_000_000.0;
/// Monthly SWP withdrawal.
pub const MONTHLY_WITHDRAWAL: RangeInclusive<f64> = 1_000.0..=10_000_000.0;
/// Expected annual return, in percent.
pub const EXPECTED_RETURN: RangeInclusive<f64> = 1.0..=30.0;
/// Annual step-up, in percent.
pub const ANNUAL_INCREASE: RangeInclusive<f64> = 0.0..=100.0;
/// Projection horizon, in years.
pub const DURATION_YEARS: RangeInclusive<u32> = 1..=50;

fn check_amount(field: &str, value: f64, bounds: &RangeInclusive<f64>) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::validation(field, "must be a finite number"));
    }
    if !bounds.contains(&value) {
        return Err(Error::validation(
            field,
            format!(
                "must be between {} and {}",
                format_number(*bounds.start()),
                format_number(*bounds.end())
            ),
        ));
    }
    Ok(())
}

fn check_years(value: u32) -> Result<()> {
    if DURATION_YEARS.contains(&value) {
        Ok(())
    } else {
        Err(Error::validation(
            "durationYears",
            format!(
                "must be between {} and {}",
                DURATION_YEARS.start(),
                DURATION_YEARS.end()
            ),
        ))
    }
}

fn validate_sip(input: &SipInput) -> Result<()> {
    check_amount(
        "monthlyInvestment",
        input.monthly_investment,
        &MONTHLY_INVESTMENT,
    )?;
    check_years(input.duration_years)?;
    check_amount("expectedReturn", input.expected_return, &EXPECTED_RETURN)
}

fn validate_step_up(input: &SipStepUpInput) -> Result<()> {
    check_amount(
        "monthlyInvestment",
        input.monthly_investment,
        &MONTHLY_INVESTMENT,
    )?;
    check_years(input.duration_years)?;
    check_amount("expectedReturn", input.expected_return, &EXPECTED_RETURN)?;
    check_amount("annualIncrease", input.annual_increase, &ANNUAL_INCREASE)
}

fn validate_lump_sum(input: &LumpSumInput) -> Result<()> {
    check_amount("investment", input.investment, &LUMP_SUM_INVESTMENT)?;
    check_years(input.duration_years)?;
    check_amount("expectedReturn", input.expected_return, &EXPECTED_RETURN)
}

fn validate_swp(input: &SwpInput) -> Result<()> {
    check_amount("investment", input.investment, &SWP_INVESTMENT)?;
    check_amount(
        "monthlyWithdrawal",
        input.monthly_withdrawal,
        &MONTHLY_WITHDRAWAL,
    )?;
    check_years(input.duration_years)?;
    check_amount("expectedReturn", input.expected_return, &EXPECTED_RETURN)
}

/// Checks every field of `input` against its bounds, stopping at the first failure.
///
/// # Errors
/// Returns [`Error::Validation`] naming the first out-of-bounds or non-finite field.
pub fn validate(input: &CalculationInput) -> Result<()> {
    match input {
        CalculationInput::Sip(input) => validate_sip(input),
        CalculationInput::SipStepUp(input) => validate_step_up(input),
        CalculationInput::LumpSum(input) => validate_lump_sum(input),
        CalculationInput::Swp(input) => validate_swp(input),
    }
}
