//! Projection engine - the four calculators and their shared contracts.
//!
//! Every calculator is a pure function from a validated input record to a result
//! record holding aggregate totals and a year-indexed breakdown. Nothing here performs
//! I/O or rounds values; display rounding belongs to [`crate::core::format`].
//!
//! The calculators form a closed set. [`CalculationInput`] and [`CalculationResult`]
//! are the tagged unions over that set and [`calculate`] is the dispatch.

pub mod lump_sum;
pub mod sip;
pub mod step_up;
pub mod swp;

pub use lump_sum::{LumpSumInput, LumpSumResult, LumpSumYear};
pub use sip::{SipInput, SipResult, SipYear};
pub use step_up::{SipStepUpInput, SipStepUpResult, SipStepUpYear};
pub use swp::{SwpInput, SwpResult, SwpYear};

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Months in a projection year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Converts an annual percentage return into a monthly decimal rate (`r / 12 / 100`).
#[must_use]
pub fn monthly_rate(expected_return: f64) -> f64 {
    expected_return / f64::from(MONTHS_PER_YEAR) / 100.0
}

/// Reads a year count that may arrive as a whole-valued float such as `10.0`.
///
/// Fractional, negative, and non-finite values are rejected.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_years<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let years = f64::deserialize(deserializer)?;
    if years.is_finite() && years.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&years) {
        Ok(years as u32)
    } else {
        Err(serde::de::Error::custom(format!(
            "durationYears must be a whole number of years, got {years}"
        )))
    }
}

/// Tag identifying one of the four calculators.
///
/// The serialized names match the wire format used by saved calculations and the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculatorType {
    /// Systematic Investment Plan
    #[serde(rename = "sip")]
    Sip,
    /// SIP with an annual step-up of the contribution
    #[serde(rename = "sip-stepup")]
    SipStepUp,
    /// One-time investment
    #[serde(rename = "lumpsum")]
    LumpSum,
    /// Systematic Withdrawal Plan
    #[serde(rename = "swp")]
    Swp,
}

impl CalculatorType {
    /// All calculator types in display order.
    pub const ALL: [Self; 4] = [Self::Sip, Self::SipStepUp, Self::LumpSum, Self::Swp];

    /// Wire name of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sip => "sip",
            Self::SipStepUp => "sip-stepup",
            Self::LumpSum => "lumpsum",
            Self::Swp => "swp",
        }
    }

    /// Human-readable calculator name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sip => "SIP",
            Self::SipStepUp => "SIP Step-Up",
            Self::LumpSum => "Lump Sum",
            Self::Swp => "SWP",
        }
    }
}

impl fmt::Display for CalculatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::validation("calculatorType", format!("unknown calculator '{s}'")))
    }
}

/// Input record for any calculator, tagged by [`CalculatorType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculatorType", content = "inputs")]
pub enum CalculationInput {
    /// SIP input
    #[serde(rename = "sip")]
    Sip(SipInput),
    /// SIP step-up input
    #[serde(rename = "sip-stepup")]
    SipStepUp(SipStepUpInput),
    /// Lump sum input
    #[serde(rename = "lumpsum")]
    LumpSum(LumpSumInput),
    /// SWP input
    #[serde(rename = "swp")]
    Swp(SwpInput),
}

impl CalculationInput {
    /// The calculator this input belongs to.
    #[must_use]
    pub const fn calculator_type(&self) -> CalculatorType {
        match self {
            Self::Sip(_) => CalculatorType::Sip,
            Self::SipStepUp(_) => CalculatorType::SipStepUp,
            Self::LumpSum(_) => CalculatorType::LumpSum,
            Self::Swp(_) => CalculatorType::Swp,
        }
    }

    /// Requested projection horizon in years.
    #[must_use]
    pub const fn duration_years(&self) -> u32 {
        match self {
            Self::Sip(input) => input.duration_years,
            Self::SipStepUp(input) => input.duration_years,
            Self::LumpSum(input) => input.duration_years,
            Self::Swp(input) => input.duration_years,
        }
    }

    /// Decodes the untagged input record for `kind` from a JSON value.
    ///
    /// A shape mismatch is reported as a validation failure on `inputs`.
    pub fn from_value(kind: CalculatorType, value: serde_json::Value) -> Result<Self> {
        let decoded = match kind {
            CalculatorType::Sip => serde_json::from_value(value).map(Self::Sip),
            CalculatorType::SipStepUp => serde_json::from_value(value).map(Self::SipStepUp),
            CalculatorType::LumpSum => serde_json::from_value(value).map(Self::LumpSum),
            CalculatorType::Swp => serde_json::from_value(value).map(Self::Swp),
        };
        decoded.map_err(|e| Error::validation("inputs", e.to_string()))
    }

    /// Decodes a stored payload written by [`Self::payload`].
    pub fn from_payload(kind: CalculatorType, payload: &str) -> Result<Self> {
        let decoded = match kind {
            CalculatorType::Sip => serde_json::from_str(payload).map(Self::Sip),
            CalculatorType::SipStepUp => serde_json::from_str(payload).map(Self::SipStepUp),
            CalculatorType::LumpSum => serde_json::from_str(payload).map(Self::LumpSum),
            CalculatorType::Swp => serde_json::from_str(payload).map(Self::Swp),
        };
        decoded.map_err(Into::into)
    }

    /// Serializes the inner record without its tag.
    pub fn payload(&self) -> Result<String> {
        let encoded = match self {
            Self::Sip(input) => serde_json::to_string(input),
            Self::SipStepUp(input) => serde_json::to_string(input),
            Self::LumpSum(input) => serde_json::to_string(input),
            Self::Swp(input) => serde_json::to_string(input),
        };
        encoded.map_err(Into::into)
    }
}

/// Result record for any calculator.
///
/// Serializes as the bare inner record; the tag travels alongside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationResult {
    /// SIP result
    Sip(SipResult),
    /// SIP step-up result
    SipStepUp(SipStepUpResult),
    /// Lump sum result
    LumpSum(LumpSumResult),
    /// SWP result
    Swp(SwpResult),
}

impl CalculationResult {
    /// The calculator that produced this result.
    #[must_use]
    pub const fn calculator_type(&self) -> CalculatorType {
        match self {
            Self::Sip(_) => CalculatorType::Sip,
            Self::SipStepUp(_) => CalculatorType::SipStepUp,
            Self::LumpSum(_) => CalculatorType::LumpSum,
            Self::Swp(_) => CalculatorType::Swp,
        }
    }

    /// The single figure a summary shows: final value, or remaining corpus for SWP.
    #[must_use]
    pub const fn headline_value(&self) -> f64 {
        match self {
            Self::Sip(result) => result.total_value,
            Self::SipStepUp(result) => result.total_value,
            Self::LumpSum(result) => result.total_value,
            Self::Swp(result) => result.remaining_corpus,
        }
    }

    /// Number of breakdown rows produced.
    #[must_use]
    pub fn years_projected(&self) -> usize {
        match self {
            Self::Sip(result) => result.yearly_breakdown.len(),
            Self::SipStepUp(result) => result.yearly_breakdown.len(),
            Self::LumpSum(result) => result.yearly_breakdown.len(),
            Self::Swp(result) => result.yearly_breakdown.len(),
        }
    }

    /// Decodes the untagged result record for `kind` from a JSON value.
    pub fn from_value(kind: CalculatorType, value: serde_json::Value) -> Result<Self> {
        let decoded = match kind {
            CalculatorType::Sip => serde_json::from_value(value).map(Self::Sip),
            CalculatorType::SipStepUp => serde_json::from_value(value).map(Self::SipStepUp),
            CalculatorType::LumpSum => serde_json::from_value(value).map(Self::LumpSum),
            CalculatorType::Swp => serde_json::from_value(value).map(Self::Swp),
        };
        decoded.map_err(|e| Error::validation("results", e.to_string()))
    }

    /// Decodes a stored payload written by [`Self::payload`].
    pub fn from_payload(kind: CalculatorType, payload: &str) -> Result<Self> {
        let decoded = match kind {
            CalculatorType::Sip => serde_json::from_str(payload).map(Self::Sip),
            CalculatorType::SipStepUp => serde_json::from_str(payload).map(Self::SipStepUp),
            CalculatorType::LumpSum => serde_json::from_str(payload).map(Self::LumpSum),
            CalculatorType::Swp => serde_json::from_str(payload).map(Self::Swp),
        };
        decoded.map_err(Into::into)
    }

    /// Serializes the inner record without its tag.
    pub fn payload(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }
}

/// Runs the calculator matching the input variant.
///
/// Inputs are expected to have passed [`crate::core::validation::validate`]; out-of-range
/// values still produce finite numbers but carry no further guarantees.
#[must_use]
pub fn calculate(input: &CalculationInput) -> CalculationResult {
    match input {
        CalculationInput::Sip(input) => CalculationResult::Sip(sip::project(input)),
        CalculationInput::SipStepUp(input) => CalculationResult::SipStepUp(step_up::project(input)),
        CalculationInput::LumpSum(input) => CalculationResult::LumpSum(lump_sum::project(input)),
        CalculationInput::Swp(input) => CalculationResult::Swp(swp::project(input)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    fn sip_input() -> CalculationInput {
        CalculationInput::Sip(SipInput {
            monthly_investment: 10_000.0,
            duration_years: 10,
            expected_return: 12.0,
        })
    }

    #[test]
    fn test_calculator_type_round_trips_wire_names() {
        for kind in CalculatorType::ALL {
            assert_eq!(kind.as_str().parse::<CalculatorType>().unwrap(), kind);
        }
        assert_eq!(CalculatorType::SipStepUp.to_string(), "sip-stepup");
    }

    #[test]
    fn test_unknown_calculator_type_is_validation_error() {
        let err = "annuity".parse::<CalculatorType>().unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "calculatorType"));
    }

    #[test]
    fn test_calculate_dispatches_on_variant() {
        let input = sip_input();
        let result = calculate(&input);
        assert_eq!(result.calculator_type(), CalculatorType::Sip);
        assert_eq!(result.years_projected(), 10);

        let swp = CalculationInput::Swp(SwpInput {
            investment: 1_000_000.0,
            monthly_withdrawal: 10_000.0,
            duration_years: 10,
            expected_return: 12.0,
        });
        assert_eq!(calculate(&swp).calculator_type(), CalculatorType::Swp);
    }

    #[test]
    fn test_input_serializes_with_tag_and_camel_case_fields() {
        let value = serde_json::to_value(sip_input()).unwrap();
        assert_eq!(
            value,
            json!({
                "calculatorType": "sip",
                "inputs": {
                    "monthlyInvestment": 10000.0,
                    "durationYears": 10,
                    "expectedReturn": 12.0
                }
            })
        );
    }

    #[test]
    fn test_from_value_rejects_wrong_shape() {
        let err = CalculationInput::from_value(
            CalculatorType::Swp,
            json!({ "monthlyInvestment": 10000, "durationYears": 10, "expectedReturn": 12 }),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "inputs"));
    }

    #[test]
    fn test_from_value_accepts_whole_float_years() {
        let input = CalculationInput::from_value(
            CalculatorType::Sip,
            json!({ "monthlyInvestment": 10000, "durationYears": 10.0, "expectedReturn": 12 }),
        )
        .unwrap();
        assert_eq!(input, sip_input());

        for years in [json!(10.5), json!(-1), json!("10")] {
            let err = CalculationInput::from_value(
                CalculatorType::LumpSum,
                json!({ "investment": 100000, "durationYears": years, "expectedReturn": 12 }),
            )
            .unwrap_err();
            assert!(matches!(err, Error::Validation { ref field, .. } if field == "inputs"));
        }
    }

    #[test]
    fn test_stored_payload_decodes_with_its_tag() {
        let input = sip_input();
        let result = calculate(&input);

        let decoded_input =
            CalculationInput::from_payload(CalculatorType::Sip, &input.payload().unwrap()).unwrap();
        let decoded_result =
            CalculationResult::from_payload(CalculatorType::Sip, &result.payload().unwrap())
                .unwrap();

        assert_eq!(decoded_input, input);
        assert_eq!(decoded_result, result);
    }

    #[test]
    fn test_headline_value_uses_remaining_corpus_for_swp() {
        let result = calculate(&CalculationInput::Swp(SwpInput {
            investment: 500_000.0,
            monthly_withdrawal: 5_000.0,
            duration_years: 5,
            expected_return: 8.0,
        }));
        let CalculationResult::Swp(ref swp) = result else {
            panic!("expected SWP result");
        };
        assert!((result.headline_value() - swp.remaining_corpus).abs() < f64::EPSILON);
    }
}
