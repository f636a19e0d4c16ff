//! Side-by-side comparison of up to four calculation scenarios.
//!
//! Scenarios may mix calculator types. Each one is validated and projected on its own;
//! the first invalid scenario fails the whole comparison.

use crate::{
    core::{
        projection::{CalculationInput, CalculationResult, CalculatorType, calculate},
        validation::validate,
    },
    errors::{Error, Result},
};
use serde::Serialize;

/// Most scenarios a single comparison accepts.
pub const MAX_SCENARIOS: usize = 4;

/// A named calculation to compare.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub input: CalculationInput,
}

impl Scenario {
    /// Creates a scenario from a name and input.
    pub fn new(name: impl Into<String>, input: CalculationInput) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

/// Projection of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub name: String,
    pub calculator_type: CalculatorType,
    /// Final value, or remaining corpus for an SWP
    pub headline_value: f64,
    pub results: CalculationResult,
}

/// Name given to the `n`th scenario (1-indexed) when the caller supplies none.
#[must_use]
pub fn default_scenario_name(n: usize) -> String {
    format!("Scenario {n}")
}

/// Name given to a duplicated scenario or saved calculation.
#[must_use]
pub fn duplicate_name(name: &str) -> String {
    format!("{name} (Copy)")
}

/// Validates and projects every scenario, preserving order.
///
/// # Errors
/// Returns [`Error::Validation`] on `scenarios` when the list is empty or longer than
/// [`MAX_SCENARIOS`], or the first scenario's own validation failure.
pub fn compare(scenarios: &[Scenario]) -> Result<Vec<ScenarioOutcome>> {
    if scenarios.is_empty() || scenarios.len() > MAX_SCENARIOS {
        return Err(Error::validation(
            "scenarios",
            format!(
                "expected between 1 and {MAX_SCENARIOS} scenarios, got {}",
                scenarios.len()
            ),
        ));
    }

    scenarios
        .iter()
        .enumerate()
        .map(|(index, scenario)| {
            validate(&scenario.input)?;
            let results = calculate(&scenario.input);
            let name = if scenario.name.trim().is_empty() {
                default_scenario_name(index + 1)
            } else {
                scenario.name.trim().to_string()
            };
            Ok(ScenarioOutcome {
                name,
                calculator_type: results.calculator_type(),
                headline_value: results.headline_value(),
                results,
            })
        })
        .collect()
}

/// The outcome with the largest headline value, first one on ties.
#[must_use]
pub fn leading(outcomes: &[ScenarioOutcome]) -> Option<&ScenarioOutcome> {
    outcomes.iter().reduce(|best, candidate| {
        if candidate.headline_value > best.headline_value {
            candidate
        } else {
            best
        }
    })
}
