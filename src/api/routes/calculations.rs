//! Stateless calculation endpoints: presets, single calculations, and comparisons.

use crate::{
    api::{error::parse_body, state::AppState},
    config::presets::CalculatorPresets,
    core::{
        comparison::{self, Scenario, ScenarioOutcome},
        projection::{CalculationInput, CalculationResult, CalculatorType, calculate},
        validation::validate,
    },
    errors::Result,
};
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

/// Body of `POST /api/calculate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub calculator_type: CalculatorType,
    pub inputs: Value,
}

/// A validated input together with its projection.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    #[serde(flatten)]
    pub input: CalculationInput,
    pub results: CalculationResult,
}

/// One scenario in `POST /api/compare`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    #[serde(default)]
    pub name: String,
    pub calculator_type: CalculatorType,
    pub inputs: Value,
}

/// Body of `POST /api/compare`.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub scenarios: Vec<ScenarioRequest>,
}

/// Comparison outcomes in request order, plus the name of the leading scenario.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub scenarios: Vec<ScenarioOutcome>,
    pub leader: Option<String>,
}

/// Calculator presets.
pub async fn presets(State(state): State<AppState>) -> Json<CalculatorPresets> {
    Json(state.presets.as_ref().clone())
}

/// Validates and projects a single calculation.
#[instrument(skip_all)]
pub async fn calculate_one(
    payload: std::result::Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>> {
    let request = parse_body(payload)?;
    let input = CalculationInput::from_value(request.calculator_type, request.inputs)?;
    validate(&input)?;

    let results = calculate(&input);
    debug!(
        calculator = %request.calculator_type,
        years = results.years_projected(),
        "Calculated projection"
    );
    Ok(Json(CalculateResponse { input, results }))
}

/// Validates and projects up to four scenarios side by side.
#[instrument(skip_all)]
pub async fn compare(
    payload: std::result::Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<CompareResponse>> {
    let request = parse_body(payload)?;
    let scenarios = request
        .scenarios
        .into_iter()
        .map(|scenario| {
            CalculationInput::from_value(scenario.calculator_type, scenario.inputs)
                .map(|input| Scenario::new(scenario.name, input))
        })
        .collect::<Result<Vec<_>>>()?;

    let outcomes = comparison::compare(&scenarios)?;
    let leader = comparison::leading(&outcomes).map(|outcome| outcome.name.clone());
    Ok(Json(CompareResponse {
        scenarios: outcomes,
        leader,
    }))
}
