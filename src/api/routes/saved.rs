//! Saved calculation endpoints.
//!
//! Every successful mutation refreshes the summary cache before responding.

use crate::{
    api::{
        error::{parse_body, parse_id},
        state::AppState,
    },
    core::{
        projection::{CalculationInput, CalculationResult, CalculatorType},
        saved::{self, SavedCalculation},
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

/// Body of `POST /api/saved-calculations`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSavedRequest {
    pub calculator_type: CalculatorType,
    pub name: String,
    pub inputs: Value,
    pub results: Value,
}

/// Body of `PATCH /api/saved-calculations/:id`.
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

/// All saved calculations, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SavedCalculation>>> {
    saved::list_saved_calculations(&state.db).await.map(Json)
}

/// Saves a new calculation.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateSavedRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedCalculation>)> {
    let request = parse_body(payload)?;
    let inputs = CalculationInput::from_value(request.calculator_type, request.inputs)?;
    let results = CalculationResult::from_value(request.calculator_type, request.results)?;

    let created =
        saved::create_saved_calculation(&state.db, &request.name, &inputs, &results).await?;
    state.cache.refresh_after(&state.db, "create").await;

    Ok((StatusCode::CREATED, Json(created)))
}

/// One saved calculation.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SavedCalculation>> {
    let id = parse_id(&id)?;
    saved::require_saved_calculation(&state.db, id).await.map(Json)
}

/// Renames a saved calculation.
#[instrument(skip(state, payload))]
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<RenameRequest>, JsonRejection>,
) -> Result<Json<SavedCalculation>> {
    let id = parse_id(&id)?;
    let request = parse_body(payload)?;

    let renamed = saved::rename_saved_calculation(&state.db, id, &request.name)
        .await?
        .ok_or(Error::CalculationNotFound { id })?;
    state.cache.refresh_after(&state.db, "rename").await;

    Ok(Json(renamed))
}

/// Saves a copy of a saved calculation named `"<name> (Copy)"`.
#[instrument(skip(state))]
pub async fn duplicate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<SavedCalculation>)> {
    let id = parse_id(&id)?;
    let copy = saved::duplicate_saved_calculation(&state.db, id)
        .await?
        .ok_or(Error::CalculationNotFound { id })?;
    state.cache.refresh_after(&state.db, "duplicate").await;

    Ok((StatusCode::CREATED, Json(copy)))
}

/// Deletes a saved calculation. Always 204, whether or not it existed.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    saved::delete_saved_calculation(&state.db, id).await?;
    state.cache.refresh_after(&state.db, "delete").await;
    Ok(StatusCode::NO_CONTENT)
}
