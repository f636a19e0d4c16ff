//! Saved calculation business logic - create, list, get, rename, and delete snapshots.
//!
//! A snapshot stores a calculator's inputs and results under a user-chosen name. Rows keep
//! the calculator tag next to the untagged JSON payloads and are decoded by that tag on
//! read, so a row that no longer decodes surfaces as [`Error::CorruptPayload`] instead of
//! a half-built value.

use crate::{
    core::{
        comparison::duplicate_name,
        projection::{CalculationInput, CalculationResult, CalculatorType},
    },
    entities::{SavedCalculation as SavedCalculationEntity, saved_calculation},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// A decoded saved calculation.
///
/// Serializes as `{id, name, calculatorType, inputs, results, createdAt}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCalculation {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub inputs: CalculationInput,
    pub results: CalculationResult,
    pub created_at: DateTime<Utc>,
}

impl SavedCalculation {
    /// The calculator this snapshot belongs to.
    #[must_use]
    pub const fn calculator_type(&self) -> CalculatorType {
        self.inputs.calculator_type()
    }
}

impl TryFrom<saved_calculation::Model> for SavedCalculation {
    type Error = Error;

    fn try_from(model: saved_calculation::Model) -> Result<Self> {
        let id = model.id;
        let corrupt = move |e: Error| Error::CorruptPayload {
            id,
            message: e.to_string(),
        };

        let kind: CalculatorType = model.calculator_type.parse().map_err(corrupt)?;
        let inputs = CalculationInput::from_payload(kind, &model.inputs).map_err(corrupt)?;
        let results = CalculationResult::from_payload(kind, &model.results).map_err(corrupt)?;

        Ok(Self {
            id,
            name: model.name,
            inputs,
            results,
            created_at: model.created_at,
        })
    }
}

/// Lightweight listing row, used by the name cache and history views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSummary {
    pub id: i64,
    pub name: String,
    pub calculator_type: CalculatorType,
    pub created_at: DateTime<Utc>,
}

fn normalized_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("name", "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Saves a named snapshot of `inputs` and `results`.
///
/// The name is trimmed. The id and creation time are assigned here.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - `inputs` and `results` belong to different calculators
/// - The database insert fails
#[instrument(skip(db, inputs, results), fields(calculator = %inputs.calculator_type()))]
pub async fn create_saved_calculation(
    db: &DatabaseConnection,
    name: &str,
    inputs: &CalculationInput,
    results: &CalculationResult,
) -> Result<SavedCalculation> {
    let name = normalized_name(name)?;

    let kind = inputs.calculator_type();
    if results.calculator_type() != kind {
        return Err(Error::validation(
            "results",
            format!(
                "results are for {} but inputs are for {kind}",
                results.calculator_type()
            ),
        ));
    }

    let row = saved_calculation::ActiveModel {
        calculator_type: Set(kind.as_str().to_string()),
        name: Set(name),
        inputs: Set(inputs.payload()?),
        results: Set(results.payload()?),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(id = row.id, name = %row.name, "Saved calculation");

    Ok(SavedCalculation {
        id: row.id,
        name: row.name,
        inputs: inputs.clone(),
        results: results.clone(),
        created_at: row.created_at,
    })
}

/// All saved calculations, newest first. Ties on creation time fall back to id, newest first.
///
/// Rows that no longer decode are skipped and logged; [`get_saved_calculation`] still
/// reports them as [`Error::CorruptPayload`].
///
/// # Errors
/// Returns an error if the query fails.
pub async fn list_saved_calculations(db: &DatabaseConnection) -> Result<Vec<SavedCalculation>> {
    let rows = SavedCalculationEntity::find()
        .order_by_desc(saved_calculation::Column::CreatedAt)
        .order_by_desc(saved_calculation::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            SavedCalculation::try_from(row)
                .inspect_err(|e| warn!("Skipping saved calculation in listing: {e}"))
                .ok()
        })
        .collect())
}

/// Summaries of all saved calculations in listing order, without decoding payloads.
///
/// Rows with an unknown calculator tag are skipped and logged.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn list_saved_summaries(db: &DatabaseConnection) -> Result<Vec<SavedSummary>> {
    let rows: Vec<(i64, String, String, DateTime<Utc>)> = SavedCalculationEntity::find()
        .select_only()
        .column(saved_calculation::Column::Id)
        .column(saved_calculation::Column::Name)
        .column(saved_calculation::Column::CalculatorType)
        .column(saved_calculation::Column::CreatedAt)
        .order_by_desc(saved_calculation::Column::CreatedAt)
        .order_by_desc(saved_calculation::Column::Id)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(id, name, tag, created_at)| match tag.parse() {
            Ok(calculator_type) => Some(SavedSummary {
                id,
                name,
                calculator_type,
                created_at,
            }),
            Err(e) => {
                warn!(id, "Skipping saved calculation with bad tag: {e}");
                None
            }
        })
        .collect())
}

/// Fetches one saved calculation by id.
///
/// # Errors
/// Returns an error if the query fails or the row cannot be decoded.
pub async fn get_saved_calculation(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<SavedCalculation>> {
    SavedCalculationEntity::find_by_id(id)
        .one(db)
        .await?
        .map(SavedCalculation::try_from)
        .transpose()
}

/// Like [`get_saved_calculation`], but a missing row is an error.
///
/// # Errors
/// Returns [`Error::CalculationNotFound`] if no row has this id.
pub async fn require_saved_calculation(
    db: &DatabaseConnection,
    id: i64,
) -> Result<SavedCalculation> {
    get_saved_calculation(db, id)
        .await?
        .ok_or(Error::CalculationNotFound { id })
}

/// Newest saved calculation whose name matches `name`, ignoring case and surrounding spaces.
///
/// # Errors
/// Returns an error if the query fails or the row cannot be decoded.
pub async fn find_saved_calculation_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<SavedCalculation>> {
    let wanted = name.trim().to_lowercase();
    let matching = list_saved_summaries(db)
        .await?
        .into_iter()
        .find(|summary| summary.name.to_lowercase() == wanted);

    match matching {
        Some(summary) => get_saved_calculation(db, summary.id).await,
        None => Ok(None),
    }
}

/// Renames a saved calculation. Inputs, results, and creation time are untouched.
///
/// Returns `None` if no row has this id.
///
/// # Errors
/// Returns an error if the new name is empty, or the update fails.
#[instrument(skip(db))]
pub async fn rename_saved_calculation(
    db: &DatabaseConnection,
    id: i64,
    new_name: &str,
) -> Result<Option<SavedCalculation>> {
    let new_name = normalized_name(new_name)?;

    let Some(existing) = SavedCalculationEntity::find_by_id(id).one(db).await? else {
        debug!(id, "Rename target does not exist");
        return Ok(None);
    };

    let mut row: saved_calculation::ActiveModel = existing.into();
    row.name = Set(new_name);
    let updated = row.update(db).await?;

    info!(id, name = %updated.name, "Renamed saved calculation");
    SavedCalculation::try_from(updated).map(Some)
}

/// Saves a copy of a saved calculation under `"<name> (Copy)"` with a fresh id and timestamp.
///
/// Returns `None` if no row has this id.
///
/// # Errors
/// Returns an error if the original cannot be decoded or the insert fails.
#[instrument(skip(db))]
pub async fn duplicate_saved_calculation(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<SavedCalculation>> {
    let Some(original) = get_saved_calculation(db, id).await? else {
        debug!(id, "Duplicate source does not exist");
        return Ok(None);
    };

    create_saved_calculation(
        db,
        &duplicate_name(&original.name),
        &original.inputs,
        &original.results,
    )
    .await
    .map(Some)
}

/// Deletes a saved calculation. Deleting an id that does not exist is not an error.
///
/// # Errors
/// Returns an error if the delete statement fails.
#[instrument(skip(db))]
pub async fn delete_saved_calculation(db: &DatabaseConnection, id: i64) -> Result<()> {
    let outcome = SavedCalculationEntity::delete_by_id(id).exec(db).await?;
    debug!(id, rows = outcome.rows_affected, "Deleted saved calculation");
    Ok(())
}
