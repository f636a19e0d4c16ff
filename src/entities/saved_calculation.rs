//! Saved calculation entity - A named snapshot of one calculator's inputs and results.
//!
//! Inputs and results are stored as JSON text of the calculator's own record, without the
//! tag. `calculator_type` holds the tag used to decode both on read.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Saved calculation database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "saved_calculations")]
pub struct Model {
    /// Unique identifier, assigned on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Calculator wire name (`sip`, `sip-stepup`, `lumpsum`, `swp`)
    pub calculator_type: String,
    /// User-chosen name; the only mutable column
    pub name: String,
    /// JSON of the calculator's input record
    #[sea_orm(column_type = "Text")]
    pub inputs: String,
    /// JSON of the calculator's result record
    #[sea_orm(column_type = "Text")]
    pub results: String,
    /// When the snapshot was saved
    pub created_at: DateTimeUtc,
}

/// `SavedCalculation` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
