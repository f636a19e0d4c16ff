//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod saved_calculation;

pub use saved_calculation::{
    Column as SavedCalculationColumn, Entity as SavedCalculation, Model as SavedCalculationModel,
};
