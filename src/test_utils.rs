//! Shared test utilities for `CorpusBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating saved calculations with sensible defaults.

use crate::{
    core::{
        projection::{CalculationInput, SipInput, calculate},
        saved::{self, SavedCalculation},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The SIP preset: 10,000 a month for 10 years at 12%.
#[must_use]
pub const fn sip_input() -> CalculationInput {
    CalculationInput::Sip(SipInput {
        monthly_investment: 10_000.0,
        duration_years: 10,
        expected_return: 12.0,
    })
}

/// Saves a SIP calculation built from [`sip_input`] under `name`.
pub async fn create_test_calculation(
    db: &DatabaseConnection,
    name: &str,
) -> Result<SavedCalculation> {
    let inputs = sip_input();
    let results = calculate(&inputs);
    saved::create_saved_calculation(db, name, &inputs, &results).await
}
