//! Shared state handed to every API handler.

use crate::{cache::SavedCalculationCache, config::presets::CalculatorPresets};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the saved-calculation store
    pub db: DatabaseConnection,
    /// Summary cache, refreshed after every mutation
    pub cache: SavedCalculationCache,
    /// Default calculator inputs
    pub presets: Arc<CalculatorPresets>,
}

impl AppState {
    /// Creates the state from its parts.
    #[must_use]
    pub const fn new(
        db: DatabaseConnection,
        cache: SavedCalculationCache,
        presets: Arc<CalculatorPresets>,
    ) -> Self {
        Self {
            db,
            cache,
            presets,
        }
    }
}
