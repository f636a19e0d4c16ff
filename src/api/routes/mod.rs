//! Route handlers, grouped by resource.

/// Calculation, comparison, and preset endpoints
pub mod calculations;
/// Health check endpoint
pub mod health;
/// Saved calculation CRUD endpoints
pub mod saved;
