//! Core business logic - framework-agnostic projections, validation, comparison, and storage.

/// Scenario comparison across calculators
pub mod comparison;
/// Indian-locale currency and number formatting
pub mod format;
/// The four projection calculators and their dispatch
pub mod projection;
/// Display-ready fields and tables for projections
pub mod report;
/// Saved-calculation store operations
pub mod saved;
/// Input bounds checked before projection
pub mod validation;
