//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Calculator commands
pub mod calculator;

/// General utility commands
pub mod general;

/// Saved calculation commands
pub mod saved;

// Export commands
pub use calculator::{lumpsum, sip, stepup, swp};
pub use general::*;
pub use saved::{forget, history, rename, show};
