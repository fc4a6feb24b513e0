//! Shared types for the roster core
//!
//! Entity models, the error taxonomy and date normalization used across
//! the workspace crates.

pub mod date;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use date::{DayKey, YearMonth};
pub use error::{AppError, AppResult, CascadeReport};
pub use serde::{Deserialize, Serialize};
