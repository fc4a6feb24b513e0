//! Unified error handling
//!
//! Every expected business condition (conflict, not-found, validation) is a
//! typed variant returned to the caller — nothing here is logged-and-swallowed
//! and nothing is retried automatically. The only corrective action in the
//! whole core is the sync session's forced refetch after a failed write.

use std::fmt;

/// Outcome of a cascade delete.
///
/// Cascades are best-effort sequential, not transactional, so the caller must
/// be able to tell apart three states: everything removed, some dependents
/// surviving, and a childless parent that could not be removed itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeReport {
    /// Number of dependent records successfully removed
    pub deleted_count: usize,
    /// Ids of dependent records that survived a failed delete
    pub failed_ids: Vec<String>,
    /// Whether the parent record itself was removed
    pub parent_deleted: bool,
}

impl fmt::Display for CascadeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} dependents deleted, {} surviving, parent {}",
            self.deleted_count,
            self.failed_ids.len(),
            if self.parent_deleted { "deleted" } else { "retained" }
        )
    }
}

/// Application error taxonomy
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Required field missing or invalid on create/update (400-class)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Employee already assigned on that calendar day (409-class)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Referenced employee/shift/store/assignment does not resolve (404-class)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Unparseable date input — never silently coerced
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A cascade removed some but not all records; carries the survivors
    #[error("Cascade incomplete: {0}")]
    PartialCascade(CascadeReport),

    /// Underlying document store I/O failure. Not retried by the core: apart
    /// from delete, no write is idempotent enough to retry blindly.
    #[error("Gateway error: {0}")]
    Gateway(String),
}

/// Result type for core operations
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate(input.into())
    }

    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }
}
