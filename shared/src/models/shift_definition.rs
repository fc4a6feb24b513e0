//! Shift Definition Model
//!
//! A named, timed template ("Early, 06:00–14:00") reusable across many
//! assignments. Organization-scoped and store-independent. A definition
//! missing its title or times is invalid and must never reach callers; the
//! read paths lazily delete such records on discovery.

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Title of the non-work marker whose days count as vacation, not hours
pub const VACATION_MARKER: &str = "U";

/// Shift definition entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftDefinition {
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub start_time: String,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub end_time: String,
    /// Relative display order in the calendar
    #[serde(default, deserialize_with = "serde_helpers::i64_zero")]
    pub priority: i64,
    /// When set, assigned hours are left out of all monthly totals
    /// (used for non-work markers like vacation)
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub exclude_from_calculations: bool,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub organization_id: String,
}

impl ShiftDefinition {
    /// Invariant check: title, start time and end time all present
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.start_time.trim().is_empty()
            && !self.end_time.trim().is_empty()
    }

    pub fn is_vacation(&self) -> bool {
        self.title == VACATION_MARKER
    }
}

/// Create shift definition payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionCreate {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub exclude_from_calculations: Option<bool>,
    pub organization_id: String,
}

/// Update shift definition payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_from_calculations: Option<bool>,
}
