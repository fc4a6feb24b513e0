//! Shift Assignment Model
//!
//! The leaf entity: one employee, one shift definition, one store, one
//! calendar day. Holds foreign keys to all three parent collections and must
//! not outlive them except through the soft employee-delete path.

use serde::{Deserialize, Serialize};

use super::serde_helpers;
use crate::date::DayKey;

/// Persisted shift assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftAssignment {
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub id: String,
    pub employee_id: String,
    pub shift_definition_id: String,
    pub store_id: String,
    /// Canonical calendar day (`YYYY-MM-DD`), no time-of-day
    pub date: DayKey,
    #[serde(default, deserialize_with = "serde_helpers::f64_zero")]
    pub work_hours: f64,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub organization_id: String,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub updated_at: String,
}

/// Create assignment payload
///
/// `date` is accepted in any representation the normalizer understands;
/// the service stores only the canonical day key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentCreate {
    pub employee_id: String,
    pub shift_definition_id: String,
    pub store_id: String,
    pub date: String,
    #[serde(default)]
    pub work_hours: Option<f64>,
    pub organization_id: String,
}

/// Update assignment payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_definition_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_hours: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Legacy documents miss fields or carry nulls; defaulting happens at
    // deserialization, never in business logic.
    #[test]
    fn sparse_document_gets_defaults() {
        let doc = serde_json::json!({
            "employee_id": "e1",
            "shift_definition_id": "d1",
            "store_id": "s1",
            "date": "2024-06-10",
            "work_hours": null
        });
        let assignment: ShiftAssignment = serde_json::from_value(doc).unwrap();
        assert_eq!(assignment.work_hours, 0.0);
        assert_eq!(assignment.organization_id, "");
        assert_eq!(assignment.date.to_string(), "2024-06-10");
    }

    #[test]
    fn incomplete_definition_is_detected() {
        let doc = serde_json::json!({ "title": "Early", "start_time": "06:00" });
        let def: crate::models::ShiftDefinition = serde_json::from_value(doc).unwrap();
        assert!(!def.is_complete());
        assert!(!def.exclude_from_calculations);
    }
}
