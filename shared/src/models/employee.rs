//! Employee Model

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Employee role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeRole {
    Admin,
    #[default]
    User,
}

/// Employee entity
///
/// `last_name` is optional in the source data and defaults to empty; only
/// `first_name` is required to be non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub id: String,
    pub first_name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: EmployeeRole,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub organization_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_store_id: Option<String>,
}

impl Employee {
    /// Display name: "First Last", or just "First" when no last name exists
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<EmployeeRole>,
    pub organization_id: String,
    #[serde(default)]
    pub home_store_id: Option<String>,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<EmployeeRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_store_id: Option<String>,
}
