//! Store Model
//!
//! A physical business location that owns a work schedule. Deleting a store
//! must go through the cascade engine so its assignments do not outlive it.

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Store entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub street: String,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub postal_code: String,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "serde_helpers::string_empty")]
    pub organization_id: String,
}

/// Create store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCreate {
    pub name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
    pub organization_id: String,
}

/// Update store payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}
