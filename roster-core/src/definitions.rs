//! Shift Definition Service
//!
//! Organization-scoped, store-independent templates. Incomplete definitions
//! (missing title or times) are never surfaced: any read path that touches
//! one deletes it and reports the definition as absent.

use serde_json::json;

use shared::error::{AppError, AppResult};
use shared::models::{DefinitionCreate, DefinitionUpdate, ShiftDefinition};

use crate::db::{Gateway, collections};

#[derive(Clone)]
pub struct DefinitionService<G> {
    gateway: G,
}

impl<G: Gateway> DefinitionService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, data: DefinitionCreate) -> AppResult<ShiftDefinition> {
        validate_fields(&data.title, &data.start_time, &data.end_time)?;
        let definition = ShiftDefinition {
            id: String::new(),
            title: data.title,
            start_time: data.start_time,
            end_time: data.end_time,
            priority: data.priority.unwrap_or(0),
            exclude_from_calculations: data.exclude_from_calculations.unwrap_or(false),
            organization_id: data.organization_id,
        };
        let id = self
            .gateway
            .create(collections::SHIFT_DEFINITIONS, &definition)
            .await?;
        self.resolve_valid(&id)
            .await?
            .ok_or_else(|| AppError::gateway("Shift definition vanished after create"))
    }

    pub async fn update(&self, id: &str, data: DefinitionUpdate) -> AppResult<ShiftDefinition> {
        let existing = self
            .resolve_valid(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shift definition {id} not found")))?;

        // The update must not break the completeness invariant
        let title = data.title.as_deref().unwrap_or(&existing.title);
        let start = data.start_time.as_deref().unwrap_or(&existing.start_time);
        let end = data.end_time.as_deref().unwrap_or(&existing.end_time);
        validate_fields(title, start, end)?;

        let patch = serde_json::to_value(&data)
            .map_err(|e| AppError::gateway(format!("Failed to serialize patch: {e}")))?;
        self.gateway
            .update(collections::SHIFT_DEFINITIONS, id, patch)
            .await?;
        self.resolve_valid(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shift definition {id} not found")))
    }

    /// Resolve a definition, enforcing the completeness invariant.
    ///
    /// An incomplete record is deleted on the spot and reported as absent, so
    /// callers only ever see valid definitions.
    pub async fn resolve_valid(&self, id: &str) -> AppResult<Option<ShiftDefinition>> {
        let Some(definition) = self
            .gateway
            .get::<ShiftDefinition>(collections::SHIFT_DEFINITIONS, id)
            .await?
        else {
            return Ok(None);
        };
        if definition.is_complete() {
            return Ok(Some(definition));
        }
        tracing::warn!(id, "discarding incomplete shift definition");
        self.gateway.delete(collections::SHIFT_DEFINITIONS, id).await?;
        Ok(None)
    }

    /// All valid definitions of one organization, ordered by display priority
    pub async fn list(&self, organization_id: &str) -> AppResult<Vec<ShiftDefinition>> {
        let rows: Vec<ShiftDefinition> = self
            .gateway
            .query(
                collections::SHIFT_DEFINITIONS,
                &[("organization_id", json!(organization_id))],
            )
            .await?;

        let mut valid = Vec::with_capacity(rows.len());
        for definition in rows {
            if definition.is_complete() {
                valid.push(definition);
            } else {
                tracing::warn!(id = %definition.id, "discarding incomplete shift definition");
                self.gateway
                    .delete(collections::SHIFT_DEFINITIONS, &definition.id)
                    .await?;
            }
        }
        valid.sort_by_key(|d| d.priority);
        Ok(valid)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.gateway.delete(collections::SHIFT_DEFINITIONS, id).await
    }
}

fn validate_fields(title: &str, start_time: &str, end_time: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Shift definition title must not be empty"));
    }
    if start_time.trim().is_empty() || end_time.trim().is_empty() {
        return Err(AppError::validation(
            "Shift definition start and end time must not be empty",
        ));
    }
    Ok(())
}
