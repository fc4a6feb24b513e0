//! Store Service

use serde_json::json;

use shared::error::{AppError, AppResult};
use shared::models::{Store, StoreCreate, StoreUpdate};

use crate::db::{Gateway, collections};

#[derive(Clone)]
pub struct StoreService<G> {
    gateway: G,
}

impl<G: Gateway> StoreService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, data: StoreCreate) -> AppResult<Store> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Store name must not be empty"));
        }
        let store = Store {
            id: String::new(),
            name: data.name,
            street: data.street,
            postal_code: data.postal_code,
            city: data.city,
            organization_id: data.organization_id,
        };
        let id = self.gateway.create(collections::STORES, &store).await?;
        self.find(&id)
            .await?
            .ok_or_else(|| AppError::gateway("Store vanished after create"))
    }

    pub async fn update(&self, id: &str, data: StoreUpdate) -> AppResult<Store> {
        let existing = self
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Store {id} not found")))?;
        if data.name.as_deref().unwrap_or(&existing.name).trim().is_empty() {
            return Err(AppError::validation("Store name must not be empty"));
        }
        let patch = serde_json::to_value(&data)
            .map_err(|e| AppError::gateway(format!("Failed to serialize patch: {e}")))?;
        self.gateway.update(collections::STORES, id, patch).await?;
        self.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Store {id} not found")))
    }

    pub async fn find(&self, id: &str) -> AppResult<Option<Store>> {
        self.gateway.get(collections::STORES, id).await
    }

    /// All stores of one organization, ordered by name
    pub async fn list(&self, organization_id: &str) -> AppResult<Vec<Store>> {
        let mut stores: Vec<Store> = self
            .gateway
            .query(
                collections::STORES,
                &[("organization_id", json!(organization_id))],
            )
            .await?;
        stores.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stores)
    }
}
