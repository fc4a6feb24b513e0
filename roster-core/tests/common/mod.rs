//! Shared test harness: in-memory gateway, seeding helpers and a wrapper
//! gateway that injects delete failures for partial-cascade scenarios.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use roster_core::db::{self, Gateway, SurrealGateway, collections};
use roster_core::{DefinitionService, EmployeeService, StoreService};
use shared::error::{AppError, AppResult};
use shared::models::{
    DefinitionCreate, Employee, EmployeeCreate, ShiftAssignment, ShiftDefinition, Store,
    StoreCreate,
};

pub const ORG: &str = "org-1";

pub async fn mem_gateway() -> SurrealGateway {
    roster_core::logger::init_logger_with_level("warn");
    db::connect_memory().await.expect("in-memory db")
}

pub async fn seed_store(gateway: &SurrealGateway, name: &str) -> Store {
    StoreService::new(gateway.clone())
        .create(StoreCreate {
            name: name.into(),
            street: "Main St 1".into(),
            postal_code: "10115".into(),
            city: "Berlin".into(),
            organization_id: ORG.into(),
        })
        .await
        .expect("seed store")
}

pub async fn seed_employee(gateway: &SurrealGateway, first_name: &str) -> Employee {
    EmployeeService::new(gateway.clone())
        .create(EmployeeCreate {
            first_name: first_name.into(),
            last_name: Some("Muster".into()),
            email: None,
            phone: None,
            role: None,
            organization_id: ORG.into(),
            home_store_id: None,
        })
        .await
        .expect("seed employee")
}

pub async fn seed_definition(
    gateway: &SurrealGateway,
    title: &str,
    exclude_from_calculations: bool,
) -> ShiftDefinition {
    DefinitionService::new(gateway.clone())
        .create(DefinitionCreate {
            title: title.into(),
            start_time: "06:00".into(),
            end_time: "14:00".into(),
            priority: None,
            exclude_from_calculations: Some(exclude_from_calculations),
            organization_id: ORG.into(),
        })
        .await
        .expect("seed definition")
}

/// Seed an assignment directly through the gateway, bypassing the lifecycle
/// manager and its conflict checker — simulates legacy data.
pub async fn seed_assignment_raw(
    gateway: &SurrealGateway,
    employee_id: &str,
    definition_id: &str,
    store_id: &str,
    date: &str,
    work_hours: f64,
) -> String {
    let record = ShiftAssignment {
        id: String::new(),
        employee_id: employee_id.into(),
        shift_definition_id: definition_id.into(),
        store_id: store_id.into(),
        date: shared::DayKey::normalize(date).expect("seed date"),
        work_hours,
        organization_id: ORG.into(),
        created_at: shared::util::now_iso(),
        updated_at: shared::util::now_iso(),
    };
    gateway
        .create(collections::ASSIGNMENTS, &record)
        .await
        .expect("seed assignment")
}

/// Gateway wrapper that fails deletes of chosen ids, for exercising
/// best-effort cascade and rollback paths.
#[derive(Clone)]
pub struct FlakyGateway {
    inner: SurrealGateway,
    fail_deletes: Arc<Mutex<HashSet<String>>>,
}

impl FlakyGateway {
    pub fn new(inner: SurrealGateway) -> Self {
        Self {
            inner,
            fail_deletes: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn fail_delete_of(&self, id: &str) {
        self.fail_deletes.lock().expect("poisoned").insert(id.into());
    }
}

impl Gateway for FlakyGateway {
    async fn create<T>(&self, collection: &str, doc: &T) -> AppResult<String>
    where
        T: Serialize + Sync,
    {
        self.inner.create(collection, doc).await
    }

    async fn get<T>(&self, collection: &str, id: &str) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.inner.get(collection, id).await
    }

    async fn query<T>(&self, collection: &str, filters: &[(&str, Value)]) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.inner.query(collection, filters).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> AppResult<()> {
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let blocked = self.fail_deletes.lock().expect("poisoned").contains(id);
        if blocked {
            return Err(AppError::gateway(format!("injected delete failure for {id}")));
        }
        self.inner.delete(collection, id).await
    }
}
