//! Employee Service
//!
//! Create/update/read only. Both delete modes (soft and cascading) live in
//! the cascade engine so their divergent semantics stay side by side.

use serde_json::json;

use shared::error::{AppError, AppResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};

use crate::db::{Gateway, collections};

#[derive(Clone)]
pub struct EmployeeService<G> {
    gateway: G,
}

impl<G: Gateway> EmployeeService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, data: EmployeeCreate) -> AppResult<Employee> {
        if data.first_name.trim().is_empty() {
            return Err(AppError::validation("Employee first name must not be empty"));
        }
        let employee = Employee {
            id: String::new(),
            first_name: data.first_name,
            last_name: data.last_name.unwrap_or_default(),
            email: data.email,
            phone: data.phone,
            role: data.role.unwrap_or_default(),
            organization_id: data.organization_id,
            home_store_id: data.home_store_id,
        };
        let id = self.gateway.create(collections::EMPLOYEES, &employee).await?;
        self.find(&id)
            .await?
            .ok_or_else(|| AppError::gateway("Employee vanished after create"))
    }

    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> AppResult<Employee> {
        let existing = self
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
        if data
            .first_name
            .as_deref()
            .unwrap_or(&existing.first_name)
            .trim()
            .is_empty()
        {
            return Err(AppError::validation("Employee first name must not be empty"));
        }
        let patch = serde_json::to_value(&data)
            .map_err(|e| AppError::gateway(format!("Failed to serialize patch: {e}")))?;
        self.gateway.update(collections::EMPLOYEES, id, patch).await?;
        self.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))
    }

    pub async fn find(&self, id: &str) -> AppResult<Option<Employee>> {
        self.gateway.get(collections::EMPLOYEES, id).await
    }

    /// All employees of one organization, ordered by first name
    pub async fn list(&self, organization_id: &str) -> AppResult<Vec<Employee>> {
        let mut employees: Vec<Employee> = self
            .gateway
            .query(
                collections::EMPLOYEES,
                &[("organization_id", json!(organization_id))],
            )
            .await?;
        employees.sort_by(|a, b| a.first_name.cmp(&b.first_name));
        Ok(employees)
    }
}
