//! Assignment Lifecycle Manager
//!
//! Create, update, move (drag) and delete of a single assignment. Dates are
//! normalized to canonical day keys at this boundary; conflict checks run per
//! the configured [`ConflictPolicy`]; parent references must resolve before a
//! write lands. All expected business conditions are typed results.

use serde_json::json;

use shared::date::DayKey;
use shared::error::{AppError, AppResult};
use shared::models::{AssignmentCreate, AssignmentUpdate, Employee, ShiftAssignment, Store};
use shared::util::now_iso;

use crate::conflict::{ConflictPolicy, find_conflict};
use crate::db::{Gateway, collections};
use crate::definitions::DefinitionService;

#[derive(Clone)]
pub struct AssignmentService<G> {
    gateway: G,
    definitions: DefinitionService<G>,
    policy: ConflictPolicy,
}

impl<G: Gateway> AssignmentService<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_policy(gateway, ConflictPolicy::default())
    }

    pub fn with_policy(gateway: G, policy: ConflictPolicy) -> Self {
        Self {
            definitions: DefinitionService::new(gateway.clone()),
            gateway,
            policy,
        }
    }

    /// Create an assignment.
    ///
    /// Normalizes the date, resolves all three parent references, runs the
    /// conflict check, then persists with fresh audit timestamps. Returns the
    /// persisted record including its generated id.
    pub async fn create(&self, data: AssignmentCreate) -> AppResult<ShiftAssignment> {
        validate_reference(&data.employee_id, "employee_id")?;
        validate_reference(&data.shift_definition_id, "shift_definition_id")?;
        validate_reference(&data.store_id, "store_id")?;

        let day = DayKey::normalize(&data.date)?;
        self.resolve_employee(&data.employee_id).await?;
        self.resolve_store(&data.store_id).await?;
        self.resolve_definition(&data.shift_definition_id).await?;

        if self.policy.on_create {
            self.ensure_no_conflict(&data.employee_id, &day, None).await?;
        }

        let now = now_iso();
        let record = ShiftAssignment {
            id: String::new(),
            employee_id: data.employee_id,
            shift_definition_id: data.shift_definition_id,
            store_id: data.store_id,
            date: day,
            work_hours: data.work_hours.unwrap_or(0.0),
            organization_id: data.organization_id,
            created_at: now.clone(),
            updated_at: now,
        };
        let id = self.gateway.create(collections::ASSIGNMENTS, &record).await?;
        tracing::debug!(id = %id, employee = %record.employee_id, date = %record.date, "assignment created");
        self.find(&id)
            .await?
            .ok_or_else(|| AppError::gateway("Assignment vanished after create"))
    }

    /// Partial update. Changed references are re-resolved, a changed date is
    /// re-normalized, and the conflict check excludes the record itself.
    pub async fn update(&self, id: &str, data: AssignmentUpdate) -> AppResult<ShiftAssignment> {
        let existing = self
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Assignment {id} not found")))?;

        let day = match data.date.as_deref() {
            Some(raw) => Some(DayKey::normalize(raw)?),
            None => None,
        };
        if let Some(employee_id) = &data.employee_id {
            self.resolve_employee(employee_id).await?;
        }
        if let Some(store_id) = &data.store_id {
            self.resolve_store(store_id).await?;
        }
        if let Some(definition_id) = &data.shift_definition_id {
            self.resolve_definition(definition_id).await?;
        }

        if self.policy.on_update {
            let employee_id = data.employee_id.as_deref().unwrap_or(&existing.employee_id);
            let target_day = day.as_ref().unwrap_or(&existing.date);
            self.ensure_no_conflict(employee_id, target_day, Some(id)).await?;
        }

        let mut patch = serde_json::to_value(&data)
            .map_err(|e| AppError::gateway(format!("Failed to serialize patch: {e}")))?;
        if let Some(obj) = patch.as_object_mut() {
            if let Some(day) = &day {
                obj.insert("date".into(), json!(day.to_string()));
            }
            obj.insert("updated_at".into(), json!(now_iso()));
        }
        self.gateway.update(collections::ASSIGNMENTS, id, patch).await?;
        self.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Assignment {id} not found")))
    }

    /// Date-only update backing drag interactions. Callers pair this with an
    /// optimistic mirror mutation (see the sync module).
    pub async fn move_assignment(&self, id: &str, new_date: &str) -> AppResult<ShiftAssignment> {
        let existing = self
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Assignment {id} not found")))?;
        let day = DayKey::normalize(new_date)?;

        if self.policy.on_move {
            self.ensure_no_conflict(&existing.employee_id, &day, Some(id)).await?;
        }

        let patch = json!({ "date": day.to_string(), "updated_at": now_iso() });
        self.gateway.update(collections::ASSIGNMENTS, id, patch).await?;
        tracing::debug!(id, from = %existing.date, to = %day, "assignment moved");
        self.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Assignment {id} not found")))
    }

    /// Idempotent delete — the UI can race a cascade, so a missing id is fine.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.gateway.delete(collections::ASSIGNMENTS, id).await
    }

    // ========== Queries ==========

    pub async fn find(&self, id: &str) -> AppResult<Option<ShiftAssignment>> {
        self.gateway.get(collections::ASSIGNMENTS, id).await
    }

    pub async fn for_employee(&self, employee_id: &str) -> AppResult<Vec<ShiftAssignment>> {
        self.gateway
            .query(
                collections::ASSIGNMENTS,
                &[("employee_id", json!(employee_id))],
            )
            .await
    }

    pub async fn for_store(&self, store_id: &str) -> AppResult<Vec<ShiftAssignment>> {
        self.gateway
            .query(collections::ASSIGNMENTS, &[("store_id", json!(store_id))])
            .await
    }

    pub async fn for_organization(&self, organization_id: &str) -> AppResult<Vec<ShiftAssignment>> {
        self.gateway
            .query(
                collections::ASSIGNMENTS,
                &[("organization_id", json!(organization_id))],
            )
            .await
    }

    /// One store's assignments on one canonical day
    pub async fn on_day(&self, store_id: &str, day: &DayKey) -> AppResult<Vec<ShiftAssignment>> {
        self.gateway
            .query(
                collections::ASSIGNMENTS,
                &[
                    ("store_id", json!(store_id)),
                    ("date", json!(day.to_string())),
                ],
            )
            .await
    }

    // ========== Internals ==========

    async fn ensure_no_conflict(
        &self,
        employee_id: &str,
        day: &DayKey,
        exclude_id: Option<&str>,
    ) -> AppResult<()> {
        let existing = self.for_employee(employee_id).await?;
        if find_conflict(&existing, employee_id, day, exclude_id).is_some() {
            return Err(AppError::conflict(format!(
                "Employee {employee_id} is already assigned on {day}"
            )));
        }
        Ok(())
    }

    async fn resolve_employee(&self, id: &str) -> AppResult<Employee> {
        self.gateway
            .get(collections::EMPLOYEES, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))
    }

    async fn resolve_store(&self, id: &str) -> AppResult<Store> {
        self.gateway
            .get(collections::STORES, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Store {id} not found")))
    }

    async fn resolve_definition(&self, id: &str) -> AppResult<()> {
        self.definitions
            .resolve_valid(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Shift definition {id} not found")))
    }
}

fn validate_reference(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
