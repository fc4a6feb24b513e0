//! Hours Aggregation Engine
//!
//! Per-employee/per-store/per-month totals. Aggregation deliberately does NOT
//! enforce the one-per-day rule — legacy double-booked days still count in
//! full; only the lifecycle manager's create/edit paths police conflicts.

use std::collections::HashMap;

use serde_json::json;

use shared::date::YearMonth;
use shared::error::{AppError, AppResult};
use shared::models::{Employee, ShiftAssignment, ShiftDefinition, Store};

use crate::db::{Gateway, collections};
use crate::definitions::DefinitionService;

/// One report row: a store's total worked hours in a month.
/// Stores with a zero total never appear in report output.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreMonthTotal {
    pub store_id: String,
    pub store_name: String,
    pub total_hours: f64,
}

#[derive(Clone)]
pub struct HoursService<G> {
    gateway: G,
    definitions: DefinitionService<G>,
}

impl<G: Gateway> HoursService<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            definitions: DefinitionService::new(gateway.clone()),
            gateway,
        }
    }

    /// Sum one employee's worked hours in a month, optionally at one store.
    ///
    /// Assignments whose definition carries `exclude_from_calculations` are
    /// skipped; missing `work_hours` already defaulted to 0 at the gateway
    /// boundary. An empty month is 0.0, not an error.
    pub async fn monthly_hours(
        &self,
        employee_id: &str,
        store_id: Option<&str>,
        month: &YearMonth,
    ) -> AppResult<f64> {
        let mut filters = vec![("employee_id", json!(employee_id))];
        if let Some(store_id) = store_id {
            filters.push(("store_id", json!(store_id)));
        }
        let assignments: Vec<ShiftAssignment> =
            self.gateway.query(collections::ASSIGNMENTS, &filters).await?;

        let mut cache: DefinitionCache = HashMap::new();
        let mut total = 0.0;
        for assignment in assignments.iter().filter(|a| month.contains(&a.date)) {
            let definition = self.cached_definition(&mut cache, &assignment.shift_definition_id).await?;
            if definition.as_ref().is_some_and(|d| d.exclude_from_calculations) {
                continue;
            }
            total += assignment.work_hours;
        }
        Ok(total)
    }

    /// Sum of [`Self::monthly_hours`] over every employee of the store's
    /// organization. Reports use this to decide whether a store/month is
    /// shown at all.
    pub async fn total_across_employees(
        &self,
        store_id: &str,
        month: &YearMonth,
    ) -> AppResult<f64> {
        let store: Store = self
            .gateway
            .get(collections::STORES, store_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Store {store_id} not found")))?;
        let employees: Vec<Employee> = self
            .gateway
            .query(
                collections::EMPLOYEES,
                &[("organization_id", json!(store.organization_id))],
            )
            .await?;

        let mut total = 0.0;
        for employee in &employees {
            total += self.monthly_hours(&employee.id, Some(store_id), month).await?;
        }
        Ok(total)
    }

    /// Report rows for one organization and month. Zero-total stores are
    /// suppressed from the output, not merely hidden downstream.
    pub async fn monthly_store_totals(
        &self,
        organization_id: &str,
        month: &YearMonth,
    ) -> AppResult<Vec<StoreMonthTotal>> {
        let stores: Vec<Store> = self
            .gateway
            .query(
                collections::STORES,
                &[("organization_id", json!(organization_id))],
            )
            .await?;

        let mut rows = Vec::new();
        for store in stores {
            let total = self.total_across_employees(&store.id, month).await?;
            if total > 0.0 {
                rows.push(StoreMonthTotal {
                    store_id: store.id,
                    store_name: store.name,
                    total_hours: total,
                });
            }
        }
        rows.sort_by(|a, b| a.store_name.cmp(&b.store_name));
        Ok(rows)
    }

    /// Count an employee's vacation days in a month: assignments whose
    /// definition title is the vacation marker.
    pub async fn vacation_days(&self, employee_id: &str, month: &YearMonth) -> AppResult<u32> {
        let assignments: Vec<ShiftAssignment> = self
            .gateway
            .query(
                collections::ASSIGNMENTS,
                &[("employee_id", json!(employee_id))],
            )
            .await?;

        let mut cache: DefinitionCache = HashMap::new();
        let mut days = 0;
        for assignment in assignments.iter().filter(|a| month.contains(&a.date)) {
            let definition = self.cached_definition(&mut cache, &assignment.shift_definition_id).await?;
            if definition.as_ref().is_some_and(|d| d.is_vacation()) {
                days += 1;
            }
        }
        Ok(days)
    }

    /// Per-call memoization of definition lookups; the lazy-delete pass for
    /// incomplete definitions runs inside `resolve_valid`.
    async fn cached_definition(
        &self,
        cache: &mut DefinitionCache,
        definition_id: &str,
    ) -> AppResult<Option<ShiftDefinition>> {
        if let Some(hit) = cache.get(definition_id) {
            return Ok(hit.clone());
        }
        let resolved = self.definitions.resolve_valid(definition_id).await?;
        cache.insert(definition_id.to_string(), resolved.clone());
        Ok(resolved)
    }
}

type DefinitionCache = HashMap<String, Option<ShiftDefinition>>;
