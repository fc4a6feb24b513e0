//! Cascade Integrity Engine
//!
//! Removes dependent assignments when a store or employee goes away.
//! Cascades are best-effort sequential batches, not transactions: every
//! dependent delete is attempted, survivors are collected, and the parent is
//! only removed once no dependent remains. The caller always learns which of
//! the three end states it got via [`CascadeReport`].
//!
//! Shift definitions are organization-scoped, so a store cascade leaves them
//! alone.

use serde_json::json;

use shared::error::{AppError, AppResult, CascadeReport};
use shared::models::{Employee, ShiftAssignment, Store};

use crate::db::{Gateway, collections};

#[derive(Clone)]
pub struct CascadeService<G> {
    gateway: G,
}

impl<G: Gateway> CascadeService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Delete a store and every assignment referencing it.
    ///
    /// Surviving dependents leave the store in place and surface as
    /// [`AppError::PartialCascade`]; a childless store whose own delete fails
    /// surfaces the same way with an empty survivor list.
    pub async fn delete_store_cascade(&self, store_id: &str) -> AppResult<CascadeReport> {
        self.gateway
            .get::<Store>(collections::STORES, store_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Store {store_id} not found")))?;

        let dependents: Vec<ShiftAssignment> = self
            .gateway
            .query(collections::ASSIGNMENTS, &[("store_id", json!(store_id))])
            .await?;
        let report = self.delete_dependents(&dependents).await;
        self.finish(collections::STORES, store_id, report).await
    }

    /// Delete an employee and every assignment referencing it
    pub async fn delete_employee_cascade(&self, employee_id: &str) -> AppResult<CascadeReport> {
        self.gateway
            .get::<Employee>(collections::EMPLOYEES, employee_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {employee_id} not found")))?;

        let dependents: Vec<ShiftAssignment> = self
            .gateway
            .query(
                collections::ASSIGNMENTS,
                &[("employee_id", json!(employee_id))],
            )
            .await?;
        let report = self.delete_dependents(&dependents).await;
        self.finish(collections::EMPLOYEES, employee_id, report).await
    }

    /// Soft employee delete: remove only the employee record, deliberately
    /// leaving its assignments with a dangling `employee_id`. Both this and
    /// the cascading mode are reachable from the operator UI.
    pub async fn delete_employee(&self, employee_id: &str) -> AppResult<()> {
        self.gateway
            .get::<Employee>(collections::EMPLOYEES, employee_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {employee_id} not found")))?;
        self.gateway.delete(collections::EMPLOYEES, employee_id).await?;
        tracing::info!(employee_id, "employee removed without cascade");
        Ok(())
    }

    async fn delete_dependents(&self, dependents: &[ShiftAssignment]) -> CascadeReport {
        let mut report = CascadeReport::default();
        for assignment in dependents {
            match self.gateway.delete(collections::ASSIGNMENTS, &assignment.id).await {
                Ok(()) => report.deleted_count += 1,
                Err(e) => {
                    tracing::warn!(id = %assignment.id, error = %e, "dependent delete failed");
                    report.failed_ids.push(assignment.id.clone());
                }
            }
        }
        report
    }

    /// Remove the parent once, and only once, all dependents are gone
    async fn finish(
        &self,
        collection: &str,
        parent_id: &str,
        mut report: CascadeReport,
    ) -> AppResult<CascadeReport> {
        if !report.failed_ids.is_empty() {
            tracing::warn!(parent_id, survivors = report.failed_ids.len(), "cascade incomplete, parent retained");
            return Err(AppError::PartialCascade(report));
        }
        if let Err(e) = self.gateway.delete(collection, parent_id).await {
            // Orphaned-but-childless: dependents are gone, parent is not
            tracing::warn!(parent_id, error = %e, "parent delete failed after clean cascade");
            return Err(AppError::PartialCascade(report));
        }
        report.parent_deleted = true;
        tracing::info!(parent_id, deleted = report.deleted_count, "cascade complete");
        Ok(report)
    }
}
