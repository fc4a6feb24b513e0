//! Optimistic Sync Protocol
//!
//! The client holds a disposable mirror of assignment data that is mutated
//! before the server confirms. There is no undo log: on any write failure the
//! typed error is surfaced AND the whole scope is refetched from the gateway,
//! discarding the stale optimistic state. The mirror is advisory — never the
//! source of truth after a failure.

use std::collections::HashMap;

use shared::date::DayKey;
use shared::error::AppResult;
use shared::models::{AssignmentCreate, AssignmentUpdate, ShiftAssignment};

use crate::db::Gateway;
use crate::lifecycle::AssignmentService;

/// Client-held copy of assignment data
#[derive(Debug, Default)]
pub struct AssignmentMirror {
    entries: HashMap<String, ShiftAssignment>,
}

impl AssignmentMirror {
    pub fn get(&self, id: &str) -> Option<&ShiftAssignment> {
        self.entries.get(id)
    }

    pub fn insert(&mut self, assignment: ShiftAssignment) {
        self.entries.insert(assignment.id.clone(), assignment);
    }

    pub fn remove(&mut self, id: &str) -> Option<ShiftAssignment> {
        self.entries.remove(id)
    }

    /// Assignments on one calendar day, unordered
    pub fn on_day(&self, day: &DayKey) -> Vec<&ShiftAssignment> {
        self.entries.values().filter(|a| &a.date == day).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the whole mirror with server truth. The single reconciliation
    /// primitive — there is no fine-grained rollback.
    pub fn reconcile(&mut self, server_truth: Vec<ShiftAssignment>) {
        self.entries = server_truth
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();
    }
}

/// One organization's interactive editing session.
///
/// Each operation applies the mutation to the mirror first, then issues the
/// server write; on success the touched entry is reconciled with the server's
/// record, on failure the error is returned and the mirror is refetched.
pub struct SyncSession<G: Gateway> {
    service: AssignmentService<G>,
    organization_id: String,
    mirror: AssignmentMirror,
    pending_seq: u64,
}

impl<G: Gateway> SyncSession<G> {
    pub fn new(service: AssignmentService<G>, organization_id: impl Into<String>) -> Self {
        Self {
            service,
            organization_id: organization_id.into(),
            mirror: AssignmentMirror::default(),
            pending_seq: 0,
        }
    }

    pub fn mirror(&self) -> &AssignmentMirror {
        &self.mirror
    }

    /// Load or reload the full entity set for this organization
    pub async fn refresh(&mut self) -> AppResult<()> {
        let truth = self.service.for_organization(&self.organization_id).await?;
        self.mirror.reconcile(truth);
        Ok(())
    }

    pub async fn create(&mut self, data: AssignmentCreate) -> AppResult<ShiftAssignment> {
        // Normalize up front so the optimistic entry carries the same day the
        // server will store; bad input fails before any mutation.
        let day = DayKey::normalize(&data.date)?;
        self.pending_seq += 1;
        let provisional_id = format!("pending:{}", self.pending_seq);
        let now = shared::util::now_iso();
        self.mirror.insert(ShiftAssignment {
            id: provisional_id.clone(),
            employee_id: data.employee_id.clone(),
            shift_definition_id: data.shift_definition_id.clone(),
            store_id: data.store_id.clone(),
            date: day,
            work_hours: data.work_hours.unwrap_or(0.0),
            organization_id: data.organization_id.clone(),
            created_at: now.clone(),
            updated_at: now,
        });

        match self.service.create(data).await {
            Ok(record) => {
                self.mirror.remove(&provisional_id);
                self.mirror.insert(record.clone());
                Ok(record)
            }
            Err(e) => self.rollback(e).await,
        }
    }

    pub async fn update(&mut self, id: &str, data: AssignmentUpdate) -> AppResult<ShiftAssignment> {
        if let Some(entry) = self.mirror.entries.get_mut(id) {
            apply_patch(entry, &data);
        }
        match self.service.update(id, data).await {
            Ok(record) => {
                self.mirror.insert(record.clone());
                Ok(record)
            }
            Err(e) => self.rollback(e).await,
        }
    }

    /// Drag-move: the mirror entry jumps to the new day immediately
    pub async fn move_assignment(&mut self, id: &str, new_date: &str) -> AppResult<ShiftAssignment> {
        if let Ok(day) = DayKey::normalize(new_date)
            && let Some(entry) = self.mirror.entries.get_mut(id)
        {
            entry.date = day;
        }
        match self.service.move_assignment(id, new_date).await {
            Ok(record) => {
                self.mirror.insert(record.clone());
                Ok(record)
            }
            Err(e) => self.rollback(e).await,
        }
    }

    pub async fn delete(&mut self, id: &str) -> AppResult<()> {
        self.mirror.remove(id);
        match self.service.delete(id).await {
            Ok(()) => Ok(()),
            Err(e) => self.rollback(e).await,
        }
    }

    /// Forced refetch after a failed write: the one corrective action this
    /// core takes on its own. If the refetch itself fails the original error
    /// still wins — the mirror is merely stale, and the caller already knows
    /// the write did not land.
    async fn rollback<T>(&mut self, error: shared::error::AppError) -> AppResult<T> {
        if let Err(refetch_error) = self.refresh().await {
            tracing::warn!(error = %refetch_error, "refetch after failed write also failed");
        }
        Err(error)
    }
}

fn apply_patch(entry: &mut ShiftAssignment, data: &AssignmentUpdate) {
    if let Some(employee_id) = &data.employee_id {
        entry.employee_id = employee_id.clone();
    }
    if let Some(definition_id) = &data.shift_definition_id {
        entry.shift_definition_id = definition_id.clone();
    }
    if let Some(store_id) = &data.store_id {
        entry.store_id = store_id.clone();
    }
    if let Some(raw) = &data.date
        && let Ok(day) = DayKey::normalize(raw)
    {
        entry.date = day;
    }
    if let Some(hours) = data.work_hours {
        entry.work_hours = hours;
    }
}
