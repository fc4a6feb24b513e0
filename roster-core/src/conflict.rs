//! Conflict Checker
//!
//! An employee can hold at most one assignment per calendar day, regardless
//! of store. The check is a pure function over candidate records; which
//! lifecycle paths run it is a [`ConflictPolicy`] decision.

use shared::date::DayKey;
use shared::models::ShiftAssignment;

/// Which lifecycle paths run the conflict check.
///
/// The system this replaces skipped the check on drag-move, letting a drag
/// double-book an employee. The default here enables all three paths; callers
/// that want the legacy behavior can switch `on_move` off.
#[derive(Debug, Clone, Copy)]
pub struct ConflictPolicy {
    pub on_create: bool,
    pub on_update: bool,
    pub on_move: bool,
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self {
            on_create: true,
            on_update: true,
            on_move: true,
        }
    }
}

impl ConflictPolicy {
    /// Legacy behavior: drag-moves land without a check
    pub fn legacy() -> Self {
        Self {
            on_move: false,
            ..Self::default()
        }
    }
}

/// Find an existing assignment colliding with the candidate employee/day.
///
/// `exclude_id` removes the record being edited from consideration so an
/// edit never conflicts with itself. Dates compare as canonical keys.
pub fn find_conflict<'a>(
    existing: &'a [ShiftAssignment],
    employee_id: &str,
    day: &DayKey,
    exclude_id: Option<&str>,
) -> Option<&'a ShiftAssignment> {
    existing.iter().find(|a| {
        a.employee_id == employee_id
            && &a.date == day
            && exclude_id.is_none_or(|excluded| a.id != excluded)
    })
}
