//! Assignment Lifecycle & Integrity Service
//!
//! Domain core for multi-store shift planning: assignment lifecycle with
//! conflict checking and canonical-day normalization, best-effort cascade
//! deletes for stores and employees, monthly hours aggregation, and an
//! optimistic client-mirror sync protocol. Storage goes through the
//! [`db::Gateway`] abstraction over an embedded document store.
//!
//! # Services
//!
//! - [`AssignmentService`] - create/update/move/delete of single assignments
//! - [`CascadeService`] - store/employee deletion with dependent cleanup
//! - [`HoursService`] - per-employee/store/month totals and report rows
//! - [`SyncSession`] - optimistic mirror with rollback-by-refetch
//! - [`StoreService`] / [`EmployeeService`] / [`DefinitionService`] - parent
//!   entity management

pub mod cascade;
pub mod conflict;
pub mod db;
pub mod definitions;
pub mod employees;
pub mod hours;
pub mod lifecycle;
pub mod logger;
pub mod stores;
pub mod sync;

// Re-exports
pub use cascade::CascadeService;
pub use conflict::{ConflictPolicy, find_conflict};
pub use db::{Gateway, SurrealGateway};
pub use definitions::DefinitionService;
pub use employees::EmployeeService;
pub use hours::{HoursService, StoreMonthTotal};
pub use lifecycle::AssignmentService;
pub use stores::StoreService;
pub use sync::{AssignmentMirror, SyncSession};
