//! Entity models
//!
//! Four collections: stores and employees are top-level, shift definitions
//! are organization-scoped templates, and assignments are the leaf entity
//! holding foreign keys to all three.

pub mod assignment;
pub mod employee;
pub mod serde_helpers;
pub mod shift_definition;
pub mod store;

pub use assignment::{AssignmentCreate, AssignmentUpdate, ShiftAssignment};
pub use employee::{Employee, EmployeeCreate, EmployeeRole, EmployeeUpdate};
pub use shift_definition::{
    DefinitionCreate, DefinitionUpdate, ShiftDefinition, VACATION_MARKER,
};
pub use store::{Store, StoreCreate, StoreUpdate};
