//! Task domain.
//!
//! # Data Flow
//! ```text
//! POST body  → NewTask   ─┐
//!                         ├→ validation.rs (trim, require text)
//! PUT body   → TaskPatch ─┘        → store (assigns id, createdAt)
//!                                  → Task (JSON over the wire)
//! ```
//!
//! # Design Decisions
//! - `Task` is the only persisted entity; no task references another
//! - Partial updates carry one `Option` per field so a supplied `false`
//!   is distinguishable from an absent field

pub mod model;
pub mod validation;

pub use model::{NewTask, Task, TaskPatch};
pub use validation::ValidationError;
