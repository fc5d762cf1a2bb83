//! Client application.
//!
//! # Data Flow
//! ```text
//! user action
//!     → app.rs (TodoApp: one HTTP call per action)
//!     → api.rs (TaskClient, reqwest)
//!     → state.rs (reduce(state, action) → state)
//!     → render.rs (View → text)
//! ```
//!
//! # Design Decisions
//! - State is a plain value replaced by a single transition function
//! - Mutations patch local state from the response; nothing is re-fetched
//! - No retries, cancellation or de-duplication: overlapping requests race
//!   and their results are applied in arrival order

pub mod api;
pub mod app;
pub mod render;
pub mod shell;
pub mod state;

pub use api::{ClientError, TaskClient, DEFAULT_API_URL};
pub use app::{TaskRef, TodoApp};
pub use render::View;
pub use state::{reduce, Action, BoardState};
