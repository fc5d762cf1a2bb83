//! Task board: a CRUD task service and its command-line client.
//!
//! # Architecture Overview
//!
//! ```text
//!   taskboard-cli                          taskboard (service)
//!  ┌───────────────────────┐   HTTP/JSON  ┌──────────────────────────────┐
//!  │ client::TodoApp       │─────────────▶│ http::server (axum + layers) │
//!  │   ├ api (reqwest)     │              │   └ handlers                 │
//!  │   ├ state (reducer)   │◀─────────────│        │                     │
//!  │   └ render (View)     │              │        ▼                     │
//!  └───────────────────────┘              │ store::TaskStore             │
//!                                         │   └ DocumentStore (+ file)   │
//!                                         └──────────────────────────────┘
//! ```

// Domain
pub mod tasks;

// Service
pub mod config;
pub mod http;
pub mod store;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

// Client application
pub mod client;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use tasks::{NewTask, Task, TaskPatch};
