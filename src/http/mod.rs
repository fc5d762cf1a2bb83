//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware stack)
//!     → request.rs (request ID, request span)
//!     → handlers.rs (decode body, one store call)
//!     → response.rs (Task JSON or {message} with mapped status)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use handlers::AppState;
pub use request::X_REQUEST_ID;
pub use response::{ApiError, ApiJson, Message};
pub use server::HttpServer;
