//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (--config / TASKBOARD_CONFIG)
//!     → loader.rs (parse & deserialize, defaults for missing sections)
//!     → environment overrides (PORT, HOST, STORE_URI, LOG_LEVEL)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Every field has a default so the service starts with no file at all
//! - Environment wins over the file, matching how the service is deployed
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, SecurityConfig, ServiceConfig, StoreConfig,
    TimeoutConfig,
};
