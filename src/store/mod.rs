//! Document store subsystem.
//!
//! # Data Flow
//! ```text
//! STORE_URI
//!     → StoreLocation::parse (memory:// | file://<path>)
//!     → DocumentStore (DashMap of documents, optional JSON snapshot)
//!     → shared as Arc<dyn TaskStore> with every handler
//! ```
//!
//! # Design Decisions
//! - The store owns validation, the same way a schema-aware driver would
//! - Writes are serialized inside the store; callers never lock
//! - A failed snapshot write rolls the in-memory mutation back

pub mod document;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::tasks::{NewTask, Task, TaskPatch, ValidationError};

pub use document::DocumentStore;

/// Errors raised by a task store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected by field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading or writing the snapshot failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be encoded or decoded.
    #[error("store snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// The connection string names no supported backend.
    #[error("unsupported store URI '{0}' (expected memory:// or file://<path>)")]
    UnsupportedUri(String),
}

impl StoreError {
    /// Whether the caller supplied bad input, as opposed to the store failing.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence interface for tasks.
///
/// `update` and `delete` return `Ok(None)` when no task has the given id, in
/// which case nothing was written.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks, newest first.
    async fn list(&self) -> StoreResult<Vec<Task>>;

    /// Validate and persist a new task, assigning its id and creation time.
    async fn insert(&self, new: NewTask) -> StoreResult<Task>;

    /// Apply the supplied fields of `patch` and return the updated task.
    async fn update(&self, id: &str, patch: TaskPatch) -> StoreResult<Option<Task>>;

    /// Remove a task permanently and return what was removed.
    async fn delete(&self, id: &str) -> StoreResult<Option<Task>>;

    /// Number of stored tasks. Doubles as a liveness probe.
    async fn count(&self) -> StoreResult<usize>;
}

/// Where the documents live, parsed from a store connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Volatile, process-local collection.
    Memory,
    /// Collection snapshotted to a JSON file after every write.
    File(PathBuf),
}

impl StoreLocation {
    pub fn parse(uri: &str) -> StoreResult<Self> {
        let uri = uri.trim();
        if let Some(rest) = uri.strip_prefix("memory://") {
            if rest.is_empty() {
                return Ok(StoreLocation::Memory);
            }
        } else if let Some(path) = uri.strip_prefix("file://") {
            if !path.is_empty() {
                return Ok(StoreLocation::File(PathBuf::from(path)));
            }
        }
        Err(StoreError::UnsupportedUri(uri.to_string()))
    }
}

/// Open the store named by `uri`.
pub async fn open(uri: &str) -> StoreResult<Arc<dyn TaskStore>> {
    let store = match StoreLocation::parse(uri)? {
        StoreLocation::Memory => DocumentStore::in_memory(),
        StoreLocation::File(path) => DocumentStore::open_file(path).await?,
    };
    tracing::info!(uri = %uri, documents = store.len(), "Task store opened");
    Ok(Arc::new(store))
}
