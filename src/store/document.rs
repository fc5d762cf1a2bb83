//! Embedded document store with optional JSON snapshot persistence.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::store::{StoreResult, TaskStore};
use crate::tasks::{validation, NewTask, Task, TaskPatch};

/// A task plus its insertion sequence, used to order equal timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Document {
    seq: u64,
    #[serde(flatten)]
    task: Task,
}

/// A single-collection document store.
///
/// Documents live in a `DashMap` keyed by id. When a snapshot path is set
/// every successful write rewrites the whole collection to that file
/// (temp file + rename), and the file is loaded again on startup.
pub struct DocumentStore {
    documents: DashMap<String, Document>,
    next_seq: AtomicU64,
    snapshot_path: Option<PathBuf>,
    /// Serializes write + snapshot so the file always matches memory.
    write_lock: Mutex<()>,
}

impl DocumentStore {
    /// Create an empty store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            documents: DashMap::new(),
            next_seq: AtomicU64::new(0),
            snapshot_path: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Open a store backed by a snapshot file, loading it if it exists.
    pub async fn open_file(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let mut store = Self::in_memory();

        if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            let documents: Vec<Document> = serde_json::from_str(&content)?;
            let next_seq = documents.iter().map(|d| d.seq + 1).max().unwrap_or(0);

            for doc in documents {
                store.documents.insert(doc.task.id.clone(), doc);
            }
            store.next_seq = AtomicU64::new(next_seq);
            tracing::info!(path = ?path, count = store.documents.len(), "Loaded task snapshot");
        }

        store.snapshot_path = Some(path);
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Current time, never earlier than the newest stored `created_at`.
    /// Must be called under `write_lock`.
    fn next_created_at(&self) -> DateTime<Utc> {
        let now = Utc::now();
        self.documents
            .iter()
            .map(|entry| entry.value().task.created_at)
            .max()
            .map_or(now, |latest| latest.max(now))
    }

    async fn persist(&self) -> StoreResult<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let mut documents: Vec<Document> =
            self.documents.iter().map(|entry| entry.value().clone()).collect();
        documents.sort_by_key(|d| d.seq);
        let json = serde_json::to_string_pretty(&documents)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, path).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for DocumentStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        let mut documents: Vec<Document> =
            self.documents.iter().map(|entry| entry.value().clone()).collect();
        documents.sort_by(|a, b| {
            b.task
                .created_at
                .cmp(&a.task.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(documents.into_iter().map(|d| d.task).collect())
    }

    async fn insert(&self, new: NewTask) -> StoreResult<Task> {
        let text = validation::require_text(new.text.as_deref())?;

        let _guard = self.write_lock.lock().await;
        let task = Task {
            id: Uuid::new_v4().to_string(),
            text,
            completed: new.completed.unwrap_or(false),
            created_at: self.next_created_at(),
        };
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.documents.insert(
            task.id.clone(),
            Document {
                seq,
                task: task.clone(),
            },
        );

        if let Err(e) = self.persist().await {
            self.documents.remove(&task.id);
            return Err(e);
        }

        tracing::debug!(task_id = %task.id, "Task inserted");
        Ok(task)
    }

    async fn update(&self, id: &str, mut patch: TaskPatch) -> StoreResult<Option<Task>> {
        if let Some(text) = &patch.text {
            patch.text = Some(validation::normalize_text(text)?);
        }

        let _guard = self.write_lock.lock().await;
        let (previous, updated) = {
            let Some(mut doc) = self.documents.get_mut(id) else {
                return Ok(None);
            };
            if patch.is_empty() {
                return Ok(Some(doc.task.clone()));
            }
            let previous = doc.task.clone();
            patch.apply_to(&mut doc.task);
            (previous, doc.task.clone())
        };

        if let Err(e) = self.persist().await {
            if let Some(mut doc) = self.documents.get_mut(id) {
                doc.task = previous;
            }
            return Err(e);
        }

        tracing::debug!(task_id = %id, completed = updated.completed, "Task updated");
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Task>> {
        let _guard = self.write_lock.lock().await;
        let Some((key, doc)) = self.documents.remove(id) else {
            return Ok(None);
        };

        if let Err(e) = self.persist().await {
            self.documents.insert(key, doc);
            return Err(e);
        }

        tracing::debug!(task_id = %id, "Task deleted");
        Ok(Some(doc.task))
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.documents.len())
    }
}
