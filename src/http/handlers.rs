//! Task API handlers.
//!
//! Each handler performs at most one store mutation and maps its result
//! straight to a response. Successful writes refresh the task-count gauge.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::http::response::{ApiError, ApiJson, Message, TASK_DELETED};
use crate::observability::metrics;
use crate::store::TaskStore;
use crate::tasks::{NewTask, Task, TaskPatch};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

fn observe<T>(operation: &'static str, result: &Result<T, ApiError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::record_operation(operation, outcome);
}

async fn refresh_task_count(store: &dyn TaskStore) {
    match store.count().await {
        Ok(count) => metrics::record_task_count(count),
        Err(e) => tracing::warn!(error = %e, "Failed to count tasks"),
    }
}

/// `GET /api/tasks`: all tasks, newest first.
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let result = state.store.list().await.map_err(ApiError::from);
    observe("list", &result);

    let tasks = result?;
    metrics::record_task_count(tasks.len());
    Ok(Json(tasks))
}

/// `POST /api/tasks`: create a task, `completed` defaulting to `false`.
pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let result = state.store.insert(new).await.map_err(ApiError::from);
    observe("create", &result);

    let task = result?;
    refresh_task_count(state.store.as_ref()).await;
    tracing::info!(task_id = %task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /api/tasks/{id}`: apply the supplied fields only.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let result = match state.store.update(&id, patch).await {
        Ok(Some(task)) => Ok(task),
        Ok(None) => Err(ApiError::task_not_found()),
        Err(e) => Err(ApiError::from(e)),
    };
    observe("update", &result);

    let task = result?;
    tracing::info!(task_id = %task.id, completed = task.completed, "Task updated");
    Ok(Json(task))
}

/// `DELETE /api/tasks/{id}`: remove permanently, confirm with a message.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let result = match state.store.delete(&id).await {
        Ok(Some(_)) => Ok(Message::new(TASK_DELETED)),
        Ok(None) => Err(ApiError::task_not_found()),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    };
    observe("delete", &result);

    let message = result?;
    refresh_task_count(state.store.as_ref()).await;
    tracing::info!(task_id = %id, "Task deleted");
    Ok(Json(message))
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub tasks: usize,
}

/// `GET /health`: liveness plus a store probe.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    let tasks = state
        .store
        .count()
        .await
        .map_err(|e| ApiError::Unavailable(e.to_string()))?;

    Ok(Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        tasks,
    }))
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for unknown routes.
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
