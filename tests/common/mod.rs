//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;

use taskboard::config::ServiceConfig;
use taskboard::http::HttpServer;
use taskboard::lifecycle::Shutdown;
use taskboard::store::{DocumentStore, StoreError, StoreResult, TaskStore};
use taskboard::tasks::{NewTask, Task, TaskPatch};

/// A running service on an ephemeral port. Stops when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn tasks_url(&self) -> String {
        self.url("/api/tasks")
    }

    pub fn task_url(&self, id: &str) -> String {
        self.url(&format!("/api/tasks/{id}"))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service over `store` with default configuration.
pub async fn spawn_server(store: Arc<dyn TaskStore>) -> TestServer {
    spawn_server_with(ServiceConfig::default(), store).await
}

/// Start the service over `store` with `config`. The listener address in
/// `config` is ignored.
pub async fn spawn_server_with(config: ServiceConfig, store: Arc<dyn TaskStore>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestServer { addr, shutdown }
}

/// Start the service over a fresh in-memory store.
pub async fn spawn_memory_server() -> TestServer {
    spawn_server(Arc::new(DocumentStore::in_memory())).await
}

/// HTTP client without connection reuse or proxies.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn outage() -> StoreError {
    StoreError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "store connection refused",
    ))
}

/// A store that is always down.
pub struct UnavailableStore;

#[async_trait]
impl TaskStore for UnavailableStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        Err(outage())
    }

    async fn insert(&self, _new: NewTask) -> StoreResult<Task> {
        Err(outage())
    }

    async fn update(&self, _id: &str, _patch: TaskPatch) -> StoreResult<Option<Task>> {
        Err(outage())
    }

    async fn delete(&self, _id: &str) -> StoreResult<Option<Task>> {
        Err(outage())
    }

    async fn count(&self) -> StoreResult<usize> {
        Err(outage())
    }
}

/// An in-memory store whose first `list` fails.
pub struct FlakyListStore {
    inner: DocumentStore,
    failed: AtomicBool,
}

impl FlakyListStore {
    pub fn new() -> Self {
        Self {
            inner: DocumentStore::in_memory(),
            failed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl TaskStore for FlakyListStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        if !self.failed.swap(true, Ordering::SeqCst) {
            return Err(outage());
        }
        self.inner.list().await
    }

    async fn insert(&self, new: NewTask) -> StoreResult<Task> {
        self.inner.insert(new).await
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> StoreResult<Option<Task>> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Task>> {
        self.inner.delete(id).await
    }

    async fn count(&self) -> StoreResult<usize> {
        self.inner.count().await
    }
}

/// An in-memory store whose `list` takes `delay` to answer.
pub struct SlowListStore {
    inner: DocumentStore,
    delay: Duration,
}

impl SlowListStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: DocumentStore::in_memory(),
            delay,
        }
    }
}

#[async_trait]
impl TaskStore for SlowListStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        tokio::time::sleep(self.delay).await;
        self.inner.list().await
    }

    async fn insert(&self, new: NewTask) -> StoreResult<Task> {
        self.inner.insert(new).await
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> StoreResult<Option<Task>> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Task>> {
        self.inner.delete(id).await
    }

    async fn count(&self) -> StoreResult<usize> {
        self.inner.count().await
    }
}
