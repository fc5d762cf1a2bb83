//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the task routes
//! - Wire up middleware (request ID, tracing, timeout, body limit, CORS)
//! - Keep middleware-generated failures in the `{message}` shape
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::handlers::{self, AppState};
use crate::http::{request, response};
use crate::lifecycle::shutdown;
use crate::store::TaskStore;

/// HTTP server for the task API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `store`.
    pub fn new(config: ServiceConfig, store: Arc<dyn TaskStore>) -> Self {
        let state = AppState::new(store);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let router = Router::new()
            .route(
                "/api/tasks",
                get(handlers::list_tasks).post(handlers::create_task),
            )
            .route(
                "/api/tasks/{id}",
                put(handlers::update_task).delete(handlers::delete_task),
            )
            .route("/health", get(handlers::health))
            .method_not_allowed_fallback(handlers::method_not_allowed)
            .fallback(handlers::route_not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::map_response(response::timeout_as_json))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| request::make_span(request)),
            )
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        if config.security.cors_enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
