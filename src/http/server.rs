//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a single wildcard proxy route
//! - Hold the shared state: mapping, upstream client, capture store
//! - Translate routing decisions into terminal error responses
//! - Bind the server to a listener and serve until shutdown
//!
//! # Design Decisions
//! - The mapping is Arc-shared and never mutated after load, so all
//!   handlers read it concurrently without locks
//! - One hyper-util legacy client shared across requests; pooling is
//!   whatever the transport provides, nothing more

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::capture::CaptureStore;
use crate::config::ProxyConfig;
use crate::http::forward;
use crate::routing::{resolve, Mappings, RouteDecision};

/// Application state injected into the proxy handler.
#[derive(Clone)]
pub struct AppState {
    pub mappings: Arc<Mappings>,
    pub client: Client<HttpConnector, Body>,
    pub capture: Option<Arc<CaptureStore>>,
}

/// HTTP server for the reverse proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server from the loaded configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let capture = config
            .capture
            .enabled
            .then(|| Arc::new(CaptureStore::new(config.capture.dir.clone())));

        let state = AppState {
            mappings: Arc::new(config.mappings),
            client,
            capture,
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router: every path lands in the proxy handler.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler: resolve the service prefix, then forward.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match resolve(request.uri().path(), &state.mappings) {
        RouteDecision::Invalid => (StatusCode::BAD_REQUEST, "Invalid path").into_response(),
        RouteDecision::NotFound(service) => (
            StatusCode::NOT_FOUND,
            format!("No mapping found for service: {service}"),
        )
            .into_response(),
        RouteDecision::Resolved {
            service,
            target,
            remainder,
        } => {
            forward::dispatch(
                &state.client,
                state.capture.as_deref(),
                &service,
                &target,
                &remainder,
                request,
            )
            .await
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
