//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the three relay routes
//! - Wire up middleware (CORS, request ID, tracing)
//! - Bind server to listener
//! - Stop gracefully on the shutdown broadcast

use std::sync::Arc;

use axum::{
    http::{HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use thiserror::Error;
use tokio::{net::TcpListener, sync::broadcast};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{CorsConfig, RelayConfig};
use crate::http::handlers::{self, ALL_NEWS_ROUTE, COUNTRY_ROUTE, TOP_HEADLINES_ROUTE};
use crate::lifecycle::shutdown;
use crate::upstream::{ExecutorError, UpstreamExecutor};

/// Errors raised while building the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error("invalid CORS configuration: {0}")]
    Cors(String),
}

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub executor: Arc<UpstreamExecutor>,
}

/// HTTP server for the news relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &RelayConfig) -> Result<Self, ServerError> {
        let executor = Arc::new(UpstreamExecutor::new(&config.upstream)?);
        let cors = cors_layer(&config.cors)?;

        tracing::info!(
            upstream = %config.upstream.base_url,
            pass_through_success_status = config.upstream.pass_through_success_status,
            "Upstream executor ready"
        );

        Ok(Self {
            router: build_router(AppState { executor }, cors),
        })
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route(ALL_NEWS_ROUTE, get(handlers::all_news))
        .route(TOP_HEADLINES_ROUTE, get(handlers::top_headlines))
        .route(COUNTRY_ROUTE, get(handlers::country))
        .with_state(state)
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Translate the CORS section into a tower-http layer.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, ServerError> {
    let origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).map_err(|_| ServerError::Cors(format!("origin '{o}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    let methods = config
        .allowed_methods
        .iter()
        .map(|m| {
            Method::from_bytes(m.as_bytes()).map_err(|_| ServerError::Cors(format!("method '{m}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let headers = config
        .allowed_headers
        .iter()
        .map(|h| {
            HeaderName::from_bytes(h.as_bytes())
                .map_err(|_| ServerError::Cors(format!("header '{h}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(AllowHeaders::list(headers)))
}
