use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use caremap_db_memory::InMemoryStore;
use caremap_db_postgres::PostgresStore;
use caremap_storage::DynDirectoryStore;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, StorageBackend, StorageConfig};
use crate::directory::DirectoryProjector;
use crate::routing::RoutingGateway;
use crate::{handlers, middleware as app_middleware};

/// Shared, immutable request state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub directory: DirectoryProjector,
    pub routing: Arc<RoutingGateway>,
}

impl AppState {
    pub fn new(store: DynDirectoryStore, routing: RoutingGateway) -> Self {
        Self {
            directory: DirectoryProjector::new(store),
            routing: Arc::new(routing),
        }
    }
}

pub struct CaremapServer {
    addr: SocketAddr,
    app: Router,
}

pub fn build_app(state: AppState, cfg: &AppConfig) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    let cors = if cfg.server.cors_allow_any {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        // Directory
        .route("/api/doctors", get(handlers::list_doctors))
        .route("/api/doctors/{id}", get(handlers::get_doctor))
        .route("/api/facilities", get(handlers::list_facilities))
        .route("/api/facilities/{id}", get(handlers::get_facility))
        // Routing
        .route("/api/route", get(handlers::route))
        .with_state(state)
        // Middleware stack (order: request id -> cors/compression/trace -> body limit)
        .layer(middleware::from_fn(app_middleware::request_id))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let req_id = req
                        .headers()
                        .get(app_middleware::REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = tracing::field::Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
}

/// Opens the configured directory store.
pub async fn create_store(cfg: &StorageConfig) -> anyhow::Result<DynDirectoryStore> {
    match cfg.backend {
        StorageBackend::Postgres => {
            let pg = cfg.postgres.to_store_config();
            tracing::info!(url = %pg.redacted_url(), "Opening PostgreSQL directory store");
            let store: DynDirectoryStore = Arc::new(PostgresStore::new(pg).await?);
            Ok(store)
        }
        StorageBackend::Memory => {
            let store = match &cfg.memory.seed_path {
                Some(path) => {
                    tracing::info!(path = %path, "Loading in-memory directory from seed file");
                    InMemoryStore::from_seed_file(path).await?
                }
                None => {
                    tracing::warn!("In-memory directory store without seed file starts empty");
                    InMemoryStore::new()
                }
            };
            let store: DynDirectoryStore = Arc::new(store);
            Ok(store)
        }
    }
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    /// Opens the store, creates the routing gateway and assembles the router.
    pub async fn build(self) -> anyhow::Result<CaremapServer> {
        let store = create_store(&self.config.storage).await?;
        let routing = RoutingGateway::from_config(&self.config.routing)?;
        tracing::info!(
            storage = store.backend_name(),
            routing = routing.base_url(),
            "Application state initialized"
        );

        let app = build_app(AppState::new(store, routing), &self.config);

        Ok(CaremapServer {
            addr: self.addr,
            app,
        })
    }
}

impl CaremapServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
