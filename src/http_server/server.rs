//! # HTTP Server
//!
//! Combines the todo routes with the transport middleware: request tracing,
//! CORS and the body-size ceiling.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::{AllowedOrigins, ServerConfig};
use super::errors::ServeResult;
use crate::store::{SqliteStore, TodoStore};
use crate::todos::routes::unknown_route;
use crate::todos::{todo_routes, TodoController};

/// HTTP server for the todo service
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over an already opened store
    pub fn new(config: ServerConfig, store: Arc<dyn TodoStore>) -> Self {
        let controller = TodoController::new(store).with_policy(config.update_policy);
        let router = Self::build_router(&config, controller);
        Self { config, router }
    }

    /// Open the SQLite store named in the config and create a server over it
    pub fn open(config: ServerConfig) -> ServeResult<Self> {
        let store = SqliteStore::open(&config.database)?;
        Ok(Self::new(config, Arc::new(store)))
    }

    /// Build the router with all endpoints and middleware
    fn build_router(config: &ServerConfig, controller: TodoController) -> Router {
        Router::new()
            .merge(todo_routes(controller))
            .fallback(unknown_route)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(cors_layer(&config.allowed_origins))
                    .layer(DefaultBodyLimit::max(config.body_limit)),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn start(self) -> ServeResult<()> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> ServeResult<()> {
        let addr = listener.local_addr()?;
        tracing::info!(
            %addr,
            database = %self.config.database.display(),
            allowed_origins = %self.config.allowed_origins,
            "todo service listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("todo service stopped");
        Ok(())
    }
}

/// Configure CORS from the allow-list
fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let allow_origin = match origins {
        AllowedOrigins::Any => AllowOrigin::any(),
        AllowedOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring unparseable CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
