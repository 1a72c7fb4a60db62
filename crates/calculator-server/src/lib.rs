//! HTTP surface of the calculator service.
//!
//! Exposes `GET /add`, `/subtract`, `/multiply` and `/divide`, each taking
//! `num1` and `num2` query parameters and answering with either
//! `{"result": <number>}` or `{"error": "<message>"}`. All four routes share
//! one handler that binds its operator at registration time and delegates
//! to [`calculator_core::evaluate_request`].

pub mod error;
pub mod handlers;
pub mod logging;

pub use error::{Result, ServerError};
pub use handlers::{ErrorBody, ErrorResponse, OperationResponse, GREETING};
pub use logging::{LoggingConfig, ServiceLogger};

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{middleware, Router};
use calculator_core::{LogOperationLogger, OperationLogger, Operator};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the calculator server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Enable CORS
    pub enable_cors: bool,
    /// Enable request logging
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            enable_cors: true,
            enable_logging: true,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bind address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Parse and set the bind address from a string.
    pub fn with_bind_addr_str(mut self, addr: &str) -> Result<Self> {
        self.bind_addr = addr
            .parse()
            .map_err(|e| ServerError::config_error(format!("Invalid bind address: {}", e)))?;
        Ok(self)
    }

    /// Keep the bind host, change the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.bind_addr.set_port(port);
        self
    }

    /// Enable or disable CORS.
    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    /// Enable or disable request logging.
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }
}

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub logger: Arc<dyn OperationLogger>,
}

type OperationQuery = std::result::Result<Query<Vec<(String, String)>>, QueryRejection>;

/// The calculator HTTP server.
pub struct CalculatorServer {
    logger: Arc<dyn OperationLogger>,
    config: ServerConfig,
}

impl CalculatorServer {
    /// Create a server that logs operations through the `log` facade.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_logger(config, Arc::new(LogOperationLogger::new()))
    }

    /// Create a server with a custom operation logger.
    pub fn with_logger(config: ServerConfig, logger: Arc<dyn OperationLogger>) -> Self {
        Self { logger, config }
    }

    /// Build the Axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        let state = AppState {
            logger: Arc::clone(&self.logger),
        };

        let mut router: Router<AppState> = Router::new().route("/", get(handlers::root_handler));
        for operator in Operator::ALL {
            router = router.route(
                operator.path(),
                get(move |state: State<AppState>, query: OperationQuery| {
                    handlers::operation_handler(operator, state, query)
                }),
            );
        }

        apply_layers(router.with_state(state), &self.config)
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server will shut down when the provided shutdown signal is received.
    pub async fn serve_with_shutdown<F>(self, shutdown_signal: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let listener = TcpListener::bind(self.config.bind_addr)
            .await
            .map_err(|e| {
                ServerError::config_error(format!(
                    "Failed to bind to {}: {}",
                    self.config.bind_addr, e
                ))
            })?;
        let local_addr = listener.local_addr()?;

        let banner = startup_message(local_addr.port());
        println!("{}", banner);
        log::info!("{}", banner);
        for operator in Operator::ALL {
            log::debug!(
                "{} endpoint: http://{}{}",
                operator.title(),
                local_addr,
                operator.path()
            );
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::internal(format!("Server error: {}", e)))?;

        log::info!("Calculator server shut down gracefully");
        Ok(())
    }
}

/// Line announced on stdout and in the log once the listener is bound.
pub fn startup_message(port: u16) -> String {
    format!("Server is running on port {}", port)
}

/// Wrap a router in the panic safety net, request logging, tracing and CORS.
pub fn apply_layers(router: Router, config: &ServerConfig) -> Router {
    let mut router = router.layer(CatchPanicLayer::custom(handlers::handle_panic));

    if config.enable_logging {
        router = router.layer(middleware::from_fn(
            |request: axum::http::Request<axum::body::Body>, next: axum::middleware::Next| async {
                let request_id = uuid::Uuid::new_v4().to_string();
                let method = request.method().clone();
                let uri = request.uri().clone();

                log::info!("Request {} {} {}", request_id, method, uri);

                let start = std::time::Instant::now();
                let response = next.run(request).await;
                let duration = start.elapsed();

                log::info!(
                    "Response {} {} completed in {:?}",
                    request_id,
                    response.status(),
                    duration
                );

                response
            },
        ));
    }

    router = router.layer(TraceLayer::new_for_http());

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

/// Utility function to create a shutdown signal from Ctrl+C.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            log::info!("Received SIGTERM, shutting down...");
        },
    }
}
