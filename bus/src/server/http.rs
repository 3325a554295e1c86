//! HTTP server implementation for the message bus.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::signal;

use super::config::BusServerConfig;
use super::handlers::{
    AppState, handle_healthy, handle_length, handle_metrics, handle_read_from, handle_read_since,
    handle_ready, handle_send, handle_topics,
};
use super::metrics::Metrics;
use crate::MessageBus;

/// HTTP server for the bus service.
pub struct BusServer {
    bus: Arc<MessageBus>,
    config: BusServerConfig,
}

impl BusServer {
    /// Create a new bus server.
    pub fn new(bus: Arc<MessageBus>, config: BusServerConfig) -> Self {
        Self { bus, config }
    }

    /// Run the HTTP server until shutdown is signalled.
    pub async fn run(self) {
        let metrics = Arc::new(Metrics::new());

        let state = AppState {
            bus: self.bus,
            metrics,
        };

        let app = Router::new()
            .route("/api/v1/bus/send", post(handle_send))
            .route("/api/v1/bus/read_from", get(handle_read_from))
            .route("/api/v1/bus/read_since", get(handle_read_since))
            .route("/api/v1/bus/length", get(handle_length))
            .route("/api/v1/bus/topics", get(handle_topics))
            .route("/metrics", get(handle_metrics))
            .route("/-/healthy", get(handle_healthy))
            .route("/-/ready", get(handle_ready))
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        tracing::info!("Starting bus HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("failed to bind server port");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .expect("server error");

        tracing::info!("Server shut down gracefully");
    }
}

/// Listen for SIGTERM (pod termination) and SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
