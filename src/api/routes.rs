//! HTTP router and server entry point.

use super::handlers;
use super::state::SharedRangeSet;
use crate::config::MAX_BODY_BYTES;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router.
///
/// # Routes
/// - `GET /health` - liveness and range count
/// - `GET /ipRanges` - all ranges as `{start: end}`
/// - `POST /ipRanges` - add a CIDR block (plain text body)
/// - `DELETE /ipRanges` - drop every range
/// - `POST /isInclude` - membership check for an address (plain text body)
pub fn create_router(state: Arc<SharedRangeSet>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/ipRanges",
            get(handlers::list_ranges)
                .post(handlers::add_range)
                .delete(handlers::reset_ranges),
        )
        .route("/isInclude", post(handlers::is_include))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn start_server(
    state: Arc<SharedRangeSet>,
    addr: SocketAddr,
) -> Result<(), std::io::Error> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Serving IP range API on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {e}");
        return;
    }
    log::info!("Ctrl-C received, shutting down");
}
