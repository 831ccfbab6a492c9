use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::app_state::AppState;
use crate::handlers;

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Tool manifest, consumed during the MCP handshake
        .route("/tools", get(handlers::list_tools))
        // JSON-RPC endpoint
        .route("/mcp", post(handlers::mcp_request))
        // CORS: allow any origin (MCP clients run in various contexts)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
