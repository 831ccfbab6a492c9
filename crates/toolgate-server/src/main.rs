use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use toolgate_mcp::Dispatcher;
use toolgate_server::app_state::AppState;
use toolgate_server::stubs;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tools_file = std::env::var("TOOLGATE_TOOLS_FILE")
        .unwrap_or_else(|_| "config/tools.json".to_string());
    let policy_file = std::env::var("TOOLGATE_POLICY_FILE")
        .unwrap_or_else(|_| "config/policy.json".to_string());
    let host = std::env::var("TOOLGATE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("TOOLGATE_PORT").unwrap_or_else(|_| "8000".to_string());

    // Malformed configuration is fatal: nothing is served from partial state.
    let manifest = Arc::new(
        toolgate_config::load_manifest(&tools_file, &policy_file)
            .expect("Failed to load tool configuration"),
    );

    let mut dispatcher = Dispatcher::new(Arc::clone(&manifest));
    for handler in stubs::all_handlers() {
        dispatcher.register(handler);
    }

    let state = AppState {
        manifest,
        dispatcher: Arc::new(dispatcher),
    };

    let app = toolgate_server::router::create_router(state);

    let addr = format!("{host}:{port}");
    tracing::info!("Toolgate server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
