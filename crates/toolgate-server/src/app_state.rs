use std::sync::Arc;

use toolgate_core::ToolManifest;
use toolgate_mcp::Dispatcher;

/// Shared application state. Everything here is built once at startup and
/// read-only afterwards; requests share it without coordination.
#[derive(Clone)]
pub struct AppState {
    pub manifest: Arc<ToolManifest>,
    pub dispatcher: Arc<Dispatcher>,
}
