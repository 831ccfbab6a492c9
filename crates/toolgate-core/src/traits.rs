use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;

/// A callable tool behind the dispatcher.
///
/// Implementations in this starter kit are stubs: they validate and log the
/// incoming params and return a small acknowledgement payload. Adopters
/// replace them with real integrations.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// The manifest name this handler serves (e.g. `mail.send`).
    fn name(&self) -> &str;

    /// Invoke the tool with the raw JSON-RPC params.
    async fn call(&self, params: Value) -> Result<Value, Error>;
}
