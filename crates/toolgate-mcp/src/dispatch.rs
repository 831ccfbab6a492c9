use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use toolgate_core::{Error, ToolHandler, ToolManifest};

use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS};

/// MCP protocol revision advertised during the handshake.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Routes JSON-RPC requests: handshake methods are answered from the
/// manifest, everything else is treated as a tool name and forwarded to the
/// registered handler. One-shot and stateless; each dispatch gets a fresh
/// correlation id for its log lines.
pub struct Dispatcher {
    manifest: Arc<ToolManifest>,
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(manifest: Arc<ToolManifest>) -> Self {
        Self {
            manifest,
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under its own name. A handler for a tool absent
    /// from the manifest is unreachable, which is logged and tolerated.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) {
        let name = handler.name().to_string();
        if !self.manifest.contains(&name) {
            tracing::warn!(tool = %name, "handler registered for a tool not in the manifest");
        }
        self.handlers.insert(name, handler);
    }

    /// Handle one request. Returns `None` for notifications, which produce
    /// no response.
    pub async fn dispatch(&self, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if req.is_notification() || req.method.starts_with("notifications/") {
            tracing::info!(method = %req.method, "notification received");
            return None;
        }

        if let Err(resp) = req.validate() {
            return Some(resp);
        }

        let response = match req.method.as_str() {
            "initialize" => self.handle_initialize(&req),
            "tools/list" => self.handle_tools_list(&req),
            "tools/call" => self.handle_tools_call(&req).await,
            tool => {
                let params = req.params.clone().unwrap_or(Value::Null);
                match self.invoke(tool, params).await {
                    Ok(result) => JsonRpcResponse::success(req.id, result),
                    Err(err) => JsonRpcResponse::from_core_error(req.id, &err),
                }
            }
        };

        Some(response)
    }

    fn handle_initialize(&self, req: &JsonRpcRequest) -> JsonRpcResponse {
        tracing::info!(tools = self.manifest.len(), "client handshake");
        JsonRpcResponse::success(
            req.id.clone(),
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "toolgate",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    fn handle_tools_list(&self, req: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            req.id.clone(),
            serde_json::json!({ "tools": self.manifest.tools() }),
        )
    }

    /// MCP-style framing: params carry `{name, arguments}` and the result is
    /// wrapped in a content block.
    async fn handle_tools_call(&self, req: &JsonRpcRequest) -> JsonRpcResponse {
        let Some(params) = &req.params else {
            return JsonRpcResponse::error(req.id.clone(), INVALID_PARAMS, "Missing params");
        };

        let Some(tool) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(
                req.id.clone(),
                INVALID_PARAMS,
                "Missing 'name' parameter",
            );
        };

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or(Value::Object(serde_json::Map::new()));

        match self.invoke(tool, arguments).await {
            Ok(result) => JsonRpcResponse::success(
                req.id.clone(),
                serde_json::json!({
                    "content": [{
                        "type": "text",
                        "text": serde_json::to_string_pretty(&result).unwrap_or_default()
                    }]
                }),
            ),
            Err(err) => JsonRpcResponse::from_core_error(req.id.clone(), &err),
        }
    }

    /// Validate the tool name against the manifest and run its handler.
    async fn invoke(&self, tool: &str, params: Value) -> Result<Value, Error> {
        let call_id = Uuid::new_v4();

        let Some(spec) = self.manifest.get(tool) else {
            tracing::warn!(%call_id, tool, "call to unknown tool");
            return Err(Error::UnknownTool(tool.to_string()));
        };

        if spec.policy.requires_approval {
            tracing::info!(
                %call_id,
                tool,
                route = spec.policy.approval_route.as_deref().unwrap_or("unrouted"),
                "policy requires approval for this tool; the gateway does not enforce it"
            );
        }

        let handler = self
            .handlers
            .get(tool)
            .ok_or_else(|| Error::HandlerMissing(tool.to_string()))?;

        tracing::info!(%call_id, tool, "dispatching tool call");
        let result = handler.call(params).await;
        if let Err(err) = &result {
            tracing::warn!(%call_id, tool, error = %err, "tool call failed");
        }
        result
    }
}
