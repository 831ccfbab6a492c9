use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use toolgate_mcp::jsonrpc::{INVALID_REQUEST, PARSE_ERROR};
use toolgate_mcp::{JsonRpcRequest, JsonRpcResponse};

use crate::app_state::AppState;

/// Handle a JSON-RPC request.
///
/// The body is read as text so malformed payloads can be answered with a
/// proper JSON-RPC error instead of a bare HTTP rejection. Notifications
/// produce `202 Accepted` with no body; everything else gets the JSON-RPC
/// response as the body.
pub async fn mcp_request(State(state): State<AppState>, body: String) -> Response {
    let value: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "unparseable request body");
            return Json(JsonRpcResponse::error(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {err}"),
            ))
            .into_response();
        }
    };

    let req: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(req) => req,
        Err(err) => {
            tracing::warn!(error = %err, "request body is not a JSON-RPC envelope");
            return Json(JsonRpcResponse::error(
                Value::Null,
                INVALID_REQUEST,
                format!("Invalid request: {err}"),
            ))
            .into_response();
        }
    };

    match state.dispatcher.dispatch(req).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
