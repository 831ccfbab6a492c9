use axum::{extract::State, Json};

use toolgate_core::ToolSpec;

use crate::app_state::AppState;

/// Return the full tool manifest, fields verbatim as configured plus the
/// resolved policy annotation per tool.
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolSpec>> {
    Json(state.manifest.tools().to_vec())
}
