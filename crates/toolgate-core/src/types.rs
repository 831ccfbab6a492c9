use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a tool may be invoked under the loaded policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Allow,
    Deny,
}

/// Resolved policy annotation attached to a tool in the manifest.
///
/// This is advertisement data: the gateway surfaces it on the manifest
/// endpoint and logs it at dispatch time, but enforcement is left to the
/// adopter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPolicy {
    pub access: Access,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_route: Option<String>,
}

impl Default for ToolPolicy {
    fn default() -> Self {
        Self {
            access: Access::Allow,
            requires_approval: false,
            approval_route: None,
        }
    }
}

/// Definition of a tool advertised by the gateway.
///
/// Loaded from the tool document at startup; immutable for the process
/// lifetime. The `policy` annotation is filled in by the loader from the
/// policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    #[serde(rename = "readOnly", default)]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub policy: ToolPolicy,
}
