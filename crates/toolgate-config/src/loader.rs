use std::fs;
use std::path::Path;

use toolgate_core::{PolicyDoc, PolicyRule, ToolManifest, ToolSpec};

use crate::error::ConfigError;

/// Method names the dispatcher answers itself; a configured tool may not
/// shadow them.
const RESERVED_METHODS: &[&str] = &["initialize", "tools/list", "tools/call"];

/// Load and validate the tool and policy documents, resolving the policy
/// annotation onto every tool.
///
/// # Errors
///
/// Any unreadable file, malformed JSON, or cross-validation failure is
/// returned as a [`ConfigError`]; callers are expected to treat it as fatal.
pub fn load_manifest(
    tools_path: impl AsRef<Path>,
    policy_path: impl AsRef<Path>,
) -> Result<ToolManifest, ConfigError> {
    let tools_json = read(tools_path.as_ref())?;
    let policy_json = read(policy_path.as_ref())?;
    build_manifest(&tools_json, &policy_json)
}

/// Build a manifest from in-memory document text. Split out from
/// [`load_manifest`] so validation is testable without touching the
/// filesystem, and so the CLI `check` command can share it.
///
/// # Errors
///
/// Returns a [`ConfigError`] on malformed JSON or any cross-validation
/// failure.
pub fn build_manifest(tools_json: &str, policy_json: &str) -> Result<ToolManifest, ConfigError> {
    let specs: Vec<ToolSpec> = serde_json::from_str(tools_json).map_err(|source| {
        ConfigError::Parse {
            doc: "tools",
            source,
        }
    })?;
    let policy: PolicyDoc = serde_json::from_str(policy_json).map_err(|source| {
        ConfigError::Parse {
            doc: "policy",
            source,
        }
    })?;

    validate_tools(&specs)?;
    validate_policy(&policy, &specs)?;

    let resolved = specs
        .into_iter()
        .map(|mut spec| {
            spec.policy = policy.resolve(&spec);
            spec
        })
        .collect();

    let manifest =
        ToolManifest::new(resolved).map_err(|err| ConfigError::Invalid(err.to_string()))?;
    tracing::info!(tools = manifest.len(), "tool manifest loaded");
    Ok(manifest)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn validate_tools(specs: &[ToolSpec]) -> Result<(), ConfigError> {
    for spec in specs {
        if spec.name.is_empty() {
            return Err(ConfigError::Invalid(
                "tool with empty name".to_string(),
            ));
        }
        if RESERVED_METHODS.contains(&spec.name.as_str())
            || spec.name.starts_with("notifications/")
        {
            return Err(ConfigError::Invalid(format!(
                "tool name '{}' shadows a reserved method",
                spec.name
            )));
        }
        if !spec.input_schema.is_object() {
            return Err(ConfigError::Invalid(format!(
                "tool '{}': inputSchema must be a JSON object",
                spec.name
            )));
        }
    }
    Ok(())
}

fn validate_policy(policy: &PolicyDoc, specs: &[ToolSpec]) -> Result<(), ConfigError> {
    for (pos, rule) in policy.rules.iter().enumerate() {
        match rule {
            PolicyRule {
                tool: Some(_),
                category: Some(_),
                ..
            } => {
                return Err(ConfigError::Invalid(format!(
                    "policy rule #{pos}: 'tool' and 'category' matchers are mutually exclusive"
                )));
            }
            PolicyRule {
                tool: None,
                category: None,
                ..
            } => {
                return Err(ConfigError::Invalid(format!(
                    "policy rule #{pos}: needs a 'tool' or 'category' matcher"
                )));
            }
            PolicyRule {
                tool: Some(tool), ..
            } => {
                if !specs.iter().any(|s| s.name == *tool) {
                    return Err(ConfigError::Invalid(format!(
                        "policy rule #{pos}: unknown tool '{tool}'"
                    )));
                }
            }
            PolicyRule { tool: None, .. } => {}
        }
    }
    Ok(())
}
