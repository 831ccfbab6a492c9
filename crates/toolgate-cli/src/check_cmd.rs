use std::path::Path;

use toolgate_core::Access;

/// Run the startup loader against the given documents and report the
/// outcome. Uses the same validation as the server, so a passing check
/// means the server will start.
pub fn run(tools: &Path, policy: &Path) -> anyhow::Result<()> {
    let manifest = toolgate_config::load_manifest(tools, policy)?;

    println!("ok: {} tools", manifest.len());
    for spec in manifest.tools() {
        let access = match spec.policy.access {
            Access::Allow => "allow",
            Access::Deny => "deny",
        };
        let approval = if spec.policy.requires_approval {
            ", requires approval"
        } else {
            ""
        };
        println!("  {} [{access}{approval}]", spec.name);
    }

    Ok(())
}
