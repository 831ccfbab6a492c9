use std::collections::HashMap;

use crate::error::Error;
use crate::types::ToolSpec;

/// Immutable, name-indexed collection of the tools advertised by the
/// gateway. Built once at startup from configuration; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ToolManifest {
    tools: Vec<ToolSpec>,
    index: HashMap<String, usize>,
}

impl ToolManifest {
    /// Build a manifest from resolved tool specs, preserving document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTool`] if two specs share a name.
    pub fn new(tools: Vec<ToolSpec>) -> Result<Self, Error> {
        let mut index = HashMap::with_capacity(tools.len());
        for (pos, spec) in tools.iter().enumerate() {
            if index.insert(spec.name.clone(), pos).is_some() {
                return Err(Error::DuplicateTool(spec.name.clone()));
            }
        }
        Ok(Self { tools, index })
    }

    /// All tools in document order.
    #[must_use]
    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.index.get(name).map(|&pos| &self.tools[pos])
    }

    /// Whether a tool with the given name is advertised.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of advertised tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolPolicy;

    fn spec(name: &str) -> ToolSpec {
        ToolSpec {
            name: name.to_string(),
            description: format!("{name} stub"),
            input_schema: serde_json::json!({"type": "object"}),
            read_only: false,
            category: None,
            policy: ToolPolicy::default(),
        }
    }

    #[test]
    fn preserves_document_order() {
        let manifest =
            ToolManifest::new(vec![spec("slack.post"), spec("mail.draft"), spec("gha.run")])
                .unwrap();

        let names: Vec<&str> = manifest.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["slack.post", "mail.draft", "gha.run"]);
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn lookup_by_name() {
        let manifest = ToolManifest::new(vec![spec("mail.send")]).unwrap();

        assert!(manifest.contains("mail.send"));
        assert_eq!(manifest.get("mail.send").unwrap().name, "mail.send");
        assert!(manifest.get("mail.recall").is_none());
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = ToolManifest::new(vec![spec("sql.query"), spec("sql.query")]).unwrap_err();
        assert!(matches!(err, Error::DuplicateTool(name) if name == "sql.query"));
    }

    #[test]
    fn empty_manifest_is_valid() {
        let manifest = ToolManifest::new(Vec::new()).unwrap();
        assert!(manifest.is_empty());
    }
}
