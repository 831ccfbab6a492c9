use serde::{Deserialize, Serialize};

use crate::types::{Access, ToolPolicy, ToolSpec};

/// One entry of the policy document.
///
/// A rule matches either a tool by exact name or a whole category. Rules
/// carry the allow/deny action plus approval-routing directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub action: Access,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_route: Option<String>,
}

impl PolicyRule {
    /// Whether this rule applies to the given tool. A name matcher takes
    /// the rule; otherwise the category matcher is consulted. A rule with
    /// neither matcher applies to nothing (the loader rejects such rules).
    #[must_use]
    pub fn matches(&self, spec: &ToolSpec) -> bool {
        match (&self.tool, &self.category) {
            (Some(tool), _) => *tool == spec.name,
            (None, Some(category)) => spec.category.as_deref() == Some(category.as_str()),
            (None, None) => false,
        }
    }
}

/// The policy document: ordered rules plus a fallback action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDoc {
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
    #[serde(default = "PolicyDoc::default_action")]
    pub default_action: Access,
}

impl PolicyDoc {
    fn default_action() -> Access {
        Access::Allow
    }

    /// Resolve the annotation for a tool. Rules are evaluated in document
    /// order and the first match wins; with no match the document default
    /// applies with no approval requirement.
    #[must_use]
    pub fn resolve(&self, spec: &ToolSpec) -> ToolPolicy {
        for rule in &self.rules {
            if rule.matches(spec) {
                return ToolPolicy {
                    access: rule.action,
                    requires_approval: rule.requires_approval,
                    approval_route: rule.approval_route.clone(),
                };
            }
        }
        ToolPolicy {
            access: self.default_action,
            requires_approval: false,
            approval_route: None,
        }
    }
}

impl Default for PolicyDoc {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            default_action: Access::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolPolicy;

    fn spec(name: &str, category: Option<&str>) -> ToolSpec {
        ToolSpec {
            name: name.to_string(),
            description: String::new(),
            input_schema: serde_json::json!({"type": "object"}),
            read_only: false,
            category: category.map(str::to_string),
            policy: ToolPolicy::default(),
        }
    }

    fn tool_rule(tool: &str, action: Access) -> PolicyRule {
        PolicyRule {
            tool: Some(tool.to_string()),
            category: None,
            action,
            requires_approval: false,
            approval_route: None,
        }
    }

    #[test]
    fn tool_matcher_wins_over_default() {
        let doc = PolicyDoc {
            rules: vec![tool_rule("mail.send", Access::Deny)],
            default_action: Access::Allow,
        };

        assert_eq!(doc.resolve(&spec("mail.send", None)).access, Access::Deny);
        assert_eq!(doc.resolve(&spec("mail.draft", None)).access, Access::Allow);
    }

    #[test]
    fn category_matcher_applies_to_whole_category() {
        let doc = PolicyDoc {
            rules: vec![PolicyRule {
                tool: None,
                category: Some("gha".to_string()),
                action: Access::Allow,
                requires_approval: true,
                approval_route: Some("#ci-approvals".to_string()),
            }],
            default_action: Access::Allow,
        };

        let resolved = doc.resolve(&spec("gha.run", Some("gha")));
        assert!(resolved.requires_approval);
        assert_eq!(resolved.approval_route.as_deref(), Some("#ci-approvals"));

        let other = doc.resolve(&spec("slack.post", Some("slack")));
        assert!(!other.requires_approval);
    }

    #[test]
    fn first_match_wins() {
        let doc = PolicyDoc {
            rules: vec![
                tool_rule("sql.query", Access::Deny),
                PolicyRule {
                    tool: None,
                    category: Some("sql".to_string()),
                    action: Access::Allow,
                    requires_approval: false,
                    approval_route: None,
                },
            ],
            default_action: Access::Allow,
        };

        assert_eq!(
            doc.resolve(&spec("sql.query", Some("sql"))).access,
            Access::Deny
        );
    }

    #[test]
    fn default_action_applies_when_nothing_matches() {
        let doc = PolicyDoc {
            rules: Vec::new(),
            default_action: Access::Deny,
        };

        let resolved = doc.resolve(&spec("chart.bar", Some("chart")));
        assert_eq!(resolved.access, Access::Deny);
        assert!(!resolved.requires_approval);
    }

    #[test]
    fn matcherless_rule_matches_nothing() {
        let rule = PolicyRule {
            tool: None,
            category: None,
            action: Access::Deny,
            requires_approval: false,
            approval_route: None,
        };
        assert!(!rule.matches(&spec("mail.send", Some("mail"))));
    }

    #[test]
    fn doc_deserializes_with_defaults() {
        let doc: PolicyDoc = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, PolicyDoc::default());

        let doc: PolicyDoc = serde_json::from_str(
            r#"{
                "rules": [
                    { "tool": "mail.send", "action": "allow", "requires_approval": true }
                ],
                "default_action": "deny"
            }"#,
        )
        .unwrap();
        assert_eq!(doc.default_action, Access::Deny);
        assert!(doc.rules[0].requires_approval);
    }
}
