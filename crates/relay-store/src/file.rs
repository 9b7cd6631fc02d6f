//! TOML-loaded rule sets.
//!
//! Deployments that keep their automation rules in configuration files
//! load them here. File order is creation order, which makes the
//! priority-tie behavior of a rule file fully deterministic.
//!
//! Example document:
//!
//! ```toml
//! [[rules]]
//! id = "overdue-first-reminder"
//! name = "First overdue reminder"
//! trigger_event = "invoice.overdue"
//! priority = 5
//!
//! [[rules.conditions]]
//! field = "days_overdue"
//! operator = "greater_or_equal"
//! value = "7"
//!
//! [[rules.actions]]
//! type = "send_email"
//! params = { template = "overdue_reminder" }
//! ```

use std::path::Path;

use serde::Deserialize;

use relay_contracts::{
    error::{RelayError, RelayResult},
    rule::Rule,
};

use crate::memory::InMemoryRuleStore;

/// The top-level structure of a rule file.
#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<Rule>,
}

/// Parse `s` as a TOML rule document.
///
/// Returns `RelayError::ConfigError` when the TOML is malformed or does not
/// match the rule schema. Unknown operators and action types are NOT
/// rejected here — they are configuration warnings surfaced by
/// `Vocabulary::lint_rule` and degrade at evaluation time.
pub fn load_rules_from_str(s: &str) -> RelayResult<Vec<Rule>> {
    let file: RuleFile = toml::from_str(s).map_err(|e| RelayError::ConfigError {
        reason: format!("failed to parse rule TOML: {}", e),
    })?;
    Ok(file.rules)
}

/// Read the file at `path` and parse it as a TOML rule document.
pub fn load_rules_from_file(path: &Path) -> RelayResult<Vec<Rule>> {
    let contents = std::fs::read_to_string(path).map_err(|e| RelayError::ConfigError {
        reason: format!("failed to read rule file '{}': {}", path.display(), e),
    })?;
    load_rules_from_str(&contents)
}

impl InMemoryRuleStore {
    /// Build a store from a TOML rule document.
    pub fn from_toml_str(s: &str) -> RelayResult<Self> {
        Ok(Self::with_rules(load_rules_from_str(s)?))
    }

    /// Build a store from a TOML rule file.
    pub fn from_file(path: &Path) -> RelayResult<Self> {
        Ok(Self::with_rules(load_rules_from_file(path)?))
    }
}

#[cfg(test)]
mod tests {
    use relay_contracts::error::RelayError;
    use relay_engine::traits::RuleStore;

    use crate::memory::InMemoryRuleStore;

    use super::load_rules_from_str;

    const SAMPLE: &str = r#"
        [[rules]]
        id = "overdue-first-reminder"
        name = "First overdue reminder"
        description = "Email clients a week past due"
        trigger_event = "invoice.overdue"
        priority = 5

        [[rules.conditions]]
        field = "days_overdue"
        operator = "greater_or_equal"
        value = "7"

        [[rules.actions]]
        type = "send_email"
        params = { template = "overdue_reminder" }

        [[rules]]
        id = "vip-escalation"
        name = "VIP escalation"
        trigger_event = "invoice.overdue"
        priority = 5

        [[rules.actions]]
        type = "create_ticket"
    "#;

    #[test]
    fn parses_rules_with_defaults() {
        let rules = load_rules_from_str(SAMPLE).unwrap();
        assert_eq!(rules.len(), 2);

        let first = &rules[0];
        assert_eq!(first.id.0, "overdue-first-reminder");
        assert_eq!(first.priority, 5);
        assert!(first.is_active);
        assert_eq!(first.conditions.len(), 1);
        assert_eq!(first.actions[0].kind, "send_email");
        assert_eq!(
            first.actions[0].params.get("template").map(String::as_str),
            Some("overdue_reminder")
        );

        let second = &rules[1];
        assert!(second.conditions.is_empty());
        assert!(second.actions[0].params.is_empty());
    }

    #[test]
    fn file_order_is_creation_order() {
        // Equal priorities resolve to document order.
        let store = InMemoryRuleStore::from_toml_str(SAMPLE).unwrap();
        let ids: Vec<String> = store
            .rules_for("invoice.overdue")
            .unwrap()
            .into_iter()
            .map(|r| r.id.0)
            .collect();
        assert_eq!(ids, vec!["overdue-first-reminder", "vip-escalation"]);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let result = load_rules_from_str("[[rules]]\nid = ");
        match result {
            Err(RelayError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse rule TOML"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn empty_document_is_an_empty_rule_set() {
        assert!(load_rules_from_str("").unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = InMemoryRuleStore::from_file(std::path::Path::new("/does/not/exist.toml"));
        assert!(matches!(result, Err(RelayError::ConfigError { .. })));
    }
}
