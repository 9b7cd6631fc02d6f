//! Trigger and action vocabularies.
//!
//! The trigger keys a deployment emits and the action types it registers are
//! closed sets. A `Vocabulary` is an explicit, constructor-injected object —
//! never module-level global state — so tests can supply a minimal
//! vocabulary while the production deployment supplies the full one. The
//! admin surface renders the listings as select-box options, which keeps the
//! UI and the engine from drifting apart.

use std::collections::BTreeMap;

use crate::rule::{Operator, Rule};

/// The registered trigger-event and action-type listings for a deployment.
///
/// Keys map to human-readable display labels. Registration order is not
/// significant; listings iterate in key order for deterministic rendering.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    triggers: BTreeMap<String, String>,
    actions: BTreeMap<String, String>,
}

impl Vocabulary {
    /// An empty vocabulary. Register entries before handing it to the engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger event key with its display label.
    /// Registering the same key twice replaces the previous label.
    pub fn register_trigger(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.triggers.insert(key.into(), label.into());
    }

    /// Register an action type with its display label.
    pub fn register_action(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.actions.insert(key.into(), label.into());
    }

    /// Register a trigger, builder style.
    pub fn with_trigger(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.register_trigger(key, label);
        self
    }

    /// Register an action, builder style.
    pub fn with_action(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.register_action(key, label);
        self
    }

    /// True when `key` is a registered trigger event.
    pub fn has_trigger(&self, key: &str) -> bool {
        self.triggers.contains_key(key)
    }

    /// True when `key` is a registered action type.
    pub fn has_action(&self, key: &str) -> bool {
        self.actions.contains_key(key)
    }

    /// All registered triggers as (key, label), in key order.
    pub fn triggers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.triggers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All registered actions as (key, label), in key order.
    pub fn actions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.actions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The closed operator set as (wire name, label), in listing order.
    pub fn operators() -> impl Iterator<Item = (&'static str, &'static str)> {
        Operator::ALL.iter().map(|op| (op.as_str(), op.label()))
    }

    /// Report the configuration problems in a rule.
    ///
    /// Returns one message per problem: unregistered trigger key,
    /// unregistered action type, unparseable operator, empty action list.
    /// None of these prevent the engine from evaluating the rest of a batch;
    /// the admin surface uses this to warn before saving.
    pub fn lint_rule(&self, rule: &Rule) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.has_trigger(&rule.trigger_event) {
            problems.push(format!(
                "trigger event '{}' is not registered",
                rule.trigger_event
            ));
        }

        for condition in &rule.conditions {
            if Operator::parse(&condition.operator).is_none() {
                problems.push(format!(
                    "condition on '{}' uses unknown operator '{}'",
                    condition.field, condition.operator
                ));
            }
        }

        if rule.actions.is_empty() {
            problems.push("rule has no actions and will never execute".to_string());
        }
        for action in &rule.actions {
            if !self.has_action(&action.kind) {
                problems.push(format!("action type '{}' is not registered", action.kind));
            }
        }

        problems
    }
}
