//! In-memory implementation of `RuleStore`.
//!
//! `InMemoryRuleStore` is the reference repository: rules live in a `Vec`
//! behind a `Mutex`, each stamped with an insertion sequence number that
//! serves as the creation-order tiebreak. `set_active` mutates the flag in
//! place, so the very next `rules_for()` call observes the change — there
//! is no caching layer to go stale.

use std::sync::Mutex;

use tracing::debug;

use relay_contracts::{
    error::{RelayError, RelayResult},
    rule::{Rule, RuleId},
};
use relay_engine::traits::RuleStore;

struct StoredRule {
    rule: Rule,
    /// Insertion order, the tiebreak for equal priorities.
    seq: u64,
}

/// A thread-safe, in-memory rule repository.
#[derive(Default)]
pub struct InMemoryRuleStore {
    inner: Mutex<Vec<StoredRule>>,
}

impl InMemoryRuleStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `rules`, in creation order.
    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        let store = Self::new();
        for rule in rules {
            store.insert(rule);
        }
        store
    }

    /// Append one rule. Insertion order is creation order.
    pub fn insert(&self, rule: Rule) {
        let mut inner = self.inner.lock().expect("rule store lock poisoned");
        let seq = inner.len() as u64;
        inner.push(StoredRule { rule, seq });
    }

    /// Number of rules in the store, active or not.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("rule store lock poisoned").len()
    }

    /// True when the store holds no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RuleStore for InMemoryRuleStore {
    /// Active rules for `trigger_event`: priority descending, creation
    /// order ascending on ties.
    fn rules_for(&self, trigger_event: &str) -> RelayResult<Vec<Rule>> {
        let inner = self.inner.lock().map_err(|e| RelayError::RuleFetchFailed {
            reason: format!("rule store lock poisoned: {}", e),
        })?;

        let mut candidates: Vec<&StoredRule> = inner
            .iter()
            .filter(|s| s.rule.is_active && s.rule.trigger_event == trigger_event)
            .collect();
        candidates.sort_by_key(|s| (std::cmp::Reverse(s.rule.priority), s.seq));

        debug!(
            trigger = %trigger_event,
            count = candidates.len(),
            "selected active rules"
        );

        Ok(candidates.into_iter().map(|s| s.rule.clone()).collect())
    }

    fn set_active(&self, rule_ids: &[RuleId], active: bool) -> RelayResult<()> {
        let mut inner = self.inner.lock().map_err(|e| RelayError::RuleFetchFailed {
            reason: format!("rule store lock poisoned: {}", e),
        })?;

        for stored in inner.iter_mut() {
            if rule_ids.contains(&stored.rule.id) {
                stored.rule.is_active = active;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use relay_contracts::rule::{Action, Rule, RuleId};
    use relay_engine::traits::RuleStore;

    use super::InMemoryRuleStore;

    fn rule(id: &str, trigger: &str, priority: i64) -> Rule {
        Rule {
            id: RuleId::new(id),
            name: id.to_string(),
            description: String::new(),
            trigger_event: trigger.to_string(),
            is_active: true,
            priority,
            conditions: vec![],
            actions: vec![Action::new("send_email")],
        }
    }

    #[test]
    fn orders_by_priority_then_creation() {
        let store = InMemoryRuleStore::with_rules(vec![
            rule("low", "invoice.overdue", 1),
            rule("tie-first", "invoice.overdue", 5),
            rule("high", "invoice.overdue", 10),
            rule("tie-second", "invoice.overdue", 5),
        ]);

        let ids: Vec<String> = store
            .rules_for("invoice.overdue")
            .unwrap()
            .into_iter()
            .map(|r| r.id.0)
            .collect();
        assert_eq!(ids, vec!["high", "tie-first", "tie-second", "low"]);
    }

    #[test]
    fn filters_by_trigger_event() {
        let store = InMemoryRuleStore::with_rules(vec![
            rule("a", "invoice.overdue", 0),
            rule("b", "ticket.created", 0),
        ]);
        let rules = store.rules_for("ticket.created").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id.0, "b");
    }

    #[test]
    fn negative_priorities_sort_last() {
        let store = InMemoryRuleStore::with_rules(vec![
            rule("negative", "invoice.overdue", -3),
            rule("zero", "invoice.overdue", 0),
        ]);
        let ids: Vec<String> = store
            .rules_for("invoice.overdue")
            .unwrap()
            .into_iter()
            .map(|r| r.id.0)
            .collect();
        assert_eq!(ids, vec!["zero", "negative"]);
    }

    #[test]
    fn set_active_takes_effect_on_next_read() {
        let store = InMemoryRuleStore::with_rules(vec![
            rule("a", "invoice.overdue", 2),
            rule("b", "invoice.overdue", 1),
        ]);
        assert_eq!(store.rules_for("invoice.overdue").unwrap().len(), 2);

        store
            .set_active(&[RuleId::new("a")], false)
            .unwrap();
        let remaining = store.rules_for("invoice.overdue").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id.0, "b");

        // Reactivation is just as immediate.
        store.set_active(&[RuleId::new("a")], true).unwrap();
        assert_eq!(store.rules_for("invoice.overdue").unwrap().len(), 2);
    }

    #[test]
    fn set_active_ignores_unknown_ids() {
        let store = InMemoryRuleStore::with_rules(vec![rule("a", "invoice.overdue", 0)]);
        store
            .set_active(&[RuleId::new("ghost"), RuleId::new("a")], false)
            .unwrap();
        assert!(store.rules_for("invoice.overdue").unwrap().is_empty());
    }
}
