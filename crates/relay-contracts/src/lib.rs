//! # relay-contracts
//!
//! Shared types, vocabularies, and contracts for the Relay automation
//! engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions, the error enum, and the vocabulary
//! registries.

pub mod context;
pub mod error;
pub mod outcome;
pub mod record;
pub mod rule;
pub mod vocabulary;

#[cfg(test)]
mod tests {
    use super::*;
    use error::{ActionError, RelayError};
    use outcome::{ActionOutcome, FiringId};
    use rule::{Action, Condition, Operator, Rule, RuleId};

    // ── Operator parsing ─────────────────────────────────────────────────────

    #[test]
    fn operator_parse_round_trips_every_wire_name() {
        for op in Operator::ALL {
            assert_eq!(Operator::parse(op.as_str()), Some(op));
        }
    }

    #[test]
    fn operator_parse_rejects_unknown_names() {
        assert_eq!(Operator::parse("frobnicate"), None);
        assert_eq!(Operator::parse(""), None);
        assert_eq!(Operator::parse("EQUALS"), None);
    }

    // ── Rule serde ───────────────────────────────────────────────────────────

    #[test]
    fn rule_round_trips_through_json() {
        let original = Rule {
            id: RuleId::new("overdue-reminder"),
            name: "Overdue reminder".to_string(),
            description: "Email clients 7 days past due".to_string(),
            trigger_event: "invoice.overdue".to_string(),
            is_active: true,
            priority: 5,
            conditions: vec![Condition::new("days_overdue", "greater_or_equal", "7")],
            actions: vec![Action::new("send_email").with_param("template", "overdue_reminder")],
        };
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.id, original.id);
        assert_eq!(decoded.priority, 5);
        assert_eq!(decoded.conditions, original.conditions);
        assert_eq!(decoded.actions, original.actions);
    }

    #[test]
    fn action_kind_serializes_as_type() {
        let action = Action::new("send_email");
        let json = serde_json::to_value(&action).unwrap();
        assert!(json.get("type").is_some());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn rule_defaults_apply_on_sparse_input() {
        // The admin surface only persists what was filled in.
        let json = r#"{
            "id": "minimal",
            "name": "Minimal",
            "trigger_event": "user.registered",
            "actions": [{ "type": "send_email" }]
        }"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert!(rule.is_active);
        assert_eq!(rule.priority, 0);
        assert!(rule.conditions.is_empty());
        assert!(rule.actions[0].params.is_empty());
    }

    // ── FiringId ─────────────────────────────────────────────────────────────

    #[test]
    fn firing_id_new_produces_unique_values() {
        let ids: Vec<FiringId> = (0..100).map(|_| FiringId::new()).collect();
        let unique: std::collections::HashSet<String> =
            ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(unique.len(), 100);
    }

    // ── ActionOutcome constructors ───────────────────────────────────────────

    #[test]
    fn action_outcome_constructors() {
        let ok = ActionOutcome::ok("send_email");
        assert!(ok.success);
        assert!(ok.message.is_none());

        let failed = ActionOutcome::failed("change_status", "unknown action type");
        assert!(!failed.success);
        assert_eq!(failed.message.as_deref(), Some("unknown action type"));
    }

    // ── Error display messages ───────────────────────────────────────────────

    #[test]
    fn error_rule_fetch_failed_display() {
        let err = RelayError::RuleFetchFailed {
            reason: "storage unavailable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("rule fetch failed"));
        assert!(msg.contains("storage unavailable"));
    }

    #[test]
    fn error_config_error_display() {
        let err = RelayError::ConfigError {
            reason: "missing rule file".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("missing rule file"));
    }

    #[test]
    fn action_error_display_is_the_message() {
        let err = ActionError::new("smtp timeout");
        assert_eq!(err.to_string(), "smtp timeout");
    }
}
