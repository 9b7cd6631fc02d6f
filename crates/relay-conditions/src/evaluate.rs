//! Condition evaluation.
//!
//! A condition is `(field, operator, value)`; a rule matches iff every one
//! of its conditions evaluates true (logical AND, short-circuit on the
//! first false). An empty condition list always matches. There is no OR,
//! grouping, or nesting — the flat-AND contract is deliberate.
//!
//! Nothing in this module returns an error: an unknown operator or a field
//! missing from the context evaluates to false (logged as a warning or
//! debug event respectively), so one misconfigured rule can never abort
//! the rest of a firing.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::{debug, warn};

use relay_contracts::{
    context::TriggerContext,
    rule::{Condition, Operator, Rule},
};

use crate::coerce::{coerce_pair, loose_eq, set_elements, text};

/// Evaluate one condition against the context.
///
/// Unknown operator → `warn!` + false. Unresolvable field path → false
/// (`FieldMissing` is a normal outcome, not an error).
pub fn evaluate(condition: &Condition, context: &TriggerContext) -> bool {
    let Some(operator) = Operator::parse(&condition.operator) else {
        warn!(
            field = %condition.field,
            operator = %condition.operator,
            "unknown condition operator; condition evaluates false"
        );
        return false;
    };

    let Some(field_value) = context.resolve(&condition.field) else {
        debug!(
            field = %condition.field,
            "condition field not present in context; condition evaluates false"
        );
        return false;
    };

    apply(operator, field_value, &condition.value)
}

/// True iff every condition of `rule` evaluates true. Short-circuits on the
/// first false; an empty condition list always matches.
pub fn rule_matches(rule: &Rule, context: &TriggerContext) -> bool {
    rule.conditions.iter().all(|c| evaluate(c, context))
}

fn apply(operator: Operator, field: &Value, configured: &str) -> bool {
    match operator {
        Operator::Equals => pair_eq(field, configured),
        Operator::NotEquals => !pair_eq(field, configured),
        Operator::GreaterThan => pair_cmp(field, configured) == Some(Ordering::Greater),
        Operator::LessThan => pair_cmp(field, configured) == Some(Ordering::Less),
        Operator::GreaterOrEqual => {
            matches!(pair_cmp(field, configured), Some(Ordering::Greater | Ordering::Equal))
        }
        Operator::LessOrEqual => {
            matches!(pair_cmp(field, configured), Some(Ordering::Less | Ordering::Equal))
        }
        Operator::Contains => contains(field, configured),
        Operator::NotContains => !contains(field, configured),
        Operator::In => in_set(field, configured),
        Operator::NotIn => !in_set(field, configured),
        Operator::StartsWith => text(field).starts_with(configured),
        Operator::EndsWith => text(field).ends_with(configured),
    }
}

fn pair_eq(field: &Value, configured: &str) -> bool {
    let (lhs, rhs) = coerce_pair(field, configured);
    lhs == rhs
}

fn pair_cmp(field: &Value, configured: &str) -> Option<Ordering> {
    let (lhs, rhs) = coerce_pair(field, configured);
    lhs.partial_cmp(&rhs)
}

/// Substring probe when the field is a string; element membership when the
/// field is an array; stringified substring otherwise.
fn contains(field: &Value, configured: &str) -> bool {
    match field {
        Value::String(s) => s.contains(configured),
        Value::Array(items) => items.iter().any(|item| loose_eq(item, configured)),
        other => text(other).contains(configured),
    }
}

/// The configured value is a comma-separated set literal; membership uses
/// loose (numeric-when-possible) equality per element.
fn in_set(field: &Value, configured: &str) -> bool {
    set_elements(configured)
        .iter()
        .any(|element| loose_eq(field, element))
}
