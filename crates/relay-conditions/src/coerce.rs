//! Value coercion: normalizing context values and configured comparison
//! values into a common comparable representation.
//!
//! Context fields arrive as whatever JSON the caller built (numbers,
//! strings, booleans, date-like strings); a rule's comparison value is
//! always stored as a string. Before an operator is applied, both sides are
//! coerced to the same kind:
//!
//! 1. Both parse as numbers → compare numerically.
//! 2. Both parse as ISO-8601 timestamps or `YYYY-MM-DD` dates → compare as
//!    instants.
//! 3. Otherwise → case-sensitive string comparison; booleans stringify to
//!    `"true"`/`"false"`, and a boolean field against a `"1"`/`"0"` rule
//!    value compares as booleans.
//!
//! Failing to parse is a silent fallback, never an error.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// A context or rule value after coercion. `coerce_pair` always returns two
/// values of the same variant, so derived ordering never crosses kinds.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Coerced {
    Number(f64),
    Instant(DateTime<Utc>),
    Text(String),
}

/// Coerce a context field value and a configured rule value into the same
/// comparable kind, per the precedence above.
pub fn coerce_pair(field: &Value, configured: &str) -> (Coerced, Coerced) {
    if let (Some(lhs), Some(rhs)) = (field_number(field), parse_number(configured)) {
        return (Coerced::Number(lhs), Coerced::Number(rhs));
    }

    if let (Some(lhs), Some(rhs)) = (field_instant(field), parse_instant(configured)) {
        return (Coerced::Instant(lhs), Coerced::Instant(rhs));
    }

    if let Value::Bool(b) = field {
        if let Some(rb) = parse_bool(configured) {
            return (
                Coerced::Text(bool_text(*b).to_string()),
                Coerced::Text(bool_text(rb).to_string()),
            );
        }
    }

    (
        Coerced::Text(text(field)),
        Coerced::Text(configured.to_string()),
    )
}

/// Loose equality between a context value and one set element: numeric when
/// both sides parse as numbers, instant when both parse as dates, else
/// case-sensitive string equality.
pub fn loose_eq(field: &Value, element: &str) -> bool {
    let (lhs, rhs) = coerce_pair(field, element);
    lhs == rhs
}

/// Split a configured rule value as a comma-separated set literal.
/// Elements are whitespace-trimmed; empty elements are dropped.
pub fn set_elements(configured: &str) -> Vec<&str> {
    configured
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect()
}

/// Stringify a context value for textual operators.
///
/// Strings pass through unquoted; booleans become `"true"`/`"false"`;
/// numbers use their JSON rendering; null becomes the empty string;
/// arrays and objects use compact JSON.
pub fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => bool_text(*b).to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn bool_text(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

fn field_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn field_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_instant(s),
        _ => None,
    }
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Utc));
    }
    // Plain dates compare as midnight UTC.
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{coerce_pair, loose_eq, set_elements, text, Coerced};

    #[test]
    fn numbers_win_over_strings() {
        let (lhs, rhs) = coerce_pair(&json!(150), "150.0");
        assert_eq!(lhs, Coerced::Number(150.0));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn numeric_strings_compare_numerically() {
        let (lhs, rhs) = coerce_pair(&json!("0250"), "250");
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn timestamps_compare_as_instants() {
        let (lhs, rhs) = coerce_pair(&json!("2026-03-01T12:00:00Z"), "2026-03-01T14:00:00+02:00");
        // Same instant expressed in two zones.
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn plain_dates_order_as_instants() {
        let (lhs, rhs) = coerce_pair(&json!("2026-03-02"), "2026-03-01");
        assert!(lhs > rhs);
    }

    #[test]
    fn mixed_kinds_fall_back_to_strings() {
        // "abc" is neither number nor date, so both sides stay textual.
        let (lhs, rhs) = coerce_pair(&json!("2026-03-01"), "abc");
        assert_eq!(lhs, Coerced::Text("2026-03-01".to_string()));
        assert_eq!(rhs, Coerced::Text("abc".to_string()));
    }

    #[test]
    fn string_comparison_is_case_sensitive() {
        let (lhs, rhs) = coerce_pair(&json!("Active"), "active");
        assert_ne!(lhs, rhs);
    }

    #[test]
    fn bool_field_matches_textual_truthiness() {
        let (lhs, rhs) = coerce_pair(&json!(true), "1");
        assert_eq!(lhs, rhs);
        let (lhs, rhs) = coerce_pair(&json!(true), "true");
        assert_eq!(lhs, rhs);
        let (lhs, rhs) = coerce_pair(&json!(false), "0");
        assert_eq!(lhs, rhs);
        let (lhs, rhs) = coerce_pair(&json!(true), "0");
        assert_ne!(lhs, rhs);
    }

    #[test]
    fn bool_field_against_arbitrary_text_stringifies() {
        let (lhs, rhs) = coerce_pair(&json!(true), "yes");
        assert_eq!(lhs, Coerced::Text("true".to_string()));
        assert_eq!(rhs, Coerced::Text("yes".to_string()));
    }

    #[test]
    fn set_elements_trims_and_drops_empties() {
        assert_eq!(set_elements("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(set_elements("a,,b,"), vec!["a", "b"]);
        assert!(set_elements("").is_empty());
    }

    #[test]
    fn loose_eq_is_numeric_when_possible() {
        assert!(loose_eq(&json!(7), "7.0"));
        assert!(loose_eq(&json!("pending"), "pending"));
        assert!(!loose_eq(&json!("pending"), "Pending"));
    }

    #[test]
    fn text_stringifies_scalars() {
        assert_eq!(text(&json!("abc")), "abc");
        assert_eq!(text(&json!(3.5)), "3.5");
        assert_eq!(text(&json!(true)), "true");
        assert_eq!(text(&json!(null)), "");
    }

    #[test]
    fn infinite_parse_results_are_rejected() {
        // "inf" parses as f64 but is not a usable comparison value.
        let (lhs, _) = coerce_pair(&json!("inf"), "inf");
        assert_eq!(lhs, Coerced::Text("inf".to_string()));
    }
}
