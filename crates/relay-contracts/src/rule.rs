//! Rule, condition, and action types.
//!
//! A `Rule` binds a trigger event to a flat AND-list of conditions and an
//! ordered list of actions. Rules are authored by the administrative surface
//! and are read-only to the engine during evaluation; execution counters
//! live in the telemetry store, not on the rule itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stable, human-readable identifier for a rule.
///
/// Used across rule files, structured logs, and telemetry keys.
/// Example: RuleId("overdue-first-reminder")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

impl RuleId {
    /// Construct a rule id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single `(field, operator, value)` predicate.
///
/// `field` is a dotted path into the trigger context (e.g. `invoice.total`,
/// `days_overdue`). `operator` is stored as the string the admin surface
/// persists and parsed into [`Operator`] at evaluation time — an unknown
/// operator is a configuration warning, never a deserialization failure.
/// `value` is always stored as a string; coercion happens at evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: String,
    pub value: String,
}

impl Condition {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// A named, parameterized side effect executed when a rule matches.
///
/// `kind` is the registry key (serialized as `type`, the name the admin
/// surface stores). `params` are plain string key/values interpreted by the
/// registered handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The handler's registry key (e.g. "send_email", "apply_credit").
    #[serde(rename = "type")]
    pub kind: String,

    /// Handler-specific parameters (e.g. template = "overdue_reminder").
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl Action {
    /// Construct an action with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add one parameter, builder style.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// A named automation policy: trigger, conditions, actions, priority.
///
/// `priority` is a signed integer; among matching rules for the same event,
/// higher fires first, with creation order as the stable tiebreak (enforced
/// by the rule repository, not here). A rule with an empty condition list
/// always matches its trigger. A rule with zero actions is inert and is
/// skipped by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Key from the trigger vocabulary (e.g. "invoice.overdue").
    pub trigger_event: String,
    /// Inactive rules are never evaluated.
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

fn default_active() -> bool {
    true
}

/// The closed set of condition operators.
///
/// Stored as snake_case strings on the wire. `parse` is lenient by design:
/// it returns `None` for anything outside the set, which the evaluator
/// reports as a configuration warning and treats as condition-false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Contains,
    NotContains,
    In,
    NotIn,
    StartsWith,
    EndsWith,
}

impl Operator {
    /// Every operator, in the order the admin surface lists them.
    pub const ALL: [Operator; 12] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
        Operator::Contains,
        Operator::NotContains,
        Operator::In,
        Operator::NotIn,
        Operator::StartsWith,
        Operator::EndsWith,
    ];

    /// Parse a stored operator string. Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Operator> {
        match s {
            "equals" => Some(Operator::Equals),
            "not_equals" => Some(Operator::NotEquals),
            "greater_than" => Some(Operator::GreaterThan),
            "less_than" => Some(Operator::LessThan),
            "greater_or_equal" => Some(Operator::GreaterOrEqual),
            "less_or_equal" => Some(Operator::LessOrEqual),
            "contains" => Some(Operator::Contains),
            "not_contains" => Some(Operator::NotContains),
            "in" => Some(Operator::In),
            "not_in" => Some(Operator::NotIn),
            "starts_with" => Some(Operator::StartsWith),
            "ends_with" => Some(Operator::EndsWith),
            _ => None,
        }
    }

    /// The snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::GreaterOrEqual => "greater_or_equal",
            Operator::LessOrEqual => "less_or_equal",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
        }
    }

    /// The display label the admin surface renders in select boxes.
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Equals => "Equals",
            Operator::NotEquals => "Not Equals",
            Operator::GreaterThan => "Greater Than",
            Operator::LessThan => "Less Than",
            Operator::GreaterOrEqual => "Greater Than or Equal",
            Operator::LessOrEqual => "Less Than or Equal",
            Operator::Contains => "Contains",
            Operator::NotContains => "Does Not Contain",
            Operator::In => "In List",
            Operator::NotIn => "Not In List",
            Operator::StartsWith => "Starts With",
            Operator::EndsWith => "Ends With",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
