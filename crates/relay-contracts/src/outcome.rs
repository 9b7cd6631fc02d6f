//! Firing-level result types.
//!
//! `FireReport` is what `Engine::fire()` returns to the caller — one per
//! firing, aggregating a `RuleOutcome` per evaluated rule. `TestOutcome` is
//! the `{success, message}` shape the admin "test rule" action surfaces as
//! a flash notification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rule::RuleId;

/// Unique identifier for a single call to `Engine::fire()`.
///
/// Appears in structured logs and on every execution record produced by
/// the firing, tying a batch of records together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiringId(pub uuid::Uuid);

impl FiringId {
    /// Create a new, unique firing id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for FiringId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FiringId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The result of dispatching one action.
///
/// Failures carry a descriptive message ("unknown action type", the
/// handler's error text) so the telemetry and the admin UI can explain
/// exactly what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// The action's registry key.
    pub action: String,
    pub success: bool,
    pub message: Option<String>,
}

impl ActionOutcome {
    /// A successful outcome with no message.
    pub fn ok(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            success: true,
            message: None,
        }
    }

    /// A successful outcome carrying a message (used by the dry-run path).
    pub fn ok_with(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            success: true,
            message: Some(message.into()),
        }
    }

    /// A failed outcome with a descriptive message.
    pub fn failed(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            success: false,
            message: Some(message.into()),
        }
    }
}

/// What happened to one rule during a firing.
///
/// `succeeded` is true only when the rule matched AND every one of its
/// actions succeeded — partial action failure marks the rule as failed
/// overall while `actions` still records which ones did succeed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub matched: bool,
    /// One entry per dispatched action, in declaration order. Empty when
    /// the rule did not match.
    pub actions: Vec<ActionOutcome>,
    pub succeeded: bool,
    pub error: Option<String>,
}

/// The aggregate result of one `Engine::fire()` call.
///
/// "No applicable rule" is a normal outcome: all counters zero, empty
/// `outcomes`, and no error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireReport {
    pub firing_id: FiringId,
    pub trigger_event: String,
    pub dry_run: bool,
    /// Wall-clock time (UTC) the firing started.
    pub fired_at: DateTime<Utc>,
    pub rules_evaluated: usize,
    pub rules_matched: usize,
    pub rules_executed_successfully: usize,
    pub outcomes: Vec<RuleOutcome>,
}

/// The result of the admin "test rule" simulation.
///
/// `success` reports whether the simulation itself ran cleanly (a dry-run
/// action outcome failure — e.g. an unregistered action type — flips it to
/// false so the admin sees the configuration problem before going live).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestOutcome {
    pub success: bool,
    pub conditions_met: bool,
    /// Flash-notification body for the admin surface.
    pub message: String,
    /// What would have executed, one entry per action.
    pub actions: Vec<ActionOutcome>,
}
