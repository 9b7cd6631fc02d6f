//! Execution records: the append-only history of rule evaluations.
//!
//! Every rule evaluated during a live firing produces exactly one
//! `ExecutionRecord`, whether or not its conditions matched. The telemetry
//! sink appends these; records are never modified afterwards. Dry runs
//! produce no records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    outcome::{ActionOutcome, FiringId},
    rule::RuleId,
};

/// An immutable record of one rule evaluation within one firing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// The firing this record belongs to.
    pub firing_id: FiringId,
    pub rule_id: RuleId,
    pub rule_name: String,
    pub trigger_event: String,
    /// Snapshot of the trigger context at evaluation time.
    pub context: Value,
    /// Whether the rule's conditions matched.
    pub matched: bool,
    /// Per-action outcomes; empty when the rule did not match.
    pub outcomes: Vec<ActionOutcome>,
    /// True when the rule did not match (nothing to do, evaluation itself
    /// succeeded) or matched and every action succeeded.
    pub success: bool,
    pub error: Option<String>,
    /// Wall-clock duration of condition evaluation plus action dispatch.
    pub duration_secs: f64,
    /// Wall-clock time (UTC) the record was created.
    pub executed_at: DateTime<Utc>,
}
