//! In-memory implementation of `TelemetrySink`.
//!
//! `InMemoryTelemetry` keeps per-rule counters and the append-only
//! execution log in a `Mutex`-protected interior, making it safe to share
//! across concurrent firings. The admin surface reads counters through the
//! accessor methods; the engine is the only writer.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::debug;

use relay_contracts::{
    error::{RelayError, RelayResult},
    record::ExecutionRecord,
    rule::RuleId,
};
use relay_engine::traits::TelemetrySink;

use crate::stats::{summarize, ExecutionStatistics, RuleStats};

/// The mutable interior of an `InMemoryTelemetry`.
#[derive(Default)]
struct TelemetryState {
    stats: HashMap<RuleId, RuleStats>,
    /// Every execution record, in append order.
    log: Vec<ExecutionRecord>,
}

/// A thread-safe, in-memory telemetry store.
///
/// # Thread safety
///
/// `record()` and every read accessor acquire a `Mutex` internally, so
/// concurrent firings increment counters without lost updates.
#[derive(Default)]
pub struct InMemoryTelemetry {
    state: Mutex<TelemetryState>,
}

impl InMemoryTelemetry {
    /// An empty telemetry store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The execution count for a rule (zero when never executed).
    pub fn execution_count(&self, rule_id: &RuleId) -> u64 {
        self.with_stats(rule_id, |s| s.execution_count).unwrap_or(0)
    }

    /// The success count for a rule.
    pub fn success_count(&self, rule_id: &RuleId) -> u64 {
        self.with_stats(rule_id, |s| s.success_count).unwrap_or(0)
    }

    /// Success percentage for a rule, two decimals, zero when never executed.
    pub fn success_rate(&self, rule_id: &RuleId) -> f64 {
        self.with_stats(rule_id, |s| s.success_rate()).unwrap_or(0.0)
    }

    /// When the rule last executed, if ever.
    pub fn last_executed_at(&self, rule_id: &RuleId) -> Option<DateTime<Utc>> {
        self.with_stats(rule_id, |s| s.last_executed_at).flatten()
    }

    /// A snapshot of the full counter set for a rule.
    pub fn stats(&self, rule_id: &RuleId) -> Option<RuleStats> {
        self.with_stats(rule_id, Clone::clone)
    }

    /// A snapshot of the full execution log, in append order.
    pub fn records(&self) -> Vec<ExecutionRecord> {
        self.state.lock().expect("telemetry lock poisoned").log.clone()
    }

    /// The execution log entries for one rule, in append order.
    pub fn records_for(&self, rule_id: &RuleId) -> Vec<ExecutionRecord> {
        self.state
            .lock()
            .expect("telemetry lock poisoned")
            .log
            .iter()
            .filter(|r| &r.rule_id == rule_id)
            .cloned()
            .collect()
    }

    /// Aggregate statistics over the execution log, optionally bounded to
    /// `[start, end]` on `executed_at`.
    pub fn statistics(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ExecutionStatistics {
        let state = self.state.lock().expect("telemetry lock poisoned");
        summarize(&state.log, start, end)
    }

    fn with_stats<T>(&self, rule_id: &RuleId, f: impl FnOnce(&RuleStats) -> T) -> Option<T> {
        self.state
            .lock()
            .expect("telemetry lock poisoned")
            .stats
            .get(rule_id)
            .map(f)
    }
}

impl TelemetrySink for InMemoryTelemetry {
    /// Append one execution record and update the rule's counters.
    ///
    /// Counters move only for matched records: `execution_count` always,
    /// `success_count` iff every action succeeded, `last_executed_at` on
    /// every execution regardless of success. Non-matching evaluations are
    /// logged but do not count as executions.
    fn record(&self, record: &ExecutionRecord) -> RelayResult<()> {
        let mut state = self.state.lock().map_err(|e| RelayError::TelemetryWriteFailed {
            reason: format!("telemetry lock poisoned: {}", e),
        })?;

        if record.matched {
            let stats = state.stats.entry(record.rule_id.clone()).or_default();
            stats.execution_count += 1;
            if record.success {
                stats.success_count += 1;
            }
            stats.last_executed_at = Some(record.executed_at);

            debug!(
                rule_id = %record.rule_id,
                execution_count = stats.execution_count,
                success = record.success,
                "execution recorded"
            );
        }

        state.log.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use relay_contracts::{
        outcome::{ActionOutcome, FiringId},
        record::ExecutionRecord,
        rule::RuleId,
    };
    use relay_engine::traits::TelemetrySink;

    use super::InMemoryTelemetry;

    fn record(rule: &str, matched: bool, success: bool) -> ExecutionRecord {
        ExecutionRecord {
            firing_id: FiringId::new(),
            rule_id: RuleId::new(rule),
            rule_name: rule.to_string(),
            trigger_event: "invoice.overdue".to_string(),
            context: serde_json::json!({ "days_overdue": 10 }),
            matched,
            outcomes: if matched {
                vec![ActionOutcome::ok("send_email")]
            } else {
                vec![]
            },
            success,
            error: None,
            duration_secs: 0.01,
            executed_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn counters_track_matched_executions() {
        let telemetry = InMemoryTelemetry::new();
        telemetry.record(&record("r", true, true)).unwrap();
        telemetry.record(&record("r", true, false)).unwrap();
        telemetry.record(&record("r", true, true)).unwrap();

        let id = RuleId::new("r");
        assert_eq!(telemetry.execution_count(&id), 3);
        assert_eq!(telemetry.success_count(&id), 2);
        assert_eq!(telemetry.success_rate(&id), 66.67);
        assert!(telemetry.last_executed_at(&id).is_some());
    }

    #[test]
    fn non_matching_evaluations_are_logged_but_not_counted() {
        let telemetry = InMemoryTelemetry::new();
        telemetry.record(&record("r", false, true)).unwrap();

        let id = RuleId::new("r");
        assert_eq!(telemetry.execution_count(&id), 0);
        assert_eq!(telemetry.last_executed_at(&id), None);
        assert_eq!(telemetry.records().len(), 1);
    }

    #[test]
    fn failed_execution_still_counts_as_ran() {
        let telemetry = InMemoryTelemetry::new();
        telemetry.record(&record("r", true, false)).unwrap();

        let id = RuleId::new("r");
        assert_eq!(telemetry.execution_count(&id), 1);
        assert_eq!(telemetry.success_count(&id), 0);
        assert_eq!(telemetry.success_rate(&id), 0.0);
        assert!(telemetry.last_executed_at(&id).is_some());
    }

    #[test]
    fn unknown_rule_reads_as_zeroes() {
        let telemetry = InMemoryTelemetry::new();
        let id = RuleId::new("ghost");
        assert_eq!(telemetry.execution_count(&id), 0);
        assert_eq!(telemetry.success_rate(&id), 0.0);
        assert_eq!(telemetry.last_executed_at(&id), None);
        assert!(telemetry.stats(&id).is_none());
    }

    #[test]
    fn records_for_filters_by_rule() {
        let telemetry = InMemoryTelemetry::new();
        telemetry.record(&record("a", true, true)).unwrap();
        telemetry.record(&record("b", true, true)).unwrap();
        telemetry.record(&record("a", false, true)).unwrap();

        assert_eq!(telemetry.records_for(&RuleId::new("a")).len(), 2);
        assert_eq!(telemetry.records_for(&RuleId::new("b")).len(), 1);
    }

    #[test]
    fn statistics_cover_the_whole_log() {
        let telemetry = InMemoryTelemetry::new();
        telemetry.record(&record("a", true, true)).unwrap();
        telemetry.record(&record("a", true, false)).unwrap();

        let stats = telemetry.statistics(None, None);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.successful, 1);
        assert_eq!(stats.success_rate, 50.0);
    }

    /// Concurrent increments must not lose updates.
    #[test]
    fn concurrent_recording_loses_nothing() {
        let telemetry = Arc::new(InMemoryTelemetry::new());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let telemetry = telemetry.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        telemetry.record(&record("shared", true, true)).unwrap();
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(telemetry.execution_count(&RuleId::new("shared")), 400);
        assert_eq!(telemetry.records().len(), 400);
    }
}
