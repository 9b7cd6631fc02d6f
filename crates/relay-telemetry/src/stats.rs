//! Per-rule counters and aggregate execution statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relay_contracts::record::ExecutionRecord;

/// The derived counters the admin table renders for one rule.
///
/// Mutated exclusively by the engine after each live firing; dry runs never
/// touch them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleStats {
    /// How many firings this rule matched and executed actions for.
    pub execution_count: u64,
    /// How many of those executions had every action succeed.
    pub success_count: u64,
    /// When the rule last executed — set on every execution, success or not
    /// (a failed run still counts as "ran").
    pub last_executed_at: Option<DateTime<Utc>>,
}

impl RuleStats {
    /// Success percentage, rounded to two decimals. Zero when the rule has
    /// never executed.
    pub fn success_rate(&self) -> f64 {
        if self.execution_count == 0 {
            return 0.0;
        }
        let rate = (self.success_count as f64 / self.execution_count as f64) * 100.0;
        (rate * 100.0).round() / 100.0
    }
}

/// Aggregate numbers over a slice of the execution log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStatistics {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    /// Success percentage over `total`, rounded to two decimals.
    pub success_rate: f64,
    pub average_duration_secs: f64,
}

/// Summarize `records`, optionally bounded to `[start, end]` (inclusive)
/// on `executed_at`.
pub fn summarize(
    records: &[ExecutionRecord],
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> ExecutionStatistics {
    let in_window = |r: &&ExecutionRecord| {
        start.map_or(true, |s| r.executed_at >= s) && end.map_or(true, |e| r.executed_at <= e)
    };

    let mut total = 0u64;
    let mut successful = 0u64;
    let mut duration_sum = 0.0f64;
    for record in records.iter().filter(in_window) {
        total += 1;
        if record.success {
            successful += 1;
        }
        duration_sum += record.duration_secs;
    }

    let failed = total - successful;
    let success_rate = if total == 0 {
        0.0
    } else {
        let rate = (successful as f64 / total as f64) * 100.0;
        (rate * 100.0).round() / 100.0
    };
    let average_duration_secs = if total == 0 {
        0.0
    } else {
        duration_sum / total as f64
    };

    ExecutionStatistics {
        total,
        successful,
        failed,
        success_rate,
        average_duration_secs,
    }
}
