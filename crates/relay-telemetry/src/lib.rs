//! # relay-telemetry
//!
//! Per-rule execution counters and the append-only execution log for the
//! Relay automation engine.
//!
//! [`memory::InMemoryTelemetry`] is the reference `TelemetrySink`
//! implementation. The admin surface reads `execution_count`,
//! `success_rate`, and `last_executed_at` from it for the rule table, and
//! `statistics` for the dashboard; the engine is its only writer.

pub mod memory;
pub mod stats;

pub use memory::InMemoryTelemetry;
pub use stats::{summarize, ExecutionStatistics, RuleStats};
