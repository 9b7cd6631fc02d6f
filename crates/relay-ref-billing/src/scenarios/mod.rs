//! Runnable end-to-end scenarios for the billing reference runtime.
//!
//! Each scenario wires real Relay components — TOML-loaded rule store,
//! action registry with demo handlers, in-memory telemetry — and walks one
//! back-office situation, printing what the engine decided at every step.

use std::sync::Arc;

use relay_engine::Engine;
use relay_store::InMemoryRuleStore;
use relay_telemetry::InMemoryTelemetry;

use crate::handlers::{billing_registry, SideEffectLog};
use crate::vocabulary::billing_vocabulary;

pub mod invoice_overdue;
pub mod payment_failed;
pub mod ticket_escalation;

/// The automation rules every scenario runs against.
pub const BILLING_RULES: &str = include_str!("../../rules/billing.toml");

/// Wire an engine over the embedded rule file and demo handlers.
///
/// Returns the shared store and telemetry handles alongside the engine so
/// scenarios can toggle rules and read counters after firings.
pub fn billing_engine() -> relay_contracts::error::RelayResult<(
    Engine,
    Arc<InMemoryRuleStore>,
    Arc<InMemoryTelemetry>,
    SideEffectLog,
)> {
    let store = Arc::new(InMemoryRuleStore::from_toml_str(BILLING_RULES)?);
    let telemetry = Arc::new(InMemoryTelemetry::new());
    let effects = SideEffectLog::new();

    let engine = Engine::new(
        Box::new(store.clone()),
        billing_registry(&effects),
        Box::new(telemetry.clone()),
        billing_vocabulary(),
    );

    Ok((engine, store, telemetry, effects))
}

/// Print a one-line summary of each rule outcome in a report.
pub(crate) fn print_outcomes(report: &relay_contracts::outcome::FireReport) {
    println!(
        "  evaluated {} rule(s), {} matched, {} executed successfully",
        report.rules_evaluated, report.rules_matched, report.rules_executed_successfully
    );
    for outcome in &report.outcomes {
        let status = if !outcome.matched {
            "no match".to_string()
        } else if outcome.succeeded {
            "executed".to_string()
        } else {
            format!("FAILED ({})", outcome.error.as_deref().unwrap_or("unknown"))
        };
        println!("    [{}] {} — {}", outcome.rule_id, outcome.rule_name, status);
        for action in &outcome.actions {
            let mark = if action.success { "ok" } else { "failed" };
            match &action.message {
                Some(message) => println!("        {} {}: {}", action.action, mark, message),
                None => println!("        {} {}", action.action, mark),
            }
        }
    }
}
