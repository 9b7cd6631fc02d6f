//! Scenario 1: Overdue invoice dunning.
//!
//! Two firings of `invoice.overdue` for the same VIP client:
//!
//! 1. Ten days past due — the first-reminder rule and the VIP escalation
//!    match; the final-notice rule (30+ days) does not.
//! 2. Forty-five days past due — all three rules match and the service is
//!    suspended alongside the final notice.
//!
//! Demonstrates priority ordering, condition coercion (numeric threshold,
//! array membership), and the telemetry counters the admin table shows.

use serde_json::json;

use relay_contracts::{context::TriggerContext, error::RelayResult, rule::RuleId};
use relay_engine::FireOptions;

use super::{billing_engine, print_outcomes};

/// Run Scenario 1: Overdue invoice dunning.
pub fn run_scenario() -> RelayResult<()> {
    println!("=== Scenario 1: Overdue invoice dunning ===");
    println!();

    let (engine, _store, telemetry, effects) = billing_engine()?;

    let base_context = TriggerContext::new()
        .with("client_email", json!("kim@example.test"))
        .with("service_id", json!("srv-2041"))
        .with("amount", json!(250.0))
        .with("tags", json!(["vip", "reseller"]));

    // ── Firing 1: ten days overdue ───────────────────────────────────────────
    println!("Firing invoice.overdue at 10 days past due:");
    let ctx = base_context.clone().with("days_overdue", json!(10));
    let report = engine.fire("invoice.overdue", &ctx, FireOptions::live())?;
    print_outcomes(&report);
    println!();

    // ── Firing 2: forty-five days overdue ────────────────────────────────────
    println!("Firing invoice.overdue at 45 days past due:");
    let ctx = base_context.with("days_overdue", json!(45));
    let report = engine.fire("invoice.overdue", &ctx, FireOptions::live())?;
    print_outcomes(&report);
    println!();

    // ── Side effects and counters ────────────────────────────────────────────
    println!("Side effects performed:");
    for effect in effects.entries() {
        println!("    {} — {}", effect.action, effect.detail);
    }
    println!();

    println!("Telemetry after both firings:");
    for id in ["overdue-final-notice", "overdue-first-reminder", "overdue-vip-escalation"] {
        let rule_id = RuleId::new(id);
        println!(
            "    {}: executions = {}, success rate = {}%, last executed = {}",
            id,
            telemetry.execution_count(&rule_id),
            telemetry.success_rate(&rule_id),
            telemetry
                .last_executed_at(&rule_id)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "never".to_string()),
        );
    }
    println!();

    Ok(())
}
