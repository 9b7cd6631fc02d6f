//! Scenario 2: Repeated payment failure.
//!
//! One firing of `payment.failed` after a third failed attempt. The
//! high-priority ops-alert rule opens a ticket but its webhook action is
//! misconfigured (no `url` parameter), so the rule reports partial
//! failure while the ticket side effect stands — nothing is rolled back.
//! The lower-priority notification rule is unaffected.

use serde_json::json;

use relay_contracts::{context::TriggerContext, error::RelayResult, rule::RuleId};
use relay_engine::FireOptions;

use super::{billing_engine, print_outcomes};

/// Run Scenario 2: Repeated payment failure.
pub fn run_scenario() -> RelayResult<()> {
    println!("=== Scenario 2: Repeated payment failure ===");
    println!();

    let (engine, _store, telemetry, effects) = billing_engine()?;

    let ctx = TriggerContext::new()
        .with("client_email", json!("finance@example.test"))
        .with("attempts", json!(3))
        .with("amount", json!(89.9));

    println!("Firing payment.failed after the third attempt:");
    let report = engine.fire("payment.failed", &ctx, FireOptions::live())?;
    print_outcomes(&report);
    println!();

    println!("Side effects performed (the ticket stands despite the failed webhook):");
    for effect in effects.entries() {
        println!("    {} — {}", effect.action, effect.detail);
    }
    println!();

    let ops_alert = RuleId::new("payment-failed-ops-alert");
    let notify = RuleId::new("payment-failed-notify");
    println!("Telemetry:");
    println!(
        "    {}: executions = {}, success rate = {}%",
        ops_alert,
        telemetry.execution_count(&ops_alert),
        telemetry.success_rate(&ops_alert),
    );
    println!(
        "    {}: executions = {}, success rate = {}%",
        notify,
        telemetry.execution_count(&notify),
        telemetry.success_rate(&notify),
    );

    let stats = telemetry.statistics(None, None);
    println!(
        "    overall: {} evaluation(s), {} failed, success rate {}%",
        stats.total, stats.failed, stats.success_rate
    );
    println!();

    Ok(())
}
