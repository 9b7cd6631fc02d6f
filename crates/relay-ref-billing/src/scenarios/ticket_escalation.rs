//! Scenario 3: SLA breach — test first, then go live, then switch off.
//!
//! Walks the admin workflow around the goodwill-credit rule:
//!
//! 1. "Test rule" simulation with admin-entered test data (dry run — no
//!    handler invoked, no telemetry written).
//! 2. A live `ticket.sla_breached` firing that credits the client.
//! 3. Bulk deactivation via the store; the very next firing skips the rule.

use serde_json::json;

use relay_contracts::{context::TriggerContext, error::RelayResult, rule::RuleId};
use relay_engine::FireOptions;

use super::{billing_engine, print_outcomes, BILLING_RULES};

/// Run Scenario 3: SLA breach escalation lifecycle.
pub fn run_scenario() -> RelayResult<()> {
    println!("=== Scenario 3: SLA breach escalation lifecycle ===");
    println!();

    let (engine, store, telemetry, effects) = billing_engine()?;
    let rule_id = RuleId::new("sla-breach-goodwill-credit");

    // ── Step 1: admin "test rule" simulation ─────────────────────────────────
    let rules = relay_store::load_rules_from_str(BILLING_RULES)?;
    let sla_rule = rules
        .iter()
        .find(|r| r.id == rule_id)
        .expect("billing.toml defines the SLA rule");

    let test_data = TriggerContext::new()
        .with("ticket_priority", json!("high"))
        .with("client_email", json!("ops@example.test"));

    println!("Testing the rule against admin-entered data:");
    let test = engine.test_rule(sla_rule, &test_data);
    println!("    {}", test.message);
    for action in &test.actions {
        println!(
            "        {}: {}",
            action.action,
            action.message.as_deref().unwrap_or("")
        );
    }
    println!(
        "    side effects so far: {}, executions recorded: {}",
        effects.len(),
        telemetry.execution_count(&rule_id)
    );
    println!();

    // ── Step 2: live firing ──────────────────────────────────────────────────
    println!("Firing ticket.sla_breached for a high-priority ticket:");
    let ctx = TriggerContext::new()
        .with("ticket_priority", json!("high"))
        .with("client_email", json!("ops@example.test"));
    let report = engine.fire("ticket.sla_breached", &ctx, FireOptions::live())?;
    print_outcomes(&report);
    println!();

    // ── Step 3: bulk deactivation ────────────────────────────────────────────
    println!("Deactivating the rule and firing again:");
    use relay_engine::traits::RuleStore;
    store.set_active(std::slice::from_ref(&rule_id), false)?;
    let report = engine.fire("ticket.sla_breached", &ctx, FireOptions::live())?;
    print_outcomes(&report);
    println!(
        "    executions recorded for {}: {}",
        rule_id,
        telemetry.execution_count(&rule_id)
    );
    println!();

    Ok(())
}
