//! The Relay orchestrator: one synchronous pass per domain event.
//!
//! A firing walks a fixed pipeline:
//!
//!   FETCH RULES → for each rule: EVALUATE CONDITIONS → (no match: skip)
//!   | (match: EXECUTE ACTIONS → RECORD TELEMETRY) → report
//!
//! The contract guarantee is that `fire()` always returns a structured
//! report: handler failures, unknown operators, and unknown action types
//! degrade into per-action or per-rule failure detail. Only a failed rule
//! fetch aborts the pass — without the candidate list there is nothing
//! safe to evaluate.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use relay_conditions::rule_matches;
use relay_contracts::{
    context::TriggerContext,
    error::RelayResult,
    outcome::{ActionOutcome, FireReport, FiringId, RuleOutcome, TestOutcome},
    record::ExecutionRecord,
    rule::Rule,
    vocabulary::Vocabulary,
};

use crate::{
    dispatch::{dispatch, dispatch_dry},
    registry::ActionRegistry,
    traits::{RuleStore, TelemetrySink},
};

/// Per-firing options. `dry_run` evaluates conditions and reports would-be
/// action outcomes without invoking handlers or touching telemetry.
#[derive(Debug, Clone, Copy, Default)]
pub struct FireOptions {
    pub dry_run: bool,
}

impl FireOptions {
    /// Live firing: handlers run, telemetry is recorded.
    pub fn live() -> Self {
        Self { dry_run: false }
    }

    /// Simulation: no handlers, no telemetry.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

/// The central engine driving rule evaluation for one deployment.
///
/// All collaborators are injected at construction — rule store, action
/// registry, telemetry sink, vocabulary — and the engine itself holds no
/// mutable state, so concurrent `fire()` calls are independent.
pub struct Engine {
    store: Box<dyn RuleStore>,
    registry: ActionRegistry,
    telemetry: Box<dyn TelemetrySink>,
    vocabulary: Vocabulary,
}

impl Engine {
    /// Create an engine with the given collaborators.
    pub fn new(
        store: Box<dyn RuleStore>,
        registry: ActionRegistry,
        telemetry: Box<dyn TelemetrySink>,
        vocabulary: Vocabulary,
    ) -> Self {
        Self {
            store,
            registry,
            telemetry,
            vocabulary,
        }
    }

    /// The trigger/action vocabulary this engine was configured with.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The rule repository, for admin-side reads and `set_active` toggles.
    pub fn store(&self) -> &dyn RuleStore {
        self.store.as_ref()
    }

    /// Process every active rule registered for `trigger_event`.
    ///
    /// Rules arrive from the store already ordered (priority descending,
    /// creation order on ties) and are processed strictly in that order;
    /// within a rule, actions run in declaration order. "No applicable
    /// rule" is a normal empty result, not an error.
    ///
    /// # Errors
    ///
    /// Only `RelayError::RuleFetchFailed`. Everything else — unknown
    /// operators, unknown action types, handler failures, telemetry write
    /// failures — is reported inside the `FireReport`.
    pub fn fire(
        &self,
        trigger_event: &str,
        context: &TriggerContext,
        options: FireOptions,
    ) -> RelayResult<FireReport> {
        let fired_at = Utc::now();
        let firing_id = FiringId::new();

        if !self.vocabulary.has_trigger(trigger_event) {
            warn!(
                trigger = %trigger_event,
                "trigger event is not in the registered vocabulary"
            );
        }

        let rules = self.store.rules_for(trigger_event)?;

        if rules.is_empty() {
            debug!(trigger = %trigger_event, "no active rules for trigger");
            return Ok(FireReport {
                firing_id,
                trigger_event: trigger_event.to_string(),
                dry_run: options.dry_run,
                fired_at,
                rules_evaluated: 0,
                rules_matched: 0,
                rules_executed_successfully: 0,
                outcomes: Vec::new(),
            });
        }

        info!(
            firing_id = %firing_id,
            trigger = %trigger_event,
            candidates = rules.len(),
            dry_run = options.dry_run,
            "processing automation rules"
        );

        let mut outcomes = Vec::with_capacity(rules.len());
        for rule in &rules {
            if rule.actions.is_empty() {
                // Inert rule: nothing would ever execute. Skipped, not an error.
                warn!(rule_id = %rule.id, "rule has no actions; skipping");
                continue;
            }
            outcomes.push(self.run_rule(&firing_id, rule, trigger_event, context, options, fired_at));
        }

        let rules_matched = outcomes.iter().filter(|o| o.matched).count();
        let rules_executed_successfully = outcomes.iter().filter(|o| o.succeeded).count();

        Ok(FireReport {
            firing_id,
            trigger_event: trigger_event.to_string(),
            dry_run: options.dry_run,
            fired_at,
            rules_evaluated: outcomes.len(),
            rules_matched,
            rules_executed_successfully,
            outcomes,
        })
    }

    /// Simulate one rule against admin-supplied test data.
    ///
    /// Shares the condition evaluator with the live path and dry-run
    /// dispatch for the actions; nothing executes and telemetry is
    /// untouched. The returned message is the flash-notification body.
    pub fn test_rule(&self, rule: &Rule, context: &TriggerContext) -> TestOutcome {
        let conditions_met = rule_matches(rule, context);

        if !conditions_met {
            return TestOutcome {
                success: true,
                conditions_met: false,
                message: "Conditions are not met. No actions would be executed.".to_string(),
                actions: Vec::new(),
            };
        }

        let actions: Vec<ActionOutcome> = rule
            .actions
            .iter()
            .map(|action| dispatch_dry(&self.registry, action))
            .collect();

        let unknown: Vec<&str> = actions
            .iter()
            .filter(|a| !a.success)
            .map(|a| a.action.as_str())
            .collect();

        if unknown.is_empty() {
            TestOutcome {
                success: true,
                conditions_met: true,
                message: format!(
                    "Conditions are met. {} action(s) would be executed.",
                    actions.len()
                ),
                actions,
            }
        } else {
            TestOutcome {
                success: false,
                conditions_met: true,
                message: format!(
                    "Conditions are met, but {} action(s) cannot execute: {}",
                    unknown.len(),
                    unknown.join(", ")
                ),
                actions,
            }
        }
    }

    fn run_rule(
        &self,
        firing_id: &FiringId,
        rule: &Rule,
        trigger_event: &str,
        context: &TriggerContext,
        options: FireOptions,
        fired_at: chrono::DateTime<Utc>,
    ) -> RuleOutcome {
        let started = Instant::now();
        let matched = rule_matches(rule, context);

        let mut actions = Vec::new();
        if matched {
            info!(
                rule_id = %rule.id,
                rule_name = %rule.name,
                action_count = rule.actions.len(),
                dry_run = options.dry_run,
                "rule matched; dispatching actions"
            );
            for action in &rule.actions {
                let outcome = if options.dry_run {
                    dispatch_dry(&self.registry, action)
                } else {
                    dispatch(&self.registry, action, context)
                };
                actions.push(outcome);
            }
        } else {
            debug!(rule_id = %rule.id, "rule conditions not met");
        }

        let failed_actions = actions.iter().filter(|a| !a.success).count();
        let succeeded = matched && failed_actions == 0;
        let error = (matched && failed_actions > 0).then(|| {
            format!("{} of {} actions failed", failed_actions, actions.len())
        });

        if succeeded {
            debug!(rule_id = %rule.id, "all actions succeeded");
        } else if let Some(detail) = &error {
            warn!(rule_id = %rule.id, detail = %detail, "rule executed with failures");
        }

        if !options.dry_run {
            let record = ExecutionRecord {
                firing_id: firing_id.clone(),
                rule_id: rule.id.clone(),
                rule_name: rule.name.clone(),
                trigger_event: trigger_event.to_string(),
                context: context.to_value(),
                matched,
                outcomes: actions.clone(),
                success: !matched || succeeded,
                error: error.clone(),
                duration_secs: started.elapsed().as_secs_f64(),
                executed_at: fired_at,
            };
            if let Err(e) = self.telemetry.record(&record) {
                // Telemetry trouble never fails the firing.
                warn!(rule_id = %rule.id, error = %e, "failed to record execution");
            }
        }

        RuleOutcome {
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            matched,
            actions,
            succeeded,
            error,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
