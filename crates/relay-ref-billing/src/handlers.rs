//! Demo action handlers for the billing reference runtime.
//!
//! In a production deployment these would talk to the mailer, the
//! provisioning layer, and the ticket queue. Here each handler records the
//! side effect it would have performed into a shared [`SideEffectLog`] so
//! scenarios (and tests) can inspect exactly what the engine did.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::info;

use relay_contracts::{context::TriggerContext, error::ActionError};
use relay_engine::{registry::NoopHandler, traits::ActionHandler, ActionRegistry};

/// One side effect a demo handler performed.
#[derive(Debug, Clone)]
pub struct SideEffect {
    pub action: String,
    pub detail: String,
}

/// A shared, thread-safe log of performed side effects.
#[derive(Clone, Default)]
pub struct SideEffectLog {
    inner: Arc<Mutex<Vec<SideEffect>>>,
}

impl SideEffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, action: impl Into<String>, detail: impl Into<String>) {
        let effect = SideEffect {
            action: action.into(),
            detail: detail.into(),
        };
        info!(action = %effect.action, detail = %effect.detail, "side effect performed");
        self.inner.lock().expect("side effect log poisoned").push(effect);
    }

    /// A snapshot of everything performed so far, in order.
    pub fn entries(&self) -> Vec<SideEffect> {
        self.inner.lock().expect("side effect log poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("side effect log poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn require<'p>(params: &'p BTreeMap<String, String>, key: &str) -> Result<&'p str, ActionError> {
    params
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| ActionError::new(format!("missing required parameter '{}'", key)))
}

fn context_str(context: &TriggerContext, field: &str, fallback: &str) -> String {
    context
        .resolve(field)
        .and_then(|v| v.as_str())
        .unwrap_or(fallback)
        .to_string()
}

/// Sends a templated email to the client on the context.
pub struct SendEmailHandler {
    log: SideEffectLog,
}

impl ActionHandler for SendEmailHandler {
    fn execute(
        &self,
        params: &BTreeMap<String, String>,
        context: &TriggerContext,
    ) -> Result<(), ActionError> {
        let template = require(params, "template")?;
        let recipient = context_str(context, "client_email", "client");
        self.log.push(
            "send_email",
            format!("template '{}' to {}", template, recipient),
        );
        Ok(())
    }
}

/// Applies a goodwill credit to the client's account balance.
pub struct ApplyCreditHandler {
    log: SideEffectLog,
}

impl ActionHandler for ApplyCreditHandler {
    fn execute(
        &self,
        params: &BTreeMap<String, String>,
        context: &TriggerContext,
    ) -> Result<(), ActionError> {
        let raw = require(params, "amount")?;
        let amount: f64 = raw
            .parse()
            .map_err(|_| ActionError::new(format!("amount '{}' is not a number", raw)))?;
        let client = context_str(context, "client_email", "client");
        self.log.push("apply_credit", format!("{:.2} credited to {}", amount, client));
        Ok(())
    }
}

/// Suspends the service named by the context.
pub struct SuspendServiceHandler {
    log: SideEffectLog,
}

impl ActionHandler for SuspendServiceHandler {
    fn execute(
        &self,
        _params: &BTreeMap<String, String>,
        context: &TriggerContext,
    ) -> Result<(), ActionError> {
        let service = context_str(context, "service_id", "unknown-service");
        self.log.push("suspend_service", format!("service {}", service));
        Ok(())
    }
}

/// Opens a ticket in the named department.
pub struct CreateTicketHandler {
    log: SideEffectLog,
}

impl ActionHandler for CreateTicketHandler {
    fn execute(
        &self,
        params: &BTreeMap<String, String>,
        _context: &TriggerContext,
    ) -> Result<(), ActionError> {
        let subject = require(params, "subject")?;
        let department = params.get("department").map(String::as_str).unwrap_or("support");
        self.log.push(
            "create_ticket",
            format!("'{}' in {}", subject, department),
        );
        Ok(())
    }
}

/// Posts the context to a configured webhook URL.
pub struct TriggerWebhookHandler {
    log: SideEffectLog,
}

impl ActionHandler for TriggerWebhookHandler {
    fn execute(
        &self,
        params: &BTreeMap<String, String>,
        _context: &TriggerContext,
    ) -> Result<(), ActionError> {
        let url = require(params, "url")?;
        self.log.push("trigger_webhook", format!("POST {}", url));
        Ok(())
    }
}

/// Build the registry the billing scenarios run with.
///
/// Five handlers record into `log`; the remaining vocabulary entries get
/// the engine's no-op handler so every registered action type dispatches.
pub fn billing_registry(log: &SideEffectLog) -> ActionRegistry {
    ActionRegistry::new()
        .with("send_email", Box::new(SendEmailHandler { log: log.clone() }))
        .with("apply_credit", Box::new(ApplyCreditHandler { log: log.clone() }))
        .with("suspend_service", Box::new(SuspendServiceHandler { log: log.clone() }))
        .with("create_ticket", Box::new(CreateTicketHandler { log: log.clone() }))
        .with("trigger_webhook", Box::new(TriggerWebhookHandler { log: log.clone() }))
        .with("send_sms", Box::new(NoopHandler))
        .with("terminate_service", Box::new(NoopHandler))
        .with("send_notification", Box::new(NoopHandler))
        .with("update_status", Box::new(NoopHandler))
        .with("add_tag", Box::new(NoopHandler))
        .with("remove_tag", Box::new(NoopHandler))
}
