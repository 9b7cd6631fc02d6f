//! The action registry: explicit string-key → handler dispatch.
//!
//! Dynamic dispatch by action type is deliberately an explicit map populated
//! at startup — not reflection, not convention-based name lookup — which
//! eliminates the unknown-function-at-runtime failure class. An action type
//! that was never registered produces a structured failed outcome, nothing
//! more.

use std::collections::{BTreeMap, HashMap};

use relay_contracts::{context::TriggerContext, error::ActionError};

use crate::traits::ActionHandler;

/// A process-wide mapping from action type name to its handler.
///
/// Built once by the hosting application and handed to the engine at
/// construction. Registering the same type twice replaces the previous
/// handler.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, Box<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `kind`.
    pub fn register(&mut self, kind: impl Into<String>, handler: Box<dyn ActionHandler>) {
        self.handlers.insert(kind.into(), handler);
    }

    /// Register, builder style.
    pub fn with(mut self, kind: impl Into<String>, handler: Box<dyn ActionHandler>) -> Self {
        self.register(kind, handler);
        self
    }

    /// True when a handler is registered for `kind`.
    pub fn has(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// The handler for `kind`, if registered.
    pub fn handler(&self, kind: &str) -> Option<&dyn ActionHandler> {
        self.handlers.get(kind).map(|h| h.as_ref())
    }

    /// All registered action type names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// A handler that does nothing and always succeeds.
///
/// The only handler the engine ships. Useful as a placeholder while wiring
/// a deployment and in tests that only care about dispatch mechanics.
pub struct NoopHandler;

impl ActionHandler for NoopHandler {
    fn execute(
        &self,
        _params: &BTreeMap<String, String>,
        _context: &TriggerContext,
    ) -> Result<(), ActionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionRegistry, NoopHandler};

    #[test]
    fn register_and_lookup() {
        let registry = ActionRegistry::new().with("send_email", Box::new(NoopHandler));
        assert!(registry.has("send_email"));
        assert!(!registry.has("send_sms"));
        assert!(registry.handler("send_email").is_some());
        assert!(registry.handler("send_sms").is_none());
    }

    #[test]
    fn re_registration_replaces() {
        let mut registry = ActionRegistry::new();
        registry.register("send_email", Box::new(NoopHandler));
        registry.register("send_email", Box::new(NoopHandler));
        assert_eq!(registry.kinds(), vec!["send_email"]);
    }

    #[test]
    fn kinds_are_sorted() {
        let registry = ActionRegistry::new()
            .with("suspend_service", Box::new(NoopHandler))
            .with("apply_credit", Box::new(NoopHandler));
        assert_eq!(registry.kinds(), vec!["apply_credit", "suspend_service"]);
    }
}
