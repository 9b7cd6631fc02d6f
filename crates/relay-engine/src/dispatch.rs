//! Action dispatch: one action in, one structured outcome out.
//!
//! Dispatch never fails the caller. Unknown action types, handler errors,
//! and handler panics are all converted into a failed `ActionOutcome` at
//! this boundary, so partial success within a rule is reported rather than
//! hidden and nothing propagates out of a firing.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, warn};

use relay_contracts::{context::TriggerContext, outcome::ActionOutcome, rule::Action};

use crate::registry::ActionRegistry;

/// Dispatch one action to its registered handler.
pub fn dispatch(
    registry: &ActionRegistry,
    action: &Action,
    context: &TriggerContext,
) -> ActionOutcome {
    let Some(handler) = registry.handler(&action.kind) else {
        warn!(action = %action.kind, "no handler registered for action type");
        return ActionOutcome::failed(&action.kind, unknown_type_message(&action.kind));
    };

    // The handler is application code; a panic must not escape the firing.
    let result = catch_unwind(AssertUnwindSafe(|| {
        handler.execute(&action.params, context)
    }));

    match result {
        Ok(Ok(())) => {
            debug!(action = %action.kind, "action executed");
            ActionOutcome::ok(&action.kind)
        }
        Ok(Err(e)) => {
            warn!(action = %action.kind, error = %e, "action handler reported failure");
            ActionOutcome::failed(&action.kind, e.to_string())
        }
        Err(panic) => {
            let detail = panic_message(&*panic);
            warn!(action = %action.kind, detail = %detail, "action handler panicked");
            ActionOutcome::failed(&action.kind, format!("action handler panicked: {}", detail))
        }
    }
}

/// Dry-run dispatch: report what would execute without invoking handlers.
///
/// A registered type reports success with a "would execute" message; an
/// unregistered type reports the same unknown-type failure as the live
/// path, so test mode surfaces registry drift before going live.
pub fn dispatch_dry(registry: &ActionRegistry, action: &Action) -> ActionOutcome {
    if registry.has(&action.kind) {
        ActionOutcome::ok_with(&action.kind, format!("would execute '{}'", action.kind))
    } else {
        ActionOutcome::failed(&action.kind, unknown_type_message(&action.kind))
    }
}

fn unknown_type_message(kind: &str) -> String {
    format!("unknown action type '{}'", kind)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use relay_contracts::{context::TriggerContext, error::ActionError, rule::Action};

    use crate::registry::{ActionRegistry, NoopHandler};
    use crate::traits::ActionHandler;

    use super::{dispatch, dispatch_dry};

    struct FailingHandler;

    impl ActionHandler for FailingHandler {
        fn execute(
            &self,
            _params: &BTreeMap<String, String>,
            _context: &TriggerContext,
        ) -> Result<(), ActionError> {
            Err(ActionError::new("smtp timeout"))
        }
    }

    struct PanickingHandler;

    impl ActionHandler for PanickingHandler {
        fn execute(
            &self,
            _params: &BTreeMap<String, String>,
            _context: &TriggerContext,
        ) -> Result<(), ActionError> {
            panic!("handler bug");
        }
    }

    fn registry() -> ActionRegistry {
        ActionRegistry::new()
            .with("send_email", Box::new(NoopHandler))
            .with("change_status", Box::new(FailingHandler))
            .with("broken", Box::new(PanickingHandler))
    }

    #[test]
    fn successful_handler_yields_ok_outcome() {
        let outcome = dispatch(&registry(), &Action::new("send_email"), &TriggerContext::new());
        assert!(outcome.success);
        assert_eq!(outcome.action, "send_email");
    }

    #[test]
    fn handler_error_becomes_failed_outcome() {
        let outcome = dispatch(&registry(), &Action::new("change_status"), &TriggerContext::new());
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("smtp timeout"));
    }

    #[test]
    fn unknown_type_becomes_failed_outcome() {
        let outcome = dispatch(&registry(), &Action::new("does_not_exist"), &TriggerContext::new());
        assert!(!outcome.success);
        assert!(outcome.message.unwrap().contains("unknown action type"));
    }

    #[test]
    fn handler_panic_is_caught_at_the_boundary() {
        let outcome = dispatch(&registry(), &Action::new("broken"), &TriggerContext::new());
        assert!(!outcome.success);
        let message = outcome.message.unwrap();
        assert!(message.contains("panicked"));
        assert!(message.contains("handler bug"));
    }

    #[test]
    fn dry_run_never_invokes_handlers() {
        // PanickingHandler would blow up if invoked.
        let outcome = dispatch_dry(&registry(), &Action::new("broken"));
        assert!(outcome.success);
        assert!(outcome.message.unwrap().contains("would execute"));
    }

    #[test]
    fn dry_run_reports_unknown_types() {
        let outcome = dispatch_dry(&registry(), &Action::new("does_not_exist"));
        assert!(!outcome.success);
        assert!(outcome.message.unwrap().contains("unknown action type"));
    }
}
