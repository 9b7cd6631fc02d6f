//! Trait seams for the Relay engine.
//!
//! Three traits define the engine's boundary with the hosting application:
//!
//! - `RuleStore`     — where rules live (the admin surface owns writes)
//! - `ActionHandler` — what an action type does (registered at startup)
//! - `TelemetrySink` — where execution history goes
//!
//! The engine depends only on these contracts, never on a specific store,
//! side effect, or telemetry backend.

use std::collections::BTreeMap;

use relay_contracts::{
    context::TriggerContext,
    error::{ActionError, RelayResult},
    record::ExecutionRecord,
    rule::{Rule, RuleId},
};

/// Read access to the rule repository.
///
/// Implementations are backed by whatever persistence the hosting
/// application uses; the engine only needs this read contract. Rules are
/// authored and mutated by the admin surface — during evaluation the engine
/// treats them as read-only.
pub trait RuleStore: Send + Sync {
    /// Active rules for `trigger_event`, sorted by `priority` descending and
    /// by creation order ascending on ties. The ordering is a contract, not
    /// an implementation detail — downstream action sequencing depends on it.
    ///
    /// Returns `RelayError::RuleFetchFailed` when the underlying storage is
    /// unavailable; this is the one error that aborts a firing.
    fn rules_for(&self, trigger_event: &str) -> RelayResult<Vec<Rule>>;

    /// Bulk activate or deactivate rules.
    ///
    /// A pure persistence toggle — the updated `is_active` flag must be
    /// honored by the very next `rules_for()` call, with no caching lag.
    /// Unknown ids are ignored.
    fn set_active(&self, rule_ids: &[RuleId], active: bool) -> RelayResult<()>;
}

/// The capability behind one action type.
///
/// Handlers are registered once at process start by the hosting application
/// (e.g. `send_email`, `apply_credit`, `suspend_service`). The engine ships
/// no side-effecting handlers of its own. Handlers own their timeout
/// discipline; a slow handler blocks only the firing that invoked it.
pub trait ActionHandler: Send + Sync {
    /// Perform the side effect described by `params` for the given context.
    ///
    /// Failures are reported via `Err` and isolated to this action — they
    /// never abort the rule's remaining actions or the rest of the firing.
    /// Side effects are assumed independently idempotent-safe; the engine
    /// neither retries nor rolls back.
    fn execute(
        &self,
        params: &BTreeMap<String, String>,
        context: &TriggerContext,
    ) -> Result<(), ActionError>;
}

/// Destination for execution history.
///
/// The engine writes one `ExecutionRecord` per evaluated rule per live
/// firing (dry runs write nothing). Implementations must support concurrent
/// writes without lost updates — firings for different events may run in
/// parallel.
pub trait TelemetrySink: Send + Sync {
    /// Append one execution record.
    ///
    /// A failed write is logged by the engine and swallowed: telemetry
    /// trouble never fails a firing.
    fn record(&self, record: &ExecutionRecord) -> RelayResult<()>;
}

// Shared handles forward to the inner implementation, so a caller can keep
// an `Arc` for inspection after the engine takes its boxed copy.

impl<T: RuleStore + ?Sized> RuleStore for std::sync::Arc<T> {
    fn rules_for(&self, trigger_event: &str) -> RelayResult<Vec<Rule>> {
        (**self).rules_for(trigger_event)
    }

    fn set_active(&self, rule_ids: &[RuleId], active: bool) -> RelayResult<()> {
        (**self).set_active(rule_ids, active)
    }
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for std::sync::Arc<T> {
    fn record(&self, record: &ExecutionRecord) -> RelayResult<()> {
        (**self).record(record)
    }
}
