//! Error types for the Relay automation engine.
//!
//! Fallible operations across the workspace return `RelayResult<T>`.
//! Only one variant — `RuleFetchFailed` — is allowed to abort a firing;
//! everything else degrades into a structured outcome so one bad rule or
//! action can never block the rest of the batch.

use thiserror::Error;

/// The unified error type for the Relay workspace.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The rule repository could not produce the candidate list.
    ///
    /// This is the one error class permitted to abort `Engine::fire()` —
    /// without the candidate rules there is nothing safe to evaluate.
    #[error("rule fetch failed: {reason}")]
    RuleFetchFailed { reason: String },

    /// A configuration document (rule file, vocabulary) is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The telemetry sink could not persist an execution record.
    ///
    /// The engine logs this and continues; a firing never fails because
    /// its telemetry could not be written.
    #[error("telemetry write failed: {reason}")]
    TelemetryWriteFailed { reason: String },
}

/// Convenience alias used throughout the Relay crates.
pub type RelayResult<T> = Result<T, RelayError>;

/// The failure an action handler reports back to the dispatcher.
///
/// Handler failures are isolated per action: they become a failed
/// `ActionOutcome` and never propagate past the dispatch boundary.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ActionError {
    /// Human-readable description, surfaced in `ActionOutcome::message`.
    pub message: String,
}

impl ActionError {
    /// Construct an action error from any string-like value.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
