//! # relay-engine
//!
//! The event-condition-action orchestrator for the Relay automation
//! engine.
//!
//! The engine is invoked synchronously by the surrounding business logic
//! whenever a domain event occurs, and by the admin surface's "test rule"
//! simulation. Its collaborators are trait seams — [`traits::RuleStore`],
//! [`traits::ActionHandler`], [`traits::TelemetrySink`] — injected at
//! construction, so the engine itself carries no global or mutable state.

pub mod dispatch;
pub mod engine;
pub mod registry;
pub mod traits;

pub use engine::{Engine, FireOptions};
pub use registry::{ActionRegistry, NoopHandler};
