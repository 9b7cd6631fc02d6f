//! # relay-ref-billing
//!
//! Billing reference runtime for the Relay automation engine.
//!
//! Provides the production billing vocabulary, a set of demo action
//! handlers that record their side effects for inspection, and three
//! runnable scenarios wiring real Relay components end to end. The demo
//! CLI drives the scenarios.

pub mod handlers;
pub mod scenarios;
pub mod vocabulary;

pub use vocabulary::billing_vocabulary;
