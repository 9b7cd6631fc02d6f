//! # relay-store
//!
//! Rule repositories for the Relay automation engine.
//!
//! [`memory::InMemoryRuleStore`] is the reference `RuleStore`
//! implementation; [`file`] loads rule sets from TOML documents into it.
//! Deployments with database-backed rules implement
//! `relay_engine::traits::RuleStore` against their own storage — the
//! engine depends only on that read contract.

pub mod file;
pub mod memory;

pub use file::{load_rules_from_file, load_rules_from_str};
pub use memory::InMemoryRuleStore;
