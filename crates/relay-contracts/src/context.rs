//! The trigger context: the ephemeral field/value mapping for one firing.
//!
//! Callers build a `TriggerContext` from whatever domain object caused the
//! event (an invoice, an order, a ticket) and pass it to `Engine::fire()`.
//! The engine never persists it; its lifetime is the single evaluation call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ephemeral mapping from field name to JSON value.
///
/// Values arrive as whatever the caller has — numbers, strings, booleans,
/// date-like strings, nested objects. Conditions address fields by dotted
/// path; see [`TriggerContext::resolve`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerContext {
    fields: serde_json::Map<String, Value>,
}

impl TriggerContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from an iterator of (field, value) pairs.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut ctx = Self::new();
        for (key, value) in pairs {
            ctx.fields.insert(key.into(), value);
        }
        ctx
    }

    /// Build a context from a JSON object. Non-object values yield an
    /// empty context — there is nothing addressable to resolve in them.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::new(),
        }
    }

    /// Insert one field.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Insert one field, builder style.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// True when the context carries no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolve a field path against the context.
    ///
    /// A literal key is tried first, so a flat context entered through the
    /// admin test form may contain dots in field names (`"invoice.total"`
    /// as one key). Failing that, the path is split on `.` and walked
    /// through nested objects. Returns `None` when any segment is missing
    /// or the resolved value is JSON `null`.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(path) {
            if value.is_null() {
                return None;
            }
            return Some(value);
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.fields.get(first)?;
        for segment in segments {
            match current.get(segment) {
                Some(v) => current = v,
                None => return None,
            }
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    /// A JSON snapshot of the full context, for execution records.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
