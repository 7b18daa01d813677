//! Field presence policy and fragment assembly.
//!
//! Every node declares a key table: which output keys it knows and how
//! strictly each must be present. [`assemble`] walks that table over the
//! candidate values a node computed and produces the final [`Fragment`]:
//!
//! | Policy | Value present | Value absent |
//! |--------|---------------|--------------|
//! | `Required` | emitted | [`NodeError::MissingRequiredField`] |
//! | `Recommended` | emitted | omitted |
//! | `Optional` | emitted | omitted |
//! | `NotAllowed` | dropped | omitted |
//!
//! Candidates for keys outside the table are dropped as well. Keys are
//! emitted in table order.

use crate::error::NodeError;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    Required,
    Recommended,
    Optional,
    NotAllowed,
}

pub type KeyTable = [(&'static str, FieldPolicy)];

/// A finished, JSON-serializable node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fragment(Map<String, Value>);

impl Fragment {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Borrow the `id` value as a string, if present.
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Build a fragment from candidate `(key, value)` pairs.
///
/// `node` names the node type in errors. A `Value::Null` candidate counts as
/// absent.
pub fn assemble(
    node: &'static str,
    table: &KeyTable,
    candidates: Vec<(&'static str, Option<Value>)>,
) -> Result<Fragment, NodeError> {
    let mut out = Map::new();
    for &(key, policy) in table {
        let value = candidates
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| v.as_ref())
            .filter(|v| !v.is_null());
        match (policy, value) {
            (FieldPolicy::NotAllowed, _) => {}
            (FieldPolicy::Required, None) => {
                return Err(NodeError::MissingRequiredField { node, field: key });
            }
            (_, Some(value)) => {
                out.insert(key.to_string(), value.clone());
            }
            (_, None) => {}
        }
    }
    Ok(Fragment(out))
}
