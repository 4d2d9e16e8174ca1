use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::errors::{Result, RumError};

/// Nested attribute tree attached to a record. Sorted so walks are deterministic.
pub type Context = BTreeMap<String, ContextValue>;

/// A context entry is either another mapping or an opaque leaf.
/// Arrays are leaves; only objects nest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Nested(Context),
    Leaf(Value),
}

impl From<Value> for ContextValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => ContextValue::Nested(context_from_map(map)),
            other => ContextValue::Leaf(other),
        }
    }
}

fn context_from_map(map: Map<String, Value>) -> Context {
    map.into_iter().map(|(k, v)| (k, ContextValue::from(v))).collect()
}

/// One RUM action: its name, the full event attributes and optional context.
///
/// Only `context` is flattened into columns; `attributes` is carried for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub context: Option<Context>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: Map::new(), context: None }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Name of the action carried by an event's attribute map.
    ///
    /// Events without an `action` object are not actions and yield `Ok(None)`.
    pub fn action_name(attrs: &Value) -> Result<Option<&str>> {
        let action = match attrs.get("action") {
            Some(Value::Object(action)) => action,
            _ => return Ok(None),
        };
        match action.get("name") {
            Some(Value::String(name)) => Ok(Some(name.as_str())),
            Some(other) => Err(RumError::InvalidEvent(format!(
                "action name must be a string, got {other}"
            ))),
            None => Err(RumError::InvalidEvent("action has no name".into())),
        }
    }

    /// Build a record from the attribute map of a RUM event.
    ///
    /// An action without a string name, or a `context` that is neither null
    /// nor an object, is rejected.
    pub fn from_event_attributes(attrs: &Value) -> Result<Option<Record>> {
        let Some(name) = Self::action_name(attrs)? else {
            return Ok(None);
        };
        let name = name.to_string();
        let context = match attrs.get("context") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(context_from_map(map.clone())),
            Some(other) => {
                return Err(RumError::InvalidEvent(format!(
                    "context of action `{name}` must be an object, got {other}"
                )))
            }
        };
        let attributes = attrs.as_object().cloned().unwrap_or_default();
        Ok(Some(Record { name, attributes, context }))
    }
}
