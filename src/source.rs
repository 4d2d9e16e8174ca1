use serde_json::Value;
use std::io::Read;
use tracing::{debug, info};

use crate::context::Record;
use crate::errors::{Result, RumError};

/// Default cap on emitted records.
pub const DEFAULT_COUNT: usize = 20;

/// Which actions to keep, and how many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFilter {
    /// Action names to keep; empty keeps every action.
    pub names: Vec<String>,
    pub count: usize,
}

impl Default for ActionFilter {
    fn default() -> Self {
        Self { names: Vec::new(), count: DEFAULT_COUNT }
    }
}

impl ActionFilter {
    /// Parse a comma-separated list of action names.
    pub fn parse_names(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn accepts(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.iter().any(|n| n == name)
    }
}

/// Read event attribute maps from `reader`.
///
/// Accepts a JSON array of attribute maps, a search response with a `data`
/// array (each item's `attributes.attributes`, else `attributes`), or one
/// JSON value per line.
pub fn load_events<R: Read>(mut reader: R) -> Result<Vec<Value>> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    let mut events = Vec::new();
    for doc in serde_json::Deserializer::from_str(&input).into_iter::<Value>() {
        let doc = doc.map_err(|e| RumError::Parse(format!("invalid JSON input: {e}")))?;
        unwrap_document(doc, &mut events);
    }
    debug!(events = events.len(), "loaded events");
    Ok(events)
}

fn unwrap_document(doc: Value, out: &mut Vec<Value>) {
    match doc {
        Value::Array(items) => out.extend(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => out.extend(items.into_iter().map(event_attributes)),
            Some(other) => {
                map.insert("data".to_string(), other);
                out.push(Value::Object(map));
            }
            None => out.push(Value::Object(map)),
        },
        other => out.push(other),
    }
}

fn event_attributes(mut item: Value) -> Value {
    let Some(outer) = item.get_mut("attributes").map(Value::take) else {
        return item;
    };
    match outer {
        Value::Object(mut map) => match map.remove("attributes") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                map.insert("attributes".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Convert events to records, keeping matching actions up to the count cap.
pub fn collect_records(events: &[Value], filter: &ActionFilter) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for event in events {
        if records.len() >= filter.count {
            break;
        }
        // Names are checked before the rest of the event is validated.
        match Record::action_name(event)? {
            Some(name) if filter.accepts(name) => {}
            _ => {
                skipped += 1;
                continue;
            }
        }
        if let Some(record) = Record::from_event_attributes(event)? {
            records.push(record);
        }
    }
    info!(records = records.len(), skipped, "collected actions");
    Ok(records)
}
