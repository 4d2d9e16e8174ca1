use serde_json::Value;
use std::collections::BTreeMap;

use crate::context::{Context, ContextValue, Record};
use crate::select::SEPARATOR;

/// Key holding the record name in every flattened record.
pub const NAME_KEY: &str = "name";

/// Single-level view of a record: dotted key path -> leaf value.
pub type FlattenedRecord = BTreeMap<String, Value>;

/// Collapse a record's context into dotted key paths, plus `"name"`.
///
/// Only leaves produce keys; `{"a": {"b": {"c": 1}}}` yields `a.b.c` and
/// nothing for `a` or `a.b`. Siblings are visited in sorted order and the
/// last write wins, so a literal `"a.b"` key replaces the path produced by
/// nesting `{"a": {"b": ..}}`. The record name is written last.
pub fn flatten(record: &Record) -> FlattenedRecord {
    let mut out = FlattenedRecord::new();
    if let Some(context) = &record.context {
        flatten_into(context, None, &mut out);
    }
    out.insert(NAME_KEY.to_string(), Value::String(record.name.clone()));
    out
}

/// Flatten every record, preserving order.
pub fn flatten_all(records: &[Record]) -> Vec<FlattenedRecord> {
    records.iter().map(flatten).collect()
}

fn flatten_into(context: &Context, prefix: Option<&str>, out: &mut FlattenedRecord) {
    for (key, value) in context {
        let path = match prefix {
            Some(p) => format!("{p}{SEPARATOR}{key}"),
            None => key.clone(),
        };
        match value {
            ContextValue::Nested(child) => flatten_into(child, Some(&path), out),
            ContextValue::Leaf(leaf) => {
                out.insert(path, leaf.clone());
            }
        }
    }
}
