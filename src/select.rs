use itertools::Itertools;

use crate::flatten::{FlattenedRecord, NAME_KEY};

/// Joins nested keys; a pattern ending with it matches by prefix.
pub const SEPARATOR: char = '.';

/// A field or filter spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Exact(String),
    Prefix(String),
}

impl Pattern {
    pub fn parse(text: &str) -> Self {
        if text.ends_with(SEPARATOR) {
            Pattern::Prefix(text.to_string())
        } else {
            Pattern::Exact(text.to_string())
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            Pattern::Exact(p) => key == p,
            Pattern::Prefix(p) => key.starts_with(p.as_str()),
        }
    }
}

/// Ordered list of patterns, as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patterns(Vec<Pattern>);

impl Patterns {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self(patterns)
    }

    /// Parse a comma-separated list. Blank items are dropped, so `""` is empty.
    pub fn parse(list: &str) -> Self {
        Self(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Pattern::parse)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.0.iter()
    }

    pub fn matches_any(&self, key: &str) -> bool {
        self.iter().any(|p| p.matches(key))
    }
}

/// How the column set is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnOrder {
    /// First occurrence across records, keys sorted within a record.
    #[default]
    FirstSeen,
    /// Lexicographic.
    Sorted,
}

/// Distinct column names, in display order. Never includes `"name"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet(Vec<String>);

impl ColumnSet {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.iter().any(|c| c == column)
    }
}

/// Whether a key is displayed. Filters are checked first and win over fields;
/// with no fields every key that survives the filters is kept.
pub fn is_selected(key: &str, fields: &Patterns, filters: &Patterns) -> bool {
    if key == NAME_KEY || filters.matches_any(key) {
        return false;
    }
    fields.is_empty() || fields.matches_any(key)
}

/// Compute the columns to display for `records`.
pub fn select_columns(
    records: &[FlattenedRecord],
    fields: &Patterns,
    filters: &Patterns,
    order: ColumnOrder,
) -> ColumnSet {
    let selected = records
        .iter()
        .flat_map(|r| r.keys())
        .filter(|key| is_selected(key, fields, filters))
        .unique();

    let mut columns: Vec<String> = selected.cloned().collect();
    if order == ColumnOrder::Sorted {
        columns.sort();
    }
    tracing::debug!(columns = columns.len(), records = records.len(), "selected columns");
    ColumnSet(columns)
}
