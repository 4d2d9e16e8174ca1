use comfy_table::{presets::ASCII_FULL, ContentArrangement, Table};
use serde_json::Value;
use std::str::FromStr;

use crate::context::Record;
use crate::errors::{Result, RumError};
use crate::flatten::{FlattenedRecord, NAME_KEY};
use crate::select::ColumnSet;

/// Output formats understood by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = RumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(RumError::Parse(format!("unknown output format `{other}`"))),
        }
    }
}

/// Text shown in a cell. Strings are unquoted, null is blank.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Header row: `name` followed by the selected columns.
pub fn header(columns: &ColumnSet) -> Vec<String> {
    std::iter::once(NAME_KEY.to_string())
        .chain(columns.iter().map(str::to_string))
        .collect()
}

/// One row per record: its name, then one cell per column (blank when missing).
pub fn rows(records: &[FlattenedRecord], columns: &ColumnSet) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            std::iter::once(NAME_KEY)
                .chain(columns.iter())
                .map(|column| record.get(column).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect()
}

pub fn render_table(records: &[FlattenedRecord], columns: &ColumnSet) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(header(columns));
    for row in rows(records, columns) {
        table.add_row(row);
    }
    table.to_string()
}

pub fn render_csv(records: &[FlattenedRecord], columns: &ColumnSet) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(header(columns))?;
    for row in rows(records, columns) {
        wtr.write_record(&row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| RumError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| RumError::Parse(format!("csv output is not utf-8: {e}")))
}

/// JSON output keeps records unflattened.
pub fn render_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
