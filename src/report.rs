use crate::context::Record;
use crate::errors::Result;
use crate::flatten::flatten_all;
use crate::render::{render_csv, render_json, render_table, OutputFormat};
use crate::select::{select_columns, ColumnOrder, Patterns};
use crate::source::ActionFilter;

/// Everything a listing run needs besides the events themselves.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub actions: ActionFilter,
    /// Columns to include; empty includes all.
    pub fields: Patterns,
    /// Columns to remove; checked before `fields`.
    pub filters: Patterns,
    pub output: OutputFormat,
    pub column_order: ColumnOrder,
}

/// Render `records` in the requested format.
///
/// JSON keeps the nested records; table and CSV go through
/// flatten -> select_columns -> rows.
pub fn render(records: &[Record], opts: &ListOptions) -> Result<String> {
    if opts.output == OutputFormat::Json {
        return render_json(records);
    }
    let flat = flatten_all(records);
    let columns = select_columns(&flat, &opts.fields, &opts.filters, opts.column_order);
    match opts.output {
        OutputFormat::Csv => render_csv(&flat, &columns),
        _ => Ok(render_table(&flat, &columns)),
    }
}
