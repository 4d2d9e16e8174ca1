pub mod errors;
pub mod context;
pub mod flatten;
pub mod select;
pub mod render;
pub mod source;
pub mod report;

use std::io::Read;

use errors::Result;
use report::ListOptions;

/// Load events from `reader`, keep the requested actions and render them.
pub fn list_actions<R: Read>(reader: R, opts: &ListOptions) -> Result<String> {
    let events = source::load_events(reader)?;
    let records = source::collect_records(&events, &opts.actions)?;
    report::render(&records, opts)
}

/// Re-export the most-used items for callers that only need the core.
pub use context::{Context, ContextValue, Record};
pub use errors::RumError;
pub use flatten::{flatten, flatten_all, FlattenedRecord, NAME_KEY};
pub use render::{rows, OutputFormat};
pub use select::{select_columns, ColumnOrder, ColumnSet, Pattern, Patterns, SEPARATOR};
