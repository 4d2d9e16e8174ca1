use clap::Parser;
use rum_actions::report::ListOptions;
use rum_actions::source::{ActionFilter, DEFAULT_COUNT};
use rum_actions::{list_actions, ColumnOrder, OutputFormat, Patterns};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// List RUM actions from a saved event search.
///
/// Table and CSV output turn each action's `context` into columns named by
/// dotted key path. JSON output prints the actions unflattened.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Events file (JSON array, search response or JSON lines). Reads stdin when absent or `-`.
    input: Option<PathBuf>,
    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table")]
    output: OutputFormat,
    /// Write output to this file instead of stdout
    #[arg(short = 'f', long)]
    output_file: Option<PathBuf>,
    /// Comma-separated action names to keep
    #[arg(short, long, default_value = "")]
    action: String,
    /// Comma-separated fields to include, default: all. A trailing `.` matches by prefix
    #[arg(long, default_value = "")]
    fields: String,
    /// Comma-separated fields to remove from output. A trailing `.` matches by prefix
    #[arg(long, default_value = "")]
    filter: String,
    /// Number of results to return
    #[arg(short, long, default_value_t = DEFAULT_COUNT)]
    count: usize,
    /// Sort columns alphabetically instead of first-seen order
    #[arg(long)]
    sort_columns: bool,
}

impl Args {
    fn options(&self) -> ListOptions {
        ListOptions {
            actions: ActionFilter {
                names: ActionFilter::parse_names(&self.action),
                count: self.count,
            },
            fields: Patterns::parse(&self.fields),
            filters: Patterns::parse(&self.filter),
            output: self.output,
            column_order: if self.sort_columns {
                ColumnOrder::Sorted
            } else {
                ColumnOrder::FirstSeen
            },
        }
    }

    fn reader(&self) -> io::Result<Box<dyn Read>> {
        match self.input.as_deref() {
            Some(path) if path.as_os_str() != "-" => Ok(Box::new(File::open(path)?)),
            _ => Ok(Box::new(io::stdin().lock())),
        }
    }
}

fn main() {
    // Logs go to stderr so stdout only carries the rendered output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let args = Args::parse();
    let opts = args.options();
    tracing::debug!(?opts, "listing actions");

    let reader = match args.reader() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("could not open input: {e}");
            std::process::exit(1);
        }
    };

    let out = match list_actions(reader, &opts) {
        Ok(out) => out,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    match &args.output_file {
        Some(path) => {
            if let Err(e) = std::fs::write(path, out + "\n") {
                tracing::error!("could not write {}: {e}", path.display());
                std::process::exit(1);
            }
        }
        None => println!("{out}"),
    }
}
