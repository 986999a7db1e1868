//! # till
//!
//! Prices an order table against the configured promotions.
//!
//! ## Usage
//! ```bash
//! # Summary as text tables, promotions from the default config file
//! till --order ./order.table
//!
//! # Explicit config, JSON output
//! till --order ./order.table --config ./till.toml --format json
//!
//! # Just the final quantity of one product
//! till --order ./order.table --quantity-of Lipstick
//! ```
//!
//! Logs go to stderr (`RUST_LOG` controls the level); the report goes to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use till_cli::config::DEFAULT_LOG_FILTER;
use till_cli::{report, table, CliResult, OutputFormat, TillConfig};

#[derive(Debug, Parser)]
#[command(name = "till")]
#[command(about = "Price an order against the active promotions", long_about = None)]
struct Cli {
    /// Order table (| productName | quantity | unitPrice | category |)
    #[arg(short, long)]
    order: PathBuf,

    /// Promotion config file (TOML). Defaults to the platform config dir.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: text or json. Overrides the config file.
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Print only the final quantity received for this product
    #[arg(long)]
    quantity_of: Option<String>,
}

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = TillConfig::load(cli.config)?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    let engine = config.build_engine();
    let order = engine.process(table::read_order(&cli.order)?);

    match cli.quantity_of {
        Some(name) => {
            let line = order.require_line(&name)?;
            println!("{}", line.effective_quantity());
        }
        None => print!("{}", report::render(&order, config.output.format)?),
    }

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Default: `debug` for till crates (every promotion decision), `info` elsewhere
/// - `RUST_LOG=till=warn` - Only negative totals and config fallbacks
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
