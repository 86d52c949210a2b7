//! Capitol Signals CLI
//!
//! ## Usage
//!
//! ```bash
//! capitol-signals schema
//! capitol-signals ingest data/facts.json
//! capitol-signals tools
//! capitol-signals call top_signals '{"limit": 3}'
//! capitol-signals call ticker_details '{"ticker": "nvda"}'
//! capitol-signals correlations --limit 20
//! ```
//!
//! ## Environment Variables
//!
//! - SIGNALS_DB_PATH - SQLite fact store (default: signals.db), overridden by --db
//! - SIGNALS_WINDOW_DAYS - Correlation window in days (default: 5)
//! - SIGNALS_LISTING_LIMIT - Default row count for `correlations` (default: 50)
//! - RUST_LOG - Logging level (optional, default: info)

use capitol_signals::store::{apply_schema, ingest_file, FactWriter};
use capitol_signals::{SignalsAgent, SignalsConfig, ToolRegistry};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "capitol-signals", about = "Trade disclosures vs. legislative action")]
struct Cli {
    /// SQLite fact store path (overrides SIGNALS_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the fact store schema
    Schema,
    /// Load a JSON fact document into the store
    Ingest { file: PathBuf },
    /// Print the tool descriptions handed to a calling model
    Tools,
    /// Dispatch a tool call and print its JSON result
    Call {
        name: String,
        /// JSON object of arguments (default: {})
        args: Option<String>,
    },
    /// Print the raw correlation view, nearest bill action first
    Correlations {
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SignalsConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    log::debug!("📂 Database: {}", config.db_path.display());

    match cli.command {
        Command::Schema => {
            let writer = FactWriter::open(&config.db_path)?;
            apply_schema(writer.connection())?;
        }
        Command::Ingest { file } => {
            let mut writer = FactWriter::open(&config.db_path)?;
            let report = ingest_file(&mut writer, &file)?;
            print_json(&report)?;
        }
        Command::Tools => {
            print_json(&ToolRegistry::new().describe())?;
        }
        Command::Call { name, args } => {
            let args: serde_json::Value = serde_json::from_str(args.as_deref().unwrap_or("{}"))?;
            let agent = SignalsAgent::from_config(&config);
            let result = ToolRegistry::new().dispatch(&agent, &name, args)?;
            print_json(&result)?;
        }
        Command::Correlations { limit } => {
            let agent = SignalsAgent::from_config(&config);
            print_json(&agent.correlations(limit.unwrap_or(config.listing_limit)))?;
        }
    }

    Ok(())
}
