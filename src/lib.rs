//! trumigrate library crate
//!
//! Core of the `trumigrate` CLI, which applies the token inflation migration
//! to a genesis file. Modules:
//!
//! - `genesis` — typed view of the genesis document.
//! - `migrate` — the migration itself and the pool account table.
//! - `driver` — load, stamp, migrate and persist.
//! - `error` — crate error type.
//!
//! The binary `src/main.rs` calls `trumigrate_lib::run()`.

pub mod driver;
pub mod error;
pub mod genesis;
pub mod migrate;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crate::driver::{DEFAULT_CHAIN_ID, DEFAULT_GENESIS_TIME, FileStore, MigrationArgs, run_migration};
use crate::error::Result;
use crate::migrate::transform;

/// Migrate genesis.json to adjust community tax
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Genesis file to migrate
    input: PathBuf,

    /// Where to write the migrated genesis
    output: PathBuf,

    /// Chain ID stamped onto the migrated genesis
    #[arg(long = "chain-id", default_value = DEFAULT_CHAIN_ID)]
    chain_id: String,

    /// Genesis start time (RFC 3339)
    #[arg(long = "start-time", default_value = DEFAULT_GENESIS_TIME)]
    start_time: String,

    /// Log debug output
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,
}

/// Run the trumigrate CLI.
///
/// Parses arguments, sets up logging on stderr and runs the migration.
/// Failures are printed as `error: ...` and exit the process with status 1.
///
/// ```no_run
/// trumigrate_lib::run(); // called from src/main.rs
/// ```
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = execute(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let args = MigrationArgs::new(cli.chain_id.clone(), &cli.start_time)?;
    let mut store = FileStore::new(cli.input.clone(), cli.output.clone());
    run_migration(&mut store, &args, transform)
}

/// `RUST_LOG` wins over the verbosity flag when set.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
