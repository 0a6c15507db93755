//! WKN: Webknot Numbers, a minimal REPL-based database of integer arrays.
//!
//! ## Usage
//!
//! ```bash
//! # Create (or open) ./.wkn and start the shell
//! wkn new
//!
//! # Use a different database file
//! wkn --db-path /data/numbers.wkn new
//! ```
//!
//! Several shells may run against the same file at once; every command
//! reloads the file under the database lock before it runs.

mod config;
mod repl;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wkn_db::{FileDatabaseStore, Interpreter, StoreConfig};

/// Webknot Numbers (WKN) - a simple number-only database
#[derive(Parser, Debug)]
#[command(name = "wkn")]
#[command(version, about, long_about = "WKN is a minimal REPL-based database that works with integer arrays.")]
struct Args {
    /// Database file (overrides WKN_DB_PATH)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Log at debug level to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new database file if needed and start the REPL
    New,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stdout belongs to the shell; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = config::load_config(args.db_path);

    match args.command {
        Some(Commands::New) => run_shell(config),
        None => {
            println!(
                "Use `wkn new` to create a new database or `wkn --db-path <path> new` to load an existing one."
            );
            Ok(())
        }
    }
}

fn run_shell(config: StoreConfig) -> Result<()> {
    let store = FileDatabaseStore::new(config);
    let path = store.path().display().to_string();

    let created = store
        .ensure_exists()
        .with_context(|| format!("failed to create database file {}", path))?;
    if created {
        println!("Created {} file", path);
    } else {
        println!("{} file already exists. Loading...", path);
    }
    info!(path = %path, "starting shell");

    let mut interpreter = Interpreter::new(store);
    repl::run(&mut interpreter, io::stdin().lock(), io::stdout().lock())
        .context("shell I/O failed")
}
