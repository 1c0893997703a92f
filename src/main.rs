//! task-tracker: interactive CLI for assigning and tracking tasks
//!
//! Users and tasks live in two semicolon-delimited text files in the data
//! directory (`user.txt` and `tasks.txt`), created on first run.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod tracker;

use commands::console::Console;

#[derive(Parser)]
#[command(name = "task-tracker")]
#[command(about = "Interactive task and user tracker", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding user.txt and tasks.txt (default: current directory)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// User store to use instead of <data-dir>/user.txt
    #[arg(long)]
    users_file: Option<PathBuf>,

    /// Task store to use instead of <data-dir>/tasks.txt
    #[arg(long)]
    tasks_file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default; RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let paths = config::Paths::resolve(cli.data_dir, cli.users_file, cli.tasks_file);
    tracing::debug!(?paths, "resolved data files");

    run(&paths)
}

fn run(paths: &config::Paths) -> Result<()> {
    let (users, tasks) = commands::session::open(paths)?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    commands::session::run(&mut console, users, tasks, today)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
