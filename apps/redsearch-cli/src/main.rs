use clap::Parser;
use tracing_subscriber::EnvFilter;

use redsearch_core::config::Config;

mod args;
mod commands;
mod feedback;

use args::{Args, Command};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose { 0 => "warn", 1 => "info", _ => "debug" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    match &args.command {
        Command::Index(index) => commands::run_index(index, &config),
        Command::Search(search) => commands::run_search(search, &config),
    }
}
