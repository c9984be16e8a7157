//! rLounge library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Checkin { .. } => cli::commands::checkin::handle(&cli.command, cfg),
        Commands::Checkout { .. } => cli::commands::checkout::handle(&cli.command, cfg),
        Commands::Assign { .. } => cli::commands::assign::handle(&cli.command, cfg),
        Commands::Unqueue { .. } => cli::commands::unqueue::handle(&cli.command, cfg),
        Commands::Status { .. } => cli::commands::status::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Layout { .. } => cli::commands::layout::handle(&cli.command, cfg),
        Commands::Place { .. } => cli::commands::place::handle(&cli.command, cfg),
        Commands::Members { .. } => cli::commands::members::handle(&cli.command, cfg),
    }
}

/// Entry point usato da main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ carica config UNA sola volta
    let mut cfg = Config::load()?;

    // 3️⃣ applica eventuale override della cartella dati da riga di comando
    if let Some(dir) = &cli.data_dir {
        cfg.data_dir = dir.clone();
    }

    // 4️⃣ passa tutto al dispatcher
    dispatch(&cli, &cfg)
}
