//! eggsync CLI
//!
//! Imports game-server egg definitions from a local repository into a
//! Pterodactyl panel, creating the required nests when they don't already
//! exist.

mod cli_types;
mod commands;

use clap::Parser;

use cli_types::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let code = match cli.command {
        Commands::Sync {
            url,
            api_key,
            dry_run,
            nest_name,
            repo_root,
        } => commands::sync::run_sync(url, api_key, dry_run, nest_name, repo_root),
        Commands::Nests => commands::nests::run_nests(),
    };
    std::process::exit(code);
}
