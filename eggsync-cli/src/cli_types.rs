//! CLI type definitions: command enum and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "eggsync")]
#[command(about = "Import game-server eggs into a Pterodactyl panel", long_about = None)]
pub(crate) struct Cli {
    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Synchronize local egg files with the panel
    Sync {
        /// Base URL of the panel (env: PTERO_URL)
        #[arg(long)]
        url: Option<String>,

        /// Application API key (env: PTERO_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Show what would be done without making any mutating API calls
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Only import eggs belonging to this nest (exact name match)
        #[arg(long)]
        nest_name: Option<String>,

        /// Path to the egg repository root (default: current directory)
        #[arg(long)]
        repo_root: Option<PathBuf>,
    },

    /// Show the nest taxonomy and which game slugs map into each nest
    Nests,
}
