//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod db;
mod import;
mod init;
mod purge;
mod rules;
mod sentence;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, LoadOptions};

#[derive(Parser)]
#[command(name = "urlsweep")]
#[command(about = "Pattern-based purge utility for crawl URL tracking stores")]
#[command(version)]
pub struct Cli {
    /// Target directory or database file (overrides config file).
    /// Can be a directory containing urlsweep.db or a .db file directly.
    #[arg(long, short = 't', global = true)]
    target: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Show URL store totals
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete never-crawled URLs matching the rules in a rule file
    Purge {
        /// Rule file (TOML)
        rules: PathBuf,

        /// Actually delete; without this flag the run only counts matches
        #[arg(long)]
        confirm: bool,

        /// Only run the named groups (can be given multiple times)
        #[arg(short, long)]
        group: Vec<String>,
    },

    /// Rule file management
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },

    /// Import URLs from a file into the store
    Import {
        /// File containing URLs (one per line)
        #[arg(short, long)]
        file: PathBuf,

        /// Source label to tag imported URLs with
        #[arg(short, long)]
        source: Option<String>,

        /// Skip invalid URLs instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Database management
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },

    /// Call the sentence moderation API
    Sentence {
        #[command(subcommand)]
        command: SentenceCommands,
    },
}

#[derive(Subcommand)]
enum RulesCommands {
    /// Parse a rule file, compile its patterns, and list its groups
    Check {
        /// Rule file (TOML)
        rules: PathBuf,
    },
}

#[derive(Subcommand)]
enum DbCommands {
    /// Run database migrations
    Migrate {
        /// Only check migration status, don't run migrations
        #[arg(long)]
        check: bool,
    },
}

#[derive(Subcommand)]
enum SentenceCommands {
    /// Restore a soft-deleted sentence
    Restore {
        /// Sentence id
        id: String,
        /// API base URL (e.g. http://localhost:8000)
        #[arg(short, long, env = "URLSWEEP_API_URL")]
        url: String,
    },
    /// Delete a sentence
    Delete {
        /// Sentence id
        id: String,
        /// API base URL (e.g. http://localhost:8000)
        #[arg(short, long, env = "URLSWEEP_API_URL")]
        url: String,
    },
    /// Mark a sentence as validated
    Validate {
        /// Sentence id
        id: String,
        /// API base URL (e.g. http://localhost:8000)
        #[arg(short, long, env = "URLSWEEP_API_URL")]
        url: String,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(LoadOptions {
        config_path: cli.config,
        target: cli.target,
    });

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Status { json } => status::cmd_status(&settings, json).await,
        Commands::Purge {
            rules,
            confirm,
            group,
        } => purge::cmd_purge(&settings, &rules, confirm, &group).await,
        Commands::Rules { command } => match command {
            RulesCommands::Check { rules } => rules::cmd_rules_check(&rules),
        },
        Commands::Import {
            file,
            source,
            skip_invalid,
        } => import::cmd_import(&settings, &file, source.as_deref(), skip_invalid).await,
        Commands::Db { command } => match command {
            DbCommands::Migrate { check } => db::cmd_migrate(&settings, check).await,
        },
        Commands::Sentence { command } => match command {
            SentenceCommands::Restore { id, url } => sentence::cmd_restore(&url, &id).await,
            SentenceCommands::Delete { id, url } => sentence::cmd_delete(&url, &id).await,
            SentenceCommands::Validate { id, url } => sentence::cmd_validate(&url, &id).await,
        },
    }
}
