//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

use eventhub_core::catalog::CategoryFilter;

/// Browse the eventhub catalog through the local cache.
#[derive(Debug, Parser)]
#[command(name = "eventhub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List a catalog page, falling back to the cache when offline.
    Events {
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Case-insensitive title search.
        #[arg(long, short)]
        query: Option<String>,
        /// Category name, or "All".
        #[arg(long, short, default_value = "All")]
        category: CategoryFilter,
    },
    /// Show the detail of one event.
    Event {
        /// Event ID.
        id: String,
    },
    /// List favorited events from the cache.
    Favorites,
    /// Flip the favorite flag of a cached event.
    Toggle {
        /// Event ID.
        id: String,
    },
    /// Buy tickets for an event.
    Checkout {
        /// Event ID.
        id: String,
        /// Number of tickets (1-10).
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        /// Buyer name.
        #[arg(long)]
        name: String,
        /// Buyer email.
        #[arg(long)]
        email: String,
    },
    /// Remove stale, non-favorited events from the cache.
    Evict,
    /// Remove every cached event.
    Clear,
}
