//! # Repo Showcase CLI (`showcase`)
//!
//! The `showcase` binary ranks an account's GitHub repositories and merges
//! them onto a curated project list.
//!
//! ## Usage
//!
//! ```bash
//! showcase --config ./config/showcase.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `showcase cards` | Print one project card per curated project |
//! | `showcase rank` | Print the ranked live repositories |
//! | `showcase projects` | List curated projects and their match keys |
//!
//! ## Examples
//!
//! ```bash
//! # Cards from the live API
//! showcase cards --config ./config/showcase.toml
//!
//! # Cards from a saved API response, as JSON
//! showcase cards --input ./repos.json --json
//!
//! # Ranked repositories with a score breakdown, as of a fixed instant
//! showcase rank --explain --as-of 2025-06-01T00:00:00Z
//! ```
//!
//! Diagnostics are written to stderr; set `RUST_LOG=debug` for more.

mod config;
mod connector_github;
mod projects;
mod showcase;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Repo Showcase CLI: rank GitHub repositories and merge them onto a
/// curated project list.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/showcase.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "showcase",
    about = "Repo Showcase: rank GitHub repositories into curated project cards",
    version,
    long_about = "Repo Showcase fetches an account's public repositories, scores and classifies \
    them by backend and data signals, and merges the ranking onto a hand-curated project list \
    to produce display-ready project cards."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/showcase.toml`. The GitHub account, ranking
    /// limit, vocabulary overrides, and curated projects are read from it.
    #[arg(long, global = true, default_value = "./config/showcase.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Build project cards.
    ///
    /// Fetches repositories, ranks them, and merges the ranking onto the
    /// curated projects. Prints exactly one card per curated project, in
    /// configured order. If the API is unavailable, cards fall back to
    /// curated content.
    Cards {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Rank live repositories.
    ///
    /// Drops forks, archived and profile repositories, then prints the
    /// remainder by descending score.
    Rank {
        #[command(flatten)]
        source: SourceArgs,

        /// Show the per-component score breakdown.
        #[arg(long)]
        explain: bool,

        /// Render ranked repositories as project cards with their live focus.
        #[arg(long)]
        cards: bool,
    },

    /// List curated projects.
    ///
    /// Shows each configured project's badge and the normalized names a
    /// live repository must match to enrich it.
    Projects,
}

/// Input and output options shared by `cards` and `rank`.
#[derive(clap::Args)]
struct SourceArgs {
    /// Read repositories from a saved GitHub API JSON response instead of
    /// calling the API.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Maximum number of ranked repositories (overrides `ranking.limit`).
    #[arg(long)]
    limit: Option<usize>,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Rank as of this RFC 3339 instant instead of now.
    #[arg(long)]
    as_of: Option<String>,
}

impl SourceArgs {
    fn options(&self) -> showcase::RunOptions<'_> {
        showcase::RunOptions {
            input: self.input.as_deref(),
            limit: self.limit,
            json: self.json,
            as_of: self.as_of.as_deref(),
        }
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Cards { source } => {
            showcase::run_cards(&cfg, &source.options()).await?;
        }
        Commands::Rank {
            source,
            explain,
            cards,
        } => {
            showcase::run_rank(&cfg, &source.options(), explain, cards).await?;
        }
        Commands::Projects => {
            projects::list_projects(&cfg)?;
        }
    }

    Ok(())
}
