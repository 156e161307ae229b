//! `showcase cards` and `showcase rank` commands.
//!
//! Both commands load repository data (from the GitHub API or a local
//! `--input` payload), run the core engine, and print the result as text
//! or JSON. The API path is fail-soft; an explicit `--input` file is not.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;

use showcase_core::cards::build_project_cards;
use showcase_core::merge::MAX_TAGS;
use showcase_core::models::{ProjectCard, RepositoryRecord};
use showcase_core::rank::{rank_repositories, RankRequest, RankedRepository};
use showcase_core::score::ScoreBreakdown;

use crate::config::Config;
use crate::connector_github;

/// Options shared by the `cards` and `rank` commands.
#[derive(Debug, Clone, Default)]
pub struct RunOptions<'a> {
    /// Read repositories from this JSON file instead of the API.
    pub input: Option<&'a Path>,
    /// Override `ranking.limit`.
    pub limit: Option<usize>,
    /// Emit JSON instead of text.
    pub json: bool,
    /// RFC 3339 instant to rank against instead of the current time.
    pub as_of: Option<&'a str>,
}

/// Parse `--as-of`, defaulting to the current time.
pub fn resolve_now(as_of: Option<&str>) -> Result<DateTime<Utc>> {
    match as_of {
        Some(ts) => Ok(DateTime::parse_from_rfc3339(ts.trim())
            .with_context(|| format!("Invalid --as-of timestamp '{}': expected RFC 3339", ts))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

async fn load_repositories(
    config: &Config,
    input: Option<&Path>,
) -> Result<Vec<RepositoryRecord>> {
    match input {
        Some(path) => connector_github::read_repositories_file(path),
        None => Ok(connector_github::load_live_repositories(&config.github).await),
    }
}

pub async fn run_cards(config: &Config, opts: &RunOptions<'_>) -> Result<()> {
    let now = resolve_now(opts.as_of)?;
    let raw = load_repositories(config, opts.input).await?;
    let curated = config.curated_projects();
    let vocabulary = config.vocabulary.to_vocabulary();

    let req = RankRequest {
        owner: &config.github.username,
        limit: opts.limit.unwrap_or(config.ranking.limit),
        vocabulary: &vocabulary,
        now,
        explain: false,
    };

    let cards = build_project_cards(&curated, raw, &req);
    tracing::debug!(cards = cards.len(), "built project cards");

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else if cards.is_empty() {
        println!("No curated projects configured.");
    } else {
        print!("{}", render_cards(&cards));
    }

    Ok(())
}

/// Print the ranked live repositories, or with `as_cards`, render them as
/// project cards carrying their live classification.
pub async fn run_rank(
    config: &Config,
    opts: &RunOptions<'_>,
    explain: bool,
    as_cards: bool,
) -> Result<()> {
    let now = resolve_now(opts.as_of)?;
    let raw = load_repositories(config, opts.input).await?;
    let vocabulary = config.vocabulary.to_vocabulary();

    let req = RankRequest {
        owner: &config.github.username,
        limit: opts.limit.unwrap_or(config.ranking.limit),
        vocabulary: &vocabulary,
        now,
        explain,
    };

    let ranked = rank_repositories(raw, &req);

    if as_cards {
        let cards: Vec<ProjectCard> = ranked.iter().map(|r| r.to_card(MAX_TAGS)).collect();
        if opts.json {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        } else if cards.is_empty() {
            println!("No repositories.");
        } else {
            print!("{}", render_cards(&cards));
        }
        return Ok(());
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else if ranked.is_empty() {
        println!("No repositories.");
    } else {
        print!("{}", render_ranked(&ranked));
    }

    Ok(())
}

/// Text rendering of project cards, one block per card.
pub fn render_cards(cards: &[ProjectCard]) -> String {
    let mut out = String::new();
    for (i, card) in cards.iter().enumerate() {
        let _ = writeln!(out, "{}. {} [{}]", i + 1, card.name, card.focus_label);
        let _ = writeln!(out, "   {}", card.description);
        if !card.tags.is_empty() {
            let _ = writeln!(out, "   tags: {}", card.tags.join(", "));
        }
        let _ = writeln!(out, "   {}", card.link);
        out.push('\n');
    }
    out
}

/// Text rendering of ranked repositories as a table.
pub fn render_ranked(ranked: &[RankedRepository]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<36} {:>7} {:<13} {:>5} {:>4} {:>4}",
        "RANK", "NAME", "SCORE", "FOCUS", "STARS", "BE", "DATA"
    );
    for (i, r) in ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<36} {:>7.2} {:<13} {:>5} {:>4} {:>4}",
            i + 1,
            r.repository.name,
            r.score,
            r.focus.as_str(),
            r.repository.stars,
            r.signals.backend_signal,
            r.signals.data_signal
        );
        if let Some(b) = &r.explain {
            let _ = writeln!(out, "     {}", render_breakdown(b));
        }
    }
    out
}

fn render_breakdown(b: &ScoreBreakdown) -> String {
    format!(
        "description={:+.1} language={:+.1} signals={:+.1} cross_domain={:+.1} frontend={:+.1} stars={:+.1} recency={:+.1}",
        b.description,
        b.language,
        b.signals,
        b.cross_domain,
        b.frontend_penalty,
        b.stars,
        b.recency
    )
}
