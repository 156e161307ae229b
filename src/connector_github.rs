//! GitHub repository connector.
//!
//! Lists an account's public repositories through the GitHub REST API and
//! normalizes them into [`RepositoryRecord`]s for the ranking engine.
//!
//! # Configuration
//!
//! ```toml
//! [github]
//! username = "octo-dev"
//! # api_base = "https://api.github.com"   # GitHub Enterprise or a mock
//! per_page = 100
//! timeout_secs = 10
//! ```
//!
//! # Failure policy
//!
//! [`fetch_repositories`] reports failures as a typed [`FetchError`].
//! [`load_live_repositories`] is the fail-soft wrapper used by the CLI: any
//! fetch failure is logged and replaced by an empty list, so project cards
//! degrade to curated content instead of failing the command.
//!
//! Forks and archived repositories are left in the payload; the ranker
//! drops them.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use showcase_core::models::{records_from_json, RepositoryRecord};

use crate::config::GithubConfig;

const USER_AGENT: &str = concat!("repo-showcase/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Why the repository list could not be fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("GitHub API rate limit exceeded (HTTP {0})")]
    RateLimited(u16),

    #[error("GitHub API returned HTTP {0}")]
    Http(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

/// Build the `GET /users/{user}/repos` URL for an account.
pub fn repos_url(github: &GithubConfig) -> String {
    format!(
        "{}/users/{}/repos?sort=updated&per_page={}&type=owner",
        github.api_base.trim_end_matches('/'),
        github.username,
        github.per_page
    )
}

/// Map a non-success status to a [`FetchError`].
pub fn classify_status(status: StatusCode) -> FetchError {
    match status {
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            FetchError::RateLimited(status.as_u16())
        }
        other => FetchError::Http(other.as_u16()),
    }
}

/// Fetch an account's repositories from the GitHub API.
///
/// # Errors
///
/// Returns [`FetchError::RateLimited`] on HTTP 403/429,
/// [`FetchError::Http`] on any other non-success status,
/// [`FetchError::Network`] if the request could not be sent, and
/// [`FetchError::Decode`] if the body is not a JSON array of repositories.
pub async fn fetch_repositories(
    github: &GithubConfig,
) -> std::result::Result<Vec<RepositoryRecord>, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(github.timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;

    let url = repos_url(github);
    tracing::debug!(%url, "fetching repositories");

    let response = client
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .header("X-GitHub-Api-Version", API_VERSION)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(classify_status(status));
    }

    let body = response.text().await?;
    let value: serde_json::Value =
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
    if !value.is_array() {
        return Err(FetchError::Decode("expected a JSON array".to_string()));
    }

    let records = records_from_json(&value);
    tracing::info!(
        count = records.len(),
        user = %github.username,
        "fetched repositories"
    );
    Ok(records)
}

/// Fetch repositories, degrading to an empty list on any failure.
pub async fn load_live_repositories(github: &GithubConfig) -> Vec<RepositoryRecord> {
    match fetch_repositories(github).await {
        Ok(records) => records,
        Err(FetchError::RateLimited(status)) => {
            tracing::warn!(
                status,
                "GitHub API rate limit exceeded; using curated projects only"
            );
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "failed to fetch GitHub repositories; using curated projects only"
            );
            Vec::new()
        }
    }
}

/// Read a GitHub-shaped `repos` JSON payload from disk.
pub fn read_repositories_file(path: &Path) -> Result<Vec<RepositoryRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read repository file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse repository file: {}", path.display()))?;
    if !value.is_array() {
        anyhow::bail!(
            "Repository file {} must contain a JSON array",
            path.display()
        );
    }
    let records = records_from_json(&value);
    tracing::info!(
        count = records.len(),
        path = %path.display(),
        "loaded repositories from file"
    );
    Ok(records)
}
