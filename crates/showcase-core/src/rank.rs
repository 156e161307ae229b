//! Repository ranking.
//!
//! One rank pass:
//!
//! 1. Drop forks, archived repositories, and meta repositories (names
//!    starting with `.` or equal to the owner's login).
//! 2. Extract signals, score, and classify each survivor.
//! 3. Sort by score (desc), stars (desc), updated_at (desc, unknown last).
//! 4. Truncate to `limit`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use crate::focus::{classify_focus, Focus};
use crate::merge::dedup_tags;
use crate::models::{ProjectCard, RepositoryRecord};
use crate::score::{score_breakdown, ScoreBreakdown};
use crate::signals::{extract_signals, SignalPair, Vocabulary};

/// Bundles all inputs for a single rank pass.
#[derive(Debug, Clone)]
pub struct RankRequest<'a> {
    /// Account login; a repository with the same name is a profile repo.
    pub owner: &'a str,
    /// Maximum number of ranked repositories to keep.
    pub limit: usize,
    /// Keyword vocabularies and language sets.
    pub vocabulary: &'a Vocabulary,
    /// The instant recency is measured against.
    pub now: DateTime<Utc>,
    /// If true, populate [`RankedRepository::explain`].
    pub explain: bool,
}

/// A repository with its score, focus, and signals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRepository {
    #[serde(flatten)]
    pub repository: RepositoryRecord,
    pub score: f64,
    pub focus: Focus,
    pub signals: SignalPair,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<ScoreBreakdown>,
}

impl RankedRepository {
    /// Render an uncurated repository as a card using its live data.
    pub fn to_card(&self, max_tags: usize) -> ProjectCard {
        let repo = &self.repository;
        let mut tags = Vec::new();
        if let Some(language) = &repo.language {
            tags.push(language.clone());
        }
        tags.extend(repo.topics.iter().cloned());

        ProjectCard {
            name: repo.name.clone(),
            description: repo.trimmed_description().unwrap_or_default().to_string(),
            tags: dedup_tags(tags, max_tags),
            link: repo.html_url.clone(),
            focus_label: self.focus.label().to_string(),
            focus_tone: self.focus,
        }
    }
}

/// Whether a repository is account metadata rather than a project.
pub fn is_meta_repository(name: &str, owner: &str) -> bool {
    name.starts_with('.') || (!owner.is_empty() && name.to_lowercase() == owner.to_lowercase())
}

/// Score and classify a single repository without filtering.
pub fn rank_one(
    repo: RepositoryRecord,
    vocab: &Vocabulary,
    now: DateTime<Utc>,
    explain: bool,
) -> RankedRepository {
    let signals = extract_signals(&repo, vocab);
    let breakdown = score_breakdown(&repo, signals, vocab, now);
    let focus = classify_focus(repo.language.as_deref(), signals, vocab);
    RankedRepository {
        repository: repo,
        score: breakdown.total(),
        focus,
        signals,
        explain: explain.then_some(breakdown),
    }
}

/// Run one rank pass over an account's repositories.
pub fn rank_repositories(
    repos: Vec<RepositoryRecord>,
    req: &RankRequest<'_>,
) -> Vec<RankedRepository> {
    let mut ranked: Vec<RankedRepository> = repos
        .into_iter()
        .filter(|r| !r.fork && !r.archived && !is_meta_repository(&r.name, req.owner))
        .map(|r| rank_one(r, req.vocabulary, req.now, req.explain))
        .collect();

    ranked.sort_by(compare_ranked);
    ranked.truncate(req.limit);
    ranked
}

/// Descending rank order: score, then stars, then most recently updated.
pub fn compare_ranked(a: &RankedRepository, b: &RankedRepository) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then(b.repository.stars.cmp(&a.repository.stars))
        .then(b.repository.updated_at.cmp(&a.repository.updated_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn request(vocab: &Vocabulary, limit: usize) -> RankRequest<'_> {
        RankRequest {
            owner: "octo-dev",
            limit,
            vocabulary: vocab,
            now: now(),
            explain: false,
        }
    }

    fn repo(name: &str, description: Option<&str>, stars: u64, days_ago: i64) -> RepositoryRecord {
        let mut r = RepositoryRecord::named(name);
        r.description = description.map(str::to_string);
        r.stars = stars;
        r.updated_at = Some(now() - Duration::days(days_ago));
        r.html_url = format!("https://github.com/octo-dev/{}", name);
        r
    }

    fn names(ranked: &[RankedRepository]) -> Vec<&str> {
        ranked.iter().map(|r| r.repository.name.as_str()).collect()
    }

    #[test]
    fn test_forks_archived_and_meta_dropped() {
        let vocab = Vocabulary::default();
        let mut fork = repo("forked", Some("A backend api"), 10, 1);
        fork.fork = true;
        let mut archived = repo("old", Some("A backend api"), 10, 1);
        archived.archived = true;
        let repos = vec![
            fork,
            archived,
            repo(".github", Some("profile"), 0, 1),
            repo("Octo-Dev", Some("profile readme"), 0, 1),
            repo("keeper", None, 0, 1),
        ];
        let ranked = rank_repositories(repos, &request(&vocab, 10));
        assert_eq!(names(&ranked), vec!["keeper"]);
        assert!(ranked.iter().all(|r| !r.repository.fork && !r.repository.archived));
    }

    #[test]
    fn test_sorted_by_score_desc() {
        let vocab = Vocabulary::default();
        let repos = vec![
            repo("zzz-empty", None, 0, 400),
            repo("zzz-described", Some("Something worth reading"), 0, 400),
            repo("zzz-backend", Some("Backend service with a postgres database"), 0, 400),
        ];
        let ranked = rank_repositories(repos, &request(&vocab, 10));
        assert_eq!(
            names(&ranked),
            vec!["zzz-backend", "zzz-described", "zzz-empty"]
        );
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_ties_broken_by_stars_then_recency() {
        let vocab = Vocabulary::default();
        // Same recency band and stars above the cap: all three scores tie.
        let repos = vec![
            repo("zzz-older", None, 30, 50),
            repo("zzz-newer", None, 30, 5),
            repo("zzz-popular", None, 40, 90),
        ];
        let ranked = rank_repositories(repos, &request(&vocab, 10));
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[1].score, ranked[2].score);
        assert_eq!(
            names(&ranked),
            vec!["zzz-popular", "zzz-newer", "zzz-older"]
        );
    }

    #[test]
    fn test_unknown_timestamp_sorts_last_among_ties() {
        let vocab = Vocabulary::default();
        let mut unknown = repo("zzz-unknown", None, 0, 0);
        unknown.updated_at = None;
        let repos = vec![unknown, repo("zzz-dated", None, 0, 400)];
        let ranked = rank_repositories(repos, &request(&vocab, 10));
        assert_eq!(names(&ranked), vec!["zzz-dated", "zzz-unknown"]);
    }

    #[test]
    fn test_truncated_to_limit() {
        let vocab = Vocabulary::default();
        let repos = (0..5)
            .map(|i| repo(&format!("zzz-{}", i), None, i, 400))
            .collect();
        let ranked = rank_repositories(repos, &request(&vocab, 3));
        assert_eq!(names(&ranked), vec!["zzz-4", "zzz-3", "zzz-2"]);
    }

    #[test]
    fn test_empty_input() {
        let vocab = Vocabulary::default();
        assert!(rank_repositories(Vec::new(), &request(&vocab, 5)).is_empty());
    }

    #[test]
    fn test_explain_populated_only_on_request() {
        let vocab = Vocabulary::default();
        let repos = vec![repo("zzz", Some("Backend api"), 3, 10)];
        let plain = rank_repositories(repos.clone(), &request(&vocab, 5));
        assert!(plain[0].explain.is_none());

        let mut req = request(&vocab, 5);
        req.explain = true;
        let explained = rank_repositories(repos, &req);
        let breakdown = explained[0].explain.expect("breakdown requested");
        assert!((breakdown.total() - explained[0].score).abs() < 1e-9);
    }

    #[test]
    fn test_focus_ignores_score_and_stars() {
        let vocab = Vocabulary::default();
        let mut a = repo("zzz-a", Some("Kafka worker"), 0, 400);
        a.language = Some("Go".to_string());
        let mut b = a.clone();
        b.name = "zzz-b".to_string();
        b.stars = 500;
        b.updated_at = Some(now());
        let ranked = rank_repositories(vec![a, b], &request(&vocab, 5));
        assert_ne!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[0].focus, ranked[1].focus);
    }

    #[test]
    fn test_meta_repository() {
        assert!(is_meta_repository(".github", "octo"));
        assert!(is_meta_repository("OCTO", "octo"));
        assert!(!is_meta_repository("octo-tools", "octo"));
        assert!(!is_meta_repository("anything", ""));
    }

    #[test]
    fn test_to_card_uses_live_focus() {
        let vocab = Vocabulary::default();
        let mut r = repo("pipeline", Some("  Kafka ETL worker  "), 0, 10);
        r.language = Some("Go".to_string());
        r.topics = vec!["kafka".to_string(), "GO".to_string()];
        let ranked = rank_one(r, &vocab, now(), false);
        let card = ranked.to_card(6);
        assert_eq!(card.name, "pipeline");
        assert_eq!(card.description, "Kafka ETL worker");
        assert_eq!(card.tags, vec!["Go".to_string(), "kafka".to_string()]);
        assert_eq!(card.focus_tone, ranked.focus);
        assert_eq!(card.focus_label, ranked.focus.label());
    }
}
