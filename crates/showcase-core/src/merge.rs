//! Curated merge.
//!
//! The curated list is the spine of the output: every curated project
//! yields exactly one card, in configured order. Live ranked data only
//! enriches a card when a repository matches the project's normalized
//! name or one of its aliases.

use std::collections::HashSet;

use crate::models::{CuratedProject, ProjectCard};
use crate::rank::RankedRepository;

/// Maximum number of tags on a card.
pub const MAX_TAGS: usize = 6;

/// Normalize a repository name for identity matching: keep only ASCII
/// letters and digits, lower-cased, so `My-Repo`, `my_repo`, and `MYREPO`
/// all compare equal.
pub fn normalize_repo_key(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl CuratedProject {
    /// Normalized canonical name followed by normalized aliases, deduplicated.
    pub fn match_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for name in std::iter::once(&self.repo_name).chain(self.aliases.iter()) {
            let key = normalize_repo_key(name);
            if !key.is_empty() && !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

/// The first live repository, in ranked order, that matches `project`.
pub fn find_live_match<'a>(
    project: &CuratedProject,
    ranked: &'a [RankedRepository],
) -> Option<&'a RankedRepository> {
    let keys = project.match_keys();
    ranked
        .iter()
        .find(|r| keys.contains(&normalize_repo_key(&r.repository.name)))
}

/// Drop blank and case-insensitively repeated tags, keeping first-seen
/// order, and cap the result at `max_tags`.
pub fn dedup_tags<I>(tags: I, max_tags: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for tag in tags {
        if out.len() >= max_tags {
            break;
        }
        let tag = tag.trim().to_string();
        if tag.is_empty() {
            continue;
        }
        if seen.insert(tag.to_lowercase()) {
            out.push(tag);
        }
    }
    out
}

/// Build the card for one curated project, enriched by its live match.
pub fn merge_project(project: &CuratedProject, live: Option<&RankedRepository>) -> ProjectCard {
    let repo = live.map(|r| &r.repository);

    let description = repo
        .and_then(|r| r.trimmed_description())
        .map(str::to_string)
        .unwrap_or_else(|| project.description.clone());

    let mut tags: Vec<String> = project.stack.clone();
    if let Some(repo) = repo {
        tags.extend(repo.language.iter().cloned());
        tags.extend(repo.topics.iter().cloned());
    }

    let link = repo
        .map(|r| r.html_url.trim())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| project.url.clone());

    ProjectCard {
        name: project.display_name.clone(),
        description,
        tags: dedup_tags(tags, MAX_TAGS),
        link,
        focus_label: project.badge.label().to_string(),
        focus_tone: project.badge,
    }
}

/// Merge the curated list with ranked live data, one card per curated
/// project in curated order.
pub fn merge_curated(curated: &[CuratedProject], ranked: &[RankedRepository]) -> Vec<ProjectCard> {
    curated
        .iter()
        .map(|project| merge_project(project, find_live_match(project, ranked)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::Focus;
    use crate::models::RepositoryRecord;
    use crate::signals::SignalPair;

    fn project(
        repo_name: &str,
        aliases: &[&str],
        badge: Focus,
        stack: &[&str],
    ) -> CuratedProject {
        CuratedProject {
            repo_name: repo_name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            display_name: format!("{} (curated)", repo_name),
            badge,
            description: format!("Curated description of {}", repo_name),
            stack: stack.iter().map(|s| s.to_string()).collect(),
            url: format!("https://example.com/curated/{}", repo_name),
        }
    }

    fn live(
        name: &str,
        description: Option<&str>,
        language: Option<&str>,
        topics: &[&str],
    ) -> RankedRepository {
        let mut repo = RepositoryRecord::named(name);
        repo.description = description.map(str::to_string);
        repo.language = language.map(str::to_string);
        repo.topics = topics.iter().map(|t| t.to_string()).collect();
        repo.html_url = format!("https://github.com/octo-dev/{}", name);
        RankedRepository {
            repository: repo,
            score: 0.0,
            focus: Focus::General,
            signals: SignalPair::default(),
            explain: None,
        }
    }

    #[test]
    fn test_normalize_repo_key() {
        assert_eq!(normalize_repo_key("My-Repo"), "myrepo");
        assert_eq!(normalize_repo_key("my_repo"), "myrepo");
        assert_eq!(normalize_repo_key("MYREPO"), "myrepo");
        assert_eq!(
            normalize_repo_key("Part_5_Advanced_Statistical_Methods_-Machine_Learning-"),
            "part5advancedstatisticalmethodsmachinelearning"
        );
        assert_eq!(normalize_repo_key("---"), "");
        assert_eq!(normalize_repo_key("Café-Bot"), "cafbot");
    }

    #[test]
    fn test_matching_is_case_and_punctuation_insensitive() {
        let p = project("My-Repo", &[], Focus::Backend, &[]);
        for name in ["my_repo", "MYREPO", "my.repo"] {
            let ranked = vec![live(name, None, None, &[])];
            assert!(find_live_match(&p, &ranked).is_some(), "{} should match", name);
        }
        let ranked = vec![live("my-repo-2", None, None, &[])];
        assert!(find_live_match(&p, &ranked).is_none());
    }

    #[test]
    fn test_alias_match() {
        let p = project("bizhandle", &["MoniDesk"], Focus::Backend, &[]);
        let ranked = vec![
            live("other", None, None, &[]),
            live("moni-desk", None, None, &[]),
        ];
        let found = find_live_match(&p, &ranked).expect("alias should match");
        assert_eq!(found.repository.name, "moni-desk");
    }

    #[test]
    fn test_first_match_in_ranked_order_wins() {
        let p = project("tool", &["tool-v2"], Focus::General, &[]);
        let ranked = vec![
            live("Tool_V2", Some("first"), None, &[]),
            live("tool", Some("second"), None, &[]),
        ];
        let cards = merge_curated(&[p], &ranked);
        assert_eq!(cards[0].description, "first");
    }

    #[test]
    fn test_craveseat_scenario() {
        let p = project("craveseat", &[], Focus::Backend, &["Python", "FastAPI"]);
        let mut r = live(
            "craveseat",
            Some("A food platform backend"),
            Some("Python"),
            &["fastapi", "postgresql"],
        );
        r.focus = Focus::Data;
        let cards = merge_curated(&[p], &[r]);
        let card = &cards[0];
        assert_eq!(card.focus_tone, Focus::Backend);
        assert_eq!(card.focus_label, "Backend Focus");
        assert_eq!(card.description, "A food platform backend");
        assert_eq!(
            card.tags,
            vec!["Python".to_string(), "FastAPI".to_string(), "postgresql".to_string()]
        );
        assert_eq!(card.link, "https://github.com/octo-dev/craveseat");
    }

    #[test]
    fn test_curated_fallback_without_match() {
        let p = project("ghost", &[], Focus::Data, &["Pandas"]);
        let cards = merge_curated(std::slice::from_ref(&p), &[]);
        let card = &cards[0];
        assert_eq!(card.name, p.display_name);
        assert_eq!(card.description, p.description);
        assert_eq!(card.link, p.url);
        assert_eq!(card.tags, vec!["Pandas".to_string()]);
        assert_eq!(card.focus_tone, Focus::Data);
    }

    #[test]
    fn test_blank_live_description_falls_back() {
        let p = project("thin", &[], Focus::General, &[]);
        let ranked = vec![live("thin", Some("   "), None, &[])];
        let cards = merge_curated(std::slice::from_ref(&p), &ranked);
        assert_eq!(cards[0].description, p.description);
        assert_eq!(cards[0].link, "https://github.com/octo-dev/thin");
    }

    #[test]
    fn test_blank_live_url_falls_back() {
        let p = project("nourl", &[], Focus::General, &[]);
        let mut r = live("nourl", None, None, &[]);
        r.repository.html_url = String::new();
        let cards = merge_curated(std::slice::from_ref(&p), &[r]);
        assert_eq!(cards[0].link, p.url);
    }

    #[test]
    fn test_output_mirrors_curated_order_and_length() {
        let curated = vec![
            project("c", &[], Focus::General, &[]),
            project("a", &[], Focus::Backend, &[]),
            project("b", &[], Focus::Data, &[]),
        ];
        let ranked = vec![
            live("a", Some("live a"), None, &[]),
            live("b", Some("live b"), None, &[]),
            live("uncurated", Some("extra"), None, &[]),
        ];
        let cards = merge_curated(&curated, &ranked);
        assert_eq!(cards.len(), curated.len());
        let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["c (curated)", "a (curated)", "b (curated)"]);
        assert!(cards.iter().all(|c| c.description != "extra"));
    }

    #[test]
    fn test_tags_capped_and_deduplicated() {
        let p = project(
            "stacked",
            &[],
            Focus::Backend,
            &["Python", "FastAPI", "PostgreSQL", "python"],
        );
        let r = live(
            "stacked",
            None,
            Some("PYTHON"),
            &["fastapi", "redis", "docker", "kafka", "celery"],
        );
        let cards = merge_curated(&[p], &[r]);
        let tags = &cards[0].tags;
        assert_eq!(
            tags,
            &vec![
                "Python".to_string(),
                "FastAPI".to_string(),
                "PostgreSQL".to_string(),
                "redis".to_string(),
                "docker".to_string(),
                "kafka".to_string(),
            ]
        );
        let lowered: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
        assert_eq!(lowered.len(), tags.len());
        assert!(tags.len() <= MAX_TAGS);
    }

    #[test]
    fn test_dedup_tags_drops_blanks() {
        let tags = dedup_tags(
            vec!["".to_string(), " Rust ".to_string(), "rust".to_string()],
            MAX_TAGS,
        );
        assert_eq!(tags, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_match_keys_deduplicated() {
        let p = project(
            "polymarket_copy_bot",
            &["polymarketcopybot", ""],
            Focus::Backend,
            &[],
        );
        assert_eq!(p.match_keys(), vec!["polymarketcopybot".to_string()]);
    }
}
