use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use showcase_core::focus::Focus;
use showcase_core::merge::normalize_repo_key;
use showcase_core::models::CuratedProject;
use showcase_core::signals::Vocabulary;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub github: GithubConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GithubConfig {
    pub username: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}
fn default_per_page() -> u32 {
    100
}
fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    100
}

/// Optional vocabulary overrides. An omitted list keeps the built-in default.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct VocabularyConfig {
    #[serde(default)]
    pub backend_languages: Option<Vec<String>>,
    #[serde(default)]
    pub data_languages: Option<Vec<String>>,
    #[serde(default)]
    pub backend_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub data_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub frontend_keywords: Option<Vec<String>>,
}

impl VocabularyConfig {
    pub fn to_vocabulary(&self) -> Vocabulary {
        let defaults = Vocabulary::default();
        let pick = |custom: &Option<Vec<String>>, fallback: &[String]| -> Vec<String> {
            custom.clone().unwrap_or_else(|| fallback.to_vec())
        };
        Vocabulary::from_lists(
            &pick(&self.backend_languages, &defaults.backend_languages),
            &pick(&self.data_languages, &defaults.data_languages),
            &pick(&self.backend_keywords, &defaults.backend_keywords),
            &pick(&self.data_keywords, &defaults.data_keywords),
            &pick(&self.frontend_keywords, &defaults.frontend_keywords),
        )
    }
}

/// One `[[projects]]` entry.
#[derive(Debug, Deserialize, Clone)]
pub struct ProjectConfig {
    pub repo_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub display_name: String,
    pub badge: Focus,
    pub description: String,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Config {
    /// The curated list in configured order, with default URLs filled in.
    pub fn curated_projects(&self) -> Vec<CuratedProject> {
        self.projects
            .iter()
            .map(|p| CuratedProject {
                repo_name: p.repo_name.clone(),
                aliases: p.aliases.clone(),
                display_name: p.display_name.clone(),
                badge: p.badge,
                description: p.description.clone(),
                stack: p.stack.clone(),
                url: p
                    .url
                    .clone()
                    .filter(|u| !u.trim().is_empty())
                    .unwrap_or_else(|| {
                        format!("https://github.com/{}/{}", self.github.username, p.repo_name)
                    }),
            })
            .collect()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    // Validate github
    if config.github.username.trim().is_empty() {
        anyhow::bail!("github.username must not be empty");
    }
    if !(1..=100).contains(&config.github.per_page) {
        anyhow::bail!("github.per_page must be in [1, 100]");
    }
    if config.github.timeout_secs == 0 {
        anyhow::bail!("github.timeout_secs must be > 0");
    }

    // Validate ranking
    if config.ranking.limit < 1 {
        anyhow::bail!("ranking.limit must be >= 1");
    }

    // Validate projects
    let mut owners: HashMap<String, &str> = HashMap::new();
    for project in &config.projects {
        if project.repo_name.trim().is_empty() {
            anyhow::bail!("projects.repo_name must not be empty");
        }
        if project.display_name.trim().is_empty() {
            anyhow::bail!(
                "projects.display_name must not be empty (repo '{}')",
                project.repo_name
            );
        }
        let names = std::iter::once(&project.repo_name).chain(project.aliases.iter());
        for name in names {
            let key = normalize_repo_key(name);
            if key.is_empty() {
                continue;
            }
            if let Some(previous) = owners.get(&key) {
                if *previous != project.repo_name.as_str() {
                    anyhow::bail!(
                        "Projects '{}' and '{}' both match repository key '{}'",
                        previous,
                        project.repo_name,
                        key
                    );
                }
            }
            owners.insert(key, project.repo_name.as_str());
        }
    }

    Ok(())
}
