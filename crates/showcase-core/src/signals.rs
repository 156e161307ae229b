//! Keyword and language signal extraction.
//!
//! A repository's backend and data signals are weighted keyword counts over
//! three lower-cased text blobs:
//!
//! | Blob | Weight |
//! |------|--------|
//! | description | ×3 |
//! | topics (space-joined) | ×2 |
//! | name | ×1 |
//!
//! A keyword counts once per blob when it appears anywhere in it as a
//! substring, so `"postgresql"` matches both `postgres` and `postgresql`.
//! A language bonus of +4 is then added to each signal independently.

use serde::Serialize;

use crate::models::RepositoryRecord;

/// Flat bonus added to a signal when the primary language belongs to its set.
pub const LANGUAGE_BONUS: u32 = 4;

const DESCRIPTION_WEIGHT: u32 = 3;
const TOPICS_WEIGHT: u32 = 2;
const NAME_WEIGHT: u32 = 1;

const BACKEND_LANGUAGES: &[&str] = &[
    "python",
    "typescript",
    "javascript",
    "go",
    "rust",
    "java",
    "c#",
    "php",
    "kotlin",
];

const DATA_LANGUAGES: &[&str] = &["python", "r", "jupyter notebook", "matlab"];

const BACKEND_KEYWORDS: &[&str] = &[
    "api",
    "backend",
    "server",
    "service",
    "microservice",
    "worker",
    "pipeline",
    "queue",
    "database",
    "postgres",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "kafka",
    "rabbitmq",
    "docker",
    "kubernetes",
    "auth",
    "oauth",
    "jwt",
    "fastapi",
    "django",
    "flask",
    "express",
    "nestjs",
    "node",
    "golang",
    "websocket",
    "web3",
    "graphql",
    "etl",
];

const DATA_KEYWORDS: &[&str] = &[
    "data",
    "data-science",
    "datascience",
    "machine-learning",
    "machine learning",
    "ml",
    "ai",
    "analytics",
    "prediction",
    "forecast",
    "model",
    "regression",
    "classification",
    "clustering",
    "nlp",
    "computer-vision",
    "pandas",
    "numpy",
    "scikit",
    "sklearn",
    "tensorflow",
    "pytorch",
    "xgboost",
    "notebook",
    "jupyter",
    "spark",
    "airflow",
    "dbt",
    "warehouse",
    "timeseries",
    "statistics",
];

const FRONTEND_KEYWORDS: &[&str] = &[
    "ui",
    "frontend",
    "landing",
    "portfolio",
    "template",
    "css",
    "tailwind",
    "design",
];

/// The keyword vocabularies and language sets used for one rank pass.
///
/// All entries are matched against lower-cased text, so they must be
/// lower-case themselves. [`Vocabulary::from_lists`] takes care of that.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    pub backend_languages: Vec<String>,
    pub data_languages: Vec<String>,
    pub backend_keywords: Vec<String>,
    pub data_keywords: Vec<String>,
    pub frontend_keywords: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            backend_languages: owned(BACKEND_LANGUAGES),
            data_languages: owned(DATA_LANGUAGES),
            backend_keywords: owned(BACKEND_KEYWORDS),
            data_keywords: owned(DATA_KEYWORDS),
            frontend_keywords: owned(FRONTEND_KEYWORDS),
        }
    }
}

impl Vocabulary {
    /// Build a vocabulary from arbitrary lists, lower-casing and trimming
    /// every entry and dropping blanks.
    pub fn from_lists(
        backend_languages: &[String],
        data_languages: &[String],
        backend_keywords: &[String],
        data_keywords: &[String],
        frontend_keywords: &[String],
    ) -> Self {
        Self {
            backend_languages: lowered(backend_languages),
            data_languages: lowered(data_languages),
            backend_keywords: lowered(backend_keywords),
            data_keywords: lowered(data_keywords),
            frontend_keywords: lowered(frontend_keywords),
        }
    }

    /// `language_key` must already be lower-cased.
    pub fn is_backend_language(&self, language_key: &str) -> bool {
        !language_key.is_empty() && self.backend_languages.iter().any(|l| l == language_key)
    }

    /// `language_key` must already be lower-cased.
    pub fn is_data_language(&self, language_key: &str) -> bool {
        !language_key.is_empty() && self.data_languages.iter().any(|l| l == language_key)
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn lowered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Backend and data signal strengths for one repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalPair {
    pub backend_signal: u32,
    pub data_signal: u32,
}

impl SignalPair {
    pub fn new(backend_signal: u32, data_signal: u32) -> Self {
        Self {
            backend_signal,
            data_signal,
        }
    }

    pub fn total(&self) -> u32 {
        self.backend_signal + self.data_signal
    }
}

/// Lower-cased text views of a repository used for keyword matching.
#[derive(Debug, Clone)]
pub struct TextBlobs {
    pub name: String,
    pub description: String,
    pub topics: String,
}

impl TextBlobs {
    pub fn of(repo: &RepositoryRecord) -> Self {
        Self {
            name: repo.name.to_lowercase(),
            description: repo.description.as_deref().unwrap_or("").to_lowercase(),
            topics: repo.topics.join(" ").to_lowercase(),
        }
    }

    /// Name, description and topics joined by single spaces.
    pub fn combined(&self) -> String {
        [
            self.name.as_str(),
            self.description.as_str(),
            self.topics.as_str(),
        ]
        .join(" ")
    }

    fn weighted_matches(&self, keywords: &[String]) -> u32 {
        count_keyword_matches(&self.description, keywords) * DESCRIPTION_WEIGHT
            + count_keyword_matches(&self.topics, keywords) * TOPICS_WEIGHT
            + count_keyword_matches(&self.name, keywords) * NAME_WEIGHT
    }
}

/// Number of `keywords` that occur in `haystack` as a substring.
pub fn count_keyword_matches(haystack: &str, keywords: &[String]) -> u32 {
    if haystack.is_empty() {
        return 0;
    }
    keywords
        .iter()
        .filter(|k| !k.is_empty() && haystack.contains(k.as_str()))
        .count() as u32
}

/// Derive the [`SignalPair`] for a repository.
pub fn extract_signals(repo: &RepositoryRecord, vocab: &Vocabulary) -> SignalPair {
    let blobs = TextBlobs::of(repo);
    let language = repo.language_key();

    let mut backend_signal = blobs.weighted_matches(&vocab.backend_keywords);
    let mut data_signal = blobs.weighted_matches(&vocab.data_keywords);

    if vocab.is_backend_language(&language) {
        backend_signal += LANGUAGE_BONUS;
    }
    if vocab.is_data_language(&language) {
        data_signal += LANGUAGE_BONUS;
    }

    SignalPair::new(backend_signal, data_signal)
}
