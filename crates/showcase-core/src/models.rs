//! Data models shared by the ranking and merge stages.
//!
//! [`RawRepository`] mirrors one element of the GitHub
//! `GET /users/{user}/repos` response, where almost every field can be
//! `null` or missing. It is converted into a [`RepositoryRecord`] at the
//! boundary so the rest of the engine never deals with absent collections.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::focus::Focus;

/// One repository as returned by the hosting API, before normalization.
///
/// Only `name` is required. Every other field is read leniently: a value of
/// the wrong type is treated as absent instead of rejecting the repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRepository {
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub html_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stargazers_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub topics: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub fork: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub archived: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// A string array with non-string elements dropped.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_array().map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    }))
}

/// A normalized repository record, the engine's unit of input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stars: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub fork: bool,
    pub archived: bool,
    /// `None` when the API omitted the timestamp or it did not parse.
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepositoryRecord {
    /// A minimal, non-fork, non-archived record with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            html_url: String::new(),
            stars: 0,
            language: None,
            topics: Vec::new(),
            fork: false,
            archived: false,
            updated_at: None,
        }
    }

    /// Lower-cased primary language, empty when absent.
    pub fn language_key(&self) -> String {
        self.language
            .as_deref()
            .map(|l| l.trim().to_lowercase())
            .unwrap_or_default()
    }

    /// The description with surrounding whitespace removed, if any remains.
    pub fn trimmed_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

impl From<RawRepository> for RepositoryRecord {
    fn from(raw: RawRepository) -> Self {
        let language = raw
            .language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let topics = raw
            .topics
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let updated_at = raw
            .updated_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Self {
            name: raw.name,
            description: raw.description,
            html_url: raw.html_url.unwrap_or_default(),
            stars: raw.stargazers_count.unwrap_or(0),
            language,
            topics,
            fork: raw.fork.unwrap_or(false),
            archived: raw.archived.unwrap_or(false),
            updated_at,
        }
    }
}

/// Parse a GitHub `repos` JSON payload into normalized records.
///
/// Elements that are not objects with a string `name` are skipped rather
/// than failing the whole payload.
pub fn records_from_json(value: &Value) -> Vec<RepositoryRecord> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| RawRepository::deserialize(item).ok())
        .map(RepositoryRecord::from)
        .collect()
}

/// A hand-authored project entry. Authoritative for every repository it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedProject {
    /// Canonical repository name on the hosting service.
    pub repo_name: String,
    /// Alternate names the repository may be published under.
    #[serde(default)]
    pub aliases: Vec<String>,
    pub display_name: String,
    pub badge: Focus,
    pub description: String,
    #[serde(default)]
    pub stack: Vec<String>,
    pub url: String,
}

/// A display-ready project card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub link: String,
    pub focus_label: String,
    pub focus_tone: Focus,
}
