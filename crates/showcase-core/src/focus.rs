//! Focus classification.
//!
//! Maps `(language, backend_signal, data_signal)` to a [`Focus`] tag. The
//! decision order is fixed and data-dominance checks run before the
//! backend check, so a tied or data-leaning repository is never plain
//! [`Focus::Backend`]:
//!
//! 1. Both signals strong (≥ 6): data language with `data ≥ backend` → data,
//!    otherwise backend-data.
//! 2. Data language with `data ≥ backend` → data.
//! 3. `data ≥ 6` or `data ≥ backend + 2` → data.
//! 4. `backend ≥ 6` → backend.
//! 5. `backend ≥ 4` and `data ≥ 3` → fullstack.
//! 6. Otherwise → general.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::signals::{SignalPair, Vocabulary};

/// Threshold at which a signal counts as strong.
pub const STRONG_SIGNAL: u32 = 6;

/// Categorical description of a repository's primary domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Focus {
    Backend,
    Data,
    BackendData,
    Fullstack,
    General,
}

impl Focus {
    pub const ALL: [Focus; 5] = [
        Focus::Backend,
        Focus::Data,
        Focus::BackendData,
        Focus::Fullstack,
        Focus::General,
    ];

    /// The machine tag (`backend`, `backend-data`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::Backend => "backend",
            Focus::Data => "data",
            Focus::BackendData => "backend-data",
            Focus::Fullstack => "fullstack",
            Focus::General => "general",
        }
    }

    /// Human-readable badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Focus::Backend => "Backend Focus",
            Focus::Data => "Data Science",
            Focus::BackendData => "Backend + Data",
            Focus::Fullstack => "Backend + Full-Stack",
            Focus::General => "General Engineering",
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Focus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Focus::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| {
                format!(
                    "Unknown focus '{}'. Must be backend, data, backend-data, fullstack, or general.",
                    s
                )
            })
    }
}

/// Classify a repository's focus from its language and signals.
///
/// `language` is matched case-insensitively against the vocabulary's
/// data-science language set. Score and stars never influence the result.
pub fn classify_focus(language: Option<&str>, signals: SignalPair, vocab: &Vocabulary) -> Focus {
    let language_key = language.map(|l| l.trim().to_lowercase()).unwrap_or_default();
    let is_data_language = vocab.is_data_language(&language_key);

    let backend = signals.backend_signal;
    let data = signals.data_signal;
    let backend_strong = backend >= STRONG_SIGNAL;
    let data_strong = data >= STRONG_SIGNAL;

    if backend_strong && data_strong {
        if is_data_language && data >= backend {
            return Focus::Data;
        }
        return Focus::BackendData;
    }

    if is_data_language && data >= backend {
        return Focus::Data;
    }

    if data_strong || data >= backend + 2 {
        return Focus::Data;
    }

    if backend_strong {
        return Focus::Backend;
    }

    if backend >= 4 && data >= 3 {
        return Focus::Fullstack;
    }

    Focus::General
}
