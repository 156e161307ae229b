//! Repository scoring.
//!
//! The score is a plain sum of independent components, each exposed on
//! [`ScoreBreakdown`] so callers can explain a ranking:
//!
//! | Component | Contribution |
//! |-----------|--------------|
//! | description | +6 if present (+1 more at ≥ 48 chars), −6 if absent |
//! | language | +4 backend language, +4 data language |
//! | signals | `1.2 × backend_signal + 1.2 × data_signal` |
//! | cross-domain | +4 when both signals are positive |
//! | frontend penalty | −4 when frontend keywords outnumber both signals |
//! | stars | `min(stars, 20) / 10` |
//! | recency | +2 within 120 days, +1 within 240 days |

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::RepositoryRecord;
use crate::signals::{count_keyword_matches, SignalPair, TextBlobs, Vocabulary};

const DESCRIPTION_PRESENT: f64 = 6.0;
const DESCRIPTION_DETAILED: f64 = 1.0;
const DESCRIPTION_MISSING: f64 = -6.0;
const DETAILED_DESCRIPTION_CHARS: usize = 48;
const LANGUAGE_MATCH: f64 = 4.0;
const SIGNAL_WEIGHT: f64 = 1.2;
const CROSS_DOMAIN_BONUS: f64 = 4.0;
const FRONTEND_PENALTY: f64 = -4.0;
const STAR_CAP: u64 = 20;
const RECENT_DAYS: f64 = 120.0;
const SEMI_RECENT_DAYS: f64 = 240.0;

/// Every additive component of a repository's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub description: f64,
    pub language: f64,
    pub signals: f64,
    pub cross_domain: f64,
    pub frontend_penalty: f64,
    pub stars: f64,
    pub recency: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.description
            + self.language
            + self.signals
            + self.cross_domain
            + self.frontend_penalty
            + self.stars
            + self.recency
    }
}

/// Compute the per-component score of a repository as of `now`.
pub fn score_breakdown(
    repo: &RepositoryRecord,
    signals: SignalPair,
    vocab: &Vocabulary,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    let language = repo.language_key();
    let blobs = TextBlobs::of(repo);

    let description = match repo.trimmed_description() {
        Some(desc) if desc.chars().count() >= DETAILED_DESCRIPTION_CHARS => {
            DESCRIPTION_PRESENT + DESCRIPTION_DETAILED
        }
        Some(_) => DESCRIPTION_PRESENT,
        None => DESCRIPTION_MISSING,
    };

    let mut language_score = 0.0;
    if vocab.is_backend_language(&language) {
        language_score += LANGUAGE_MATCH;
    }
    if vocab.is_data_language(&language) {
        language_score += LANGUAGE_MATCH;
    }

    let signal_score = signals.backend_signal as f64 * SIGNAL_WEIGHT
        + signals.data_signal as f64 * SIGNAL_WEIGHT;

    let cross_domain = if signals.backend_signal > 0 && signals.data_signal > 0 {
        CROSS_DOMAIN_BONUS
    } else {
        0.0
    };

    let frontend = count_keyword_matches(&blobs.combined(), &vocab.frontend_keywords);
    let frontend_penalty = if frontend > 0 && frontend > signals.total() {
        FRONTEND_PENALTY
    } else {
        0.0
    };

    let stars = repo.stars.min(STAR_CAP) as f64 / 10.0;

    ScoreBreakdown {
        description,
        language: language_score,
        signals: signal_score,
        cross_domain,
        frontend_penalty,
        stars,
        recency: recency_bonus(repo.updated_at, now),
    }
}

/// Compute the ordering score of a repository as of `now`.
pub fn score_repository(
    repo: &RepositoryRecord,
    signals: SignalPair,
    vocab: &Vocabulary,
    now: DateTime<Utc>,
) -> f64 {
    score_breakdown(repo, signals, vocab, now).total()
}

/// Bonus for recently updated repositories. Unknown timestamps earn nothing.
pub fn recency_bonus(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(updated_at) = updated_at else {
        return 0.0;
    };
    let days = (now - updated_at).num_seconds() as f64 / 86_400.0;
    if days <= RECENT_DAYS {
        2.0
    } else if days <= SEMI_RECENT_DAYS {
        1.0
    } else {
        0.0
    }
}
