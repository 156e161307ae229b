//! # Repo Showcase Core
//!
//! The pure engine behind Repo Showcase: repository models, keyword signal
//! extraction, scoring, focus classification, ranking, and the curated merge
//! that turns live repository data into display-ready project cards.
//!
//! This crate performs no I/O and never reads the system clock. Vocabularies
//! and the ranking instant are passed in by the caller, so every function
//! here is deterministic for a given input.

pub mod cards;
pub mod focus;
pub mod merge;
pub mod models;
pub mod rank;
pub mod score;
pub mod signals;
