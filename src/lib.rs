//! # Repo Showcase
//!
//! Turns an account's public GitHub repositories into a ranked, classified
//! list of project cards, anchored on a hand-curated project list.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────────────────┐   ┌──────────┐
//! │  Connector  │──▶│        showcase-core         │──▶│   CLI    │
//! │ GitHub/JSON │   │ signals → score/focus → rank │   │(showcase)│
//! └─────────────┘   │        → curated merge       │   └──────────┘
//!                   └──────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. The **connector** ([`connector_github`]) lists repositories from the
//!    GitHub API, or reads a saved payload, and normalizes them into
//!    [`showcase_core::models::RepositoryRecord`]s. API failures degrade to
//!    an empty list.
//! 2. The **core engine** extracts keyword signals, scores and classifies
//!    each repository, and ranks the set.
//! 3. The **curated merge** lays the ranked data onto the configured
//!    projects ([`config`]), producing one card per curated project.
//! 4. The **CLI** ([`showcase`]) prints cards or the ranked list as text
//!    or JSON.
//!
//! ## Quick Start
//!
//! ```bash
//! showcase projects                         # list curated projects
//! showcase cards                            # fetch, rank, merge, print
//! showcase cards --input repos.json --json  # offline, JSON output
//! showcase rank --explain                   # ranked live repositories
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`connector_github`] | GitHub repository listing |
//! | [`showcase`] | `cards` and `rank` commands |
//! | [`projects`] | Curated project listing |

pub mod config;
pub mod connector_github;
pub mod projects;
pub mod showcase;

pub use showcase_core;
