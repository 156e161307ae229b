//! Project card assembly.
//!
//! [`build_project_cards`] is the engine's entry point for presentation
//! layers: it ranks the raw repositories and merges them onto the curated
//! list. It never fails. With no live data every card carries curated
//! content only.

use crate::merge::merge_curated;
use crate::models::{CuratedProject, ProjectCard, RepositoryRecord};
use crate::rank::{rank_repositories, RankRequest};

/// Rank `raw` and merge the result onto `curated`.
///
/// The returned cards mirror `curated` one to one, in the same order.
pub fn build_project_cards(
    curated: &[CuratedProject],
    raw: Vec<RepositoryRecord>,
    req: &RankRequest<'_>,
) -> Vec<ProjectCard> {
    let ranked = rank_repositories(raw, req);
    merge_curated(curated, &ranked)
}
