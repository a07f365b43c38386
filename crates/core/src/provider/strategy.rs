//! Smart search strategy: which request to issue and how to post-filter it.

use tracing::debug;

use crate::metrics::{BATCH_FILTER_DROPS, SMART_SEARCH_SHORT_CIRCUITS};

use super::query::QueryBuilder;
use super::types::{AnimeTorrent, SearchIntent};

/// Why a smart search cannot be answered by a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsatisfiable {
    /// Batch lookups need the AniDB anime id.
    MissingAnimeId,
    /// Episode lookups need the AniDB episode id.
    MissingEpisodeId,
}

impl Unsatisfiable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unsatisfiable::MissingAnimeId => "missing_anime_id",
            Unsatisfiable::MissingEpisodeId => "missing_episode_id",
        }
    }
}

/// Post-processing applied to fetched records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    /// Return records unmodified.
    None,
    /// Mark every record as a batch, optionally dropping single-file torrents.
    Batch { drop_single_file: bool },
}

impl PostFilter {
    pub fn apply(self, torrents: Vec<AnimeTorrent>) -> Vec<AnimeTorrent> {
        match self {
            PostFilter::None => torrents,
            PostFilter::Batch { drop_single_file } => {
                let before = torrents.len();
                let kept: Vec<AnimeTorrent> = torrents
                    .into_iter()
                    .filter(|t| !drop_single_file || t.file_count.map_or(true, |n| n > 1))
                    .map(|mut t| {
                        t.is_batch = true;
                        t
                    })
                    .collect();

                let dropped = before - kept.len();
                if dropped > 0 {
                    debug!(dropped, "Dropped single-file batch candidates");
                    BATCH_FILTER_DROPS.inc_by(dropped as u64);
                }
                kept
            }
        }
    }
}

/// The decision for one smart search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPlan {
    /// Answer with an empty result, no request issued.
    Unsatisfiable(Unsatisfiable),
    /// Fetch this URL, then apply the post filter.
    Fetch { url: String, post_filter: PostFilter },
}

/// Decide how a smart search runs against the builder's dialect.
pub fn plan_smart_search(queries: &QueryBuilder, intent: &SearchIntent) -> SearchPlan {
    if !queries.dialect().supports_id_search() {
        // Batch/episode intent lives in the query text and title heuristics.
        return SearchPlan::Fetch {
            url: queries.smart_search_url(intent),
            post_filter: PostFilter::None,
        };
    }

    let resolution = intent.requested_resolution();

    if intent.batch {
        return match intent.media.anidb_id {
            Some(aid) => SearchPlan::Fetch {
                url: queries.anime_id_url(aid, resolution),
                post_filter: PostFilter::Batch {
                    drop_single_file: !intent.media.is_single_unit(),
                },
            },
            None => unsatisfiable(Unsatisfiable::MissingAnimeId),
        };
    }

    match intent.anidb_episode_id {
        Some(eid) => SearchPlan::Fetch {
            url: queries.episode_id_url(eid, resolution),
            post_filter: PostFilter::None,
        },
        None => unsatisfiable(Unsatisfiable::MissingEpisodeId),
    }
}

fn unsatisfiable(reason: Unsatisfiable) -> SearchPlan {
    debug!(reason = reason.as_str(), "Smart search cannot be satisfied");
    SMART_SEARCH_SHORT_CIRCUITS
        .with_label_values(&[reason.as_str()])
        .inc();
    SearchPlan::Unsatisfiable(reason)
}
