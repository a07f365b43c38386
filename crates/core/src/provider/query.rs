//! Outbound query construction per dialect.

use super::dialect::Dialect;
use super::types::SearchIntent;

/// Resolution tokens used by the exclusion query, in output order.
pub const EXCLUSION_RESOLUTIONS: [&str; 4] = ["480", "540", "720", "1080"];

/// Compose the free-text query for a smart search.
///
/// Base text (query, else romaji title, else English title), then `batch`,
/// `episode {n}` and the resolution, each only when requested.
pub fn compose_query(intent: &SearchIntent) -> String {
    let mut parts: Vec<String> = Vec::new();

    let base = intent.base_query();
    if !base.is_empty() {
        parts.push(base.to_string());
    }
    if intent.batch {
        parts.push("batch".to_string());
    }
    if let Some(episode) = intent.requested_episode() {
        parts.push(format!("episode {}", episode));
    }
    if let Some(resolution) = intent.requested_resolution() {
        parts.push(resolution.to_string());
    }

    parts.join(" ")
}

/// Build a full-text clause requiring one resolution and negating the others.
///
/// `"1080p"` becomes `1080 -480 -540 -720`. Empty when no resolution is given.
pub fn resolution_exclusion_query(resolution: Option<&str>) -> String {
    let Some(resolution) = resolution.map(str::trim).filter(|r| !r.is_empty()) else {
        return String::new();
    };

    let wanted = resolution
        .strip_suffix(['p', 'P'])
        .unwrap_or(resolution);

    let mut clause = wanted.to_string();
    for other in EXCLUSION_RESOLUTIONS.iter().filter(|r| **r != wanted) {
        clause.push_str(" -");
        clause.push_str(other);
    }
    clause
}

/// Builds upstream URLs for one dialect.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    dialect: Dialect,
    base_url: String,
}

impl QueryBuilder {
    pub fn new(dialect: Dialect, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { dialect, base_url }
    }

    /// Query builder pointing at the dialect's public instance.
    pub fn with_default_base(dialect: Dialect) -> Self {
        Self::new(dialect, dialect.default_base_url())
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for a plain keyword search.
    pub fn search_url(&self, query: &str) -> String {
        let encoded = urlencoding::encode(query.trim());
        match self.dialect {
            Dialect::AnidexApi => format!("{}/search?query={}&lang=en", self.base_url, encoded),
            Dialect::AnidexHtml => format!("{}/?q={}", self.base_url, encoded),
            Dialect::AnimeTosho => format!("{}/json?q={}", self.base_url, encoded),
        }
    }

    /// URL for a smart search expressed as free text.
    pub fn smart_search_url(&self, intent: &SearchIntent) -> String {
        match self.dialect {
            // The feed ignores "batch"/"episode" words; id lookups carry that intent instead.
            Dialect::AnimeTosho => self.search_url(intent.base_query()),
            _ => self.search_url(&compose_query(intent)),
        }
    }

    /// URL listing the most recent uploads.
    pub fn latest_url(&self) -> String {
        match self.dialect {
            Dialect::AnidexApi => format!("{}/latest?lang=en", self.base_url),
            Dialect::AnidexHtml => format!("{}/?s=id&o=desc", self.base_url),
            Dialect::AnimeTosho => format!("{}/json", self.base_url),
        }
    }

    /// URL searching every torrent of an AniDB anime.
    pub fn anime_id_url(&self, anidb_aid: u32, resolution: Option<&str>) -> String {
        self.id_url("anidb_aid", anidb_aid, resolution)
    }

    /// URL searching torrents of a single AniDB episode.
    pub fn episode_id_url(&self, anidb_eid: u32, resolution: Option<&str>) -> String {
        self.id_url("anidb_eid", anidb_eid, resolution)
    }

    fn id_url(&self, param: &str, id: u32, resolution: Option<&str>) -> String {
        let mut url = format!("{}/json?{}={}", self.base_url, param, id);
        let clause = resolution_exclusion_query(resolution);
        if !clause.is_empty() {
            url.push_str("&q=");
            url.push_str(&urlencoding::encode(&clause));
        }
        url
    }
}
