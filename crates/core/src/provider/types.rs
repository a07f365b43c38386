//! Types for the anime torrent provider system.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Episode number used when a title carries no episode token.
pub const UNKNOWN_EPISODE: i32 = -1;

/// A torrent normalized from any upstream dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeTorrent {
    /// Torrent title as listed by the indexer.
    pub title: String,
    /// When the torrent was published.
    pub published_at: DateTime<Utc>,
    /// Size in bytes (0 if unknown).
    pub size_bytes: u64,
    /// Human readable size, may be empty if unknown.
    pub formatted_size: String,
    /// Seeders, sanitized.
    pub seeders: u32,
    /// Leechers, sanitized.
    pub leechers: u32,
    /// Completed downloads.
    pub download_count: u32,
    /// Absolute URL of the indexer detail page.
    pub page_link: String,
    /// Absolute URL of the .torrent file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet_link: Option<String>,
    /// Info hash (40 hex characters) when the upstream provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_hash: Option<String>,
    /// One of the known resolutions, or empty.
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub is_batch: bool,
    /// Episode number, `UNKNOWN_EPISODE` when not applicable.
    #[serde(default = "unknown_episode")]
    pub episode_number: i32,
    /// Release group, empty if not detected.
    #[serde(default)]
    pub release_group: String,
    #[serde(default)]
    pub is_best_release: bool,
    /// Upstream-verified authenticity signal.
    #[serde(default)]
    pub confirmed: bool,
    /// Number of files in the torrent (only reported by some dialects).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u32>,
}

fn unknown_episode() -> i32 {
    UNKNOWN_EPISODE
}

/// Media format of the anime being searched for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaFormat {
    #[default]
    Tv,
    TvShort,
    Movie,
    Special,
    Ova,
    Ona,
    Music,
    #[serde(other)]
    Unknown,
}

/// The anime a smart search is about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romaji_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_title: Option<String>,
    #[serde(default)]
    pub format: MediaFormat,
    /// Total number of episodes, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    /// AniDB anime id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anidb_id: Option<u32>,
}

impl Media {
    /// Whether this media is a single unit, where a "batch" can hold one file.
    pub fn is_single_unit(&self) -> bool {
        self.format == MediaFormat::Movie || self.episode_count == Some(1)
    }
}

/// A caller's search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIntent {
    /// Free-text query, may be empty.
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// Requested episode; `None` or `Some(0)` means not specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,
    #[serde(default)]
    pub batch: bool,
    #[serde(default)]
    pub best_releases: bool,
    #[serde(default)]
    pub media: Media,
    /// AniDB episode id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anidb_episode_id: Option<u32>,
}

impl SearchIntent {
    /// Plain keyword intent.
    pub fn keyword(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Free text to search for: the query, else the romaji title, else the English title.
    pub fn base_query(&self) -> &str {
        [
            Some(self.query.as_str()),
            self.media.romaji_title.as_deref(),
            self.media.english_title.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|q| !q.is_empty())
        .unwrap_or_default()
    }

    /// The requested episode, if positive.
    pub fn requested_episode(&self) -> Option<u32> {
        self.episode_number.filter(|n| *n > 0)
    }

    /// The requested resolution, if non-blank.
    pub fn requested_resolution(&self) -> Option<&str> {
        self.resolution
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// Filters a provider understands in smart search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SmartSearchFilter {
    Batch,
    EpisodeNumber,
    Resolution,
    Query,
    BestReleases,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Main,
    Special,
}

/// Capabilities a provider declares to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    pub can_smart_search: bool,
    pub smart_search_filters: Vec<SmartSearchFilter>,
    pub supports_adult: bool,
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
}

/// Errors that fail a whole search call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Upstream connection failed: {0}")]
    Connection(String),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed upstream payload: {0}")]
    MalformedPayload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_connect() {
            ProviderError::Connection(e.to_string())
        } else if e.is_decode() {
            ProviderError::MalformedPayload(e.to_string())
        } else {
            ProviderError::Internal(e.to_string())
        }
    }
}

/// The contract the host runtime depends on.
#[async_trait]
pub trait AnimeProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Capabilities declared to the host.
    fn settings(&self) -> ProviderSettings;

    /// Plain keyword search.
    async fn search(&self, intent: &SearchIntent) -> Result<Vec<AnimeTorrent>, ProviderError>;

    /// Search driven by episode, resolution and batch intent.
    ///
    /// An intent the provider cannot satisfy yields an empty result, not an error.
    async fn smart_search(&self, intent: &SearchIntent)
        -> Result<Vec<AnimeTorrent>, ProviderError>;

    /// Most recent uploads.
    async fn latest(&self) -> Result<Vec<AnimeTorrent>, ProviderError>;

    /// Info hash of a record, empty if the upstream did not supply one.
    fn info_hash(&self, torrent: &AnimeTorrent) -> String {
        torrent.info_hash.clone().unwrap_or_default()
    }

    /// Magnet link of a record, empty if the upstream did not supply one.
    fn magnet_link(&self, torrent: &AnimeTorrent) -> String {
        torrent.magnet_link.clone().unwrap_or_default()
    }
}
