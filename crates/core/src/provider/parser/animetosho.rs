//! Typed JSON feed keyed by AniDB identifiers.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::provider::extract::format_size;
use crate::provider::sanitize::sanitize_counters;
use crate::provider::types::{AnimeTorrent, ProviderError, UNKNOWN_EPISODE};

use super::{clamp_count, non_empty, normalize_info_hash, ResponseParser};

/// Parser for the feed's JSON entries.
///
/// The feed verifies torrents before listing them, so every record is
/// `confirmed`. Title-derived fields are left unknown.
pub struct AnimeToshoParser;

impl AnimeToshoParser {
    fn convert(entry: ToshoEntry) -> AnimeTorrent {
        let (seeders, leechers) =
            sanitize_counters(entry.seeders.unwrap_or(0), entry.leechers.unwrap_or(0));
        let size_bytes = entry.total_size.unwrap_or(0);

        AnimeTorrent {
            title: entry.title,
            published_at: entry
                .timestamp
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .unwrap_or_else(Utc::now),
            size_bytes,
            formatted_size: format_size(size_bytes),
            seeders,
            leechers,
            download_count: clamp_count(entry.torrent_downloaded_count.unwrap_or(0)),
            page_link: entry.link,
            download_url: non_empty(entry.torrent_url),
            magnet_link: non_empty(entry.magnet_uri),
            info_hash: normalize_info_hash(entry.info_hash),
            resolution: String::new(),
            is_batch: false,
            episode_number: UNKNOWN_EPISODE,
            release_group: String::new(),
            is_best_release: false,
            confirmed: true,
            file_count: entry.num_files,
        }
    }
}

impl ResponseParser for AnimeToshoParser {
    fn parse(&self, body: &str) -> Result<Vec<AnimeTorrent>, ProviderError> {
        let entries: Vec<ToshoEntry> = serde_json::from_str(body).map_err(|e| {
            ProviderError::MalformedPayload(format!("Failed to parse feed response: {}", e))
        })?;

        Ok(entries.into_iter().map(Self::convert).collect())
    }
}

// Feed response types
#[derive(Debug, Deserialize)]
struct ToshoEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    /// Seconds since the epoch.
    timestamp: Option<i64>,
    torrent_url: Option<String>,
    magnet_uri: Option<String>,
    info_hash: Option<String>,
    seeders: Option<i64>,
    leechers: Option<i64>,
    torrent_downloaded_count: Option<i64>,
    total_size: Option<u64>,
    num_files: Option<u32>,
}
