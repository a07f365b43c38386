//! Flat JSON search API: fields map 1:1 onto the canonical record.

use chrono::Utc;
use serde::Deserialize;

use crate::provider::extract::format_size;
use crate::provider::sanitize::sanitize_counters;
use crate::provider::types::{AnimeTorrent, ProviderError, UNKNOWN_EPISODE};

use super::{clamp_count, non_empty, normalize_info_hash, parse_timestamp, resolve_link, ResponseParser};

/// Parser for the JSON array returned by the search/latest API.
pub struct AnidexApiParser {
    base_url: String,
}

impl AnidexApiParser {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn convert(&self, item: AnidexApiItem) -> AnimeTorrent {
        let (seeders, leechers) =
            sanitize_counters(item.seeders.unwrap_or(0), item.leechers.unwrap_or(0));
        let size_bytes = item.size.unwrap_or(0);

        AnimeTorrent {
            title: item.title,
            published_at: item
                .date
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_else(Utc::now),
            size_bytes,
            formatted_size: format_size(size_bytes),
            seeders,
            leechers,
            download_count: clamp_count(item.download_count.unwrap_or(0)),
            page_link: resolve_link(&self.base_url, item.link.as_deref().unwrap_or_default()),
            download_url: non_empty(item.download_url).map(|u| resolve_link(&self.base_url, &u)),
            magnet_link: non_empty(item.magnet_link),
            info_hash: normalize_info_hash(item.info_hash),
            resolution: item.resolution.unwrap_or_default(),
            is_batch: item.is_batch.unwrap_or(false),
            episode_number: item.episode_number.unwrap_or(UNKNOWN_EPISODE),
            release_group: item.release_group.unwrap_or_default(),
            is_best_release: item.is_best_release.unwrap_or(false),
            confirmed: item.confirmed.unwrap_or(false),
            file_count: None,
        }
    }
}

impl ResponseParser for AnidexApiParser {
    fn parse(&self, body: &str) -> Result<Vec<AnimeTorrent>, ProviderError> {
        let items: Vec<AnidexApiItem> = serde_json::from_str(body).map_err(|e| {
            ProviderError::MalformedPayload(format!("Failed to parse search response: {}", e))
        })?;

        Ok(items.into_iter().map(|item| self.convert(item)).collect())
    }
}

// API response types
#[derive(Debug, Deserialize)]
struct AnidexApiItem {
    #[serde(default)]
    title: String,
    date: Option<String>,
    size: Option<u64>,
    seeders: Option<i64>,
    leechers: Option<i64>,
    download_count: Option<i64>,
    link: Option<String>,
    download_url: Option<String>,
    magnet_link: Option<String>,
    info_hash: Option<String>,
    resolution: Option<String>,
    is_batch: Option<bool>,
    episode_number: Option<i32>,
    release_group: Option<String>,
    is_best_release: Option<bool>,
    confirmed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> AnidexApiParser {
        AnidexApiParser::new("https://anidex.info/api")
    }

    #[test]
    fn test_parse_full_record() {
        let body = r#"[{
            "title": "[SubsPlease] Show - 05 (1080p)",
            "date": "2024-03-01T12:00:00Z",
            "size": 1468006400,
            "seeders": 120,
            "leechers": 8,
            "download_count": 3400,
            "link": "/torrent/555",
            "download_url": "/dl/555",
            "magnet_link": "magnet:?xt=urn:btih:a94a8fe5ccb19ba61c4c0873d391e987982fbbd3",
            "info_hash": "A94A8FE5CCB19BA61C4C0873D391E987982FBBD3",
            "resolution": "1080p",
            "is_batch": false,
            "episode_number": 5,
            "release_group": "SubsPlease",
            "is_best_release": true,
            "confirmed": true
        }]"#;

        let torrents = parser().parse(body).unwrap();
        assert_eq!(torrents.len(), 1);

        let t = &torrents[0];
        assert_eq!(t.title, "[SubsPlease] Show - 05 (1080p)");
        assert_eq!(t.published_at.to_rfc3339(), "2024-03-01T12:00:00+00:00");
        assert_eq!(t.size_bytes, 1_468_006_400);
        assert_eq!(t.formatted_size, "1.37 GB");
        assert_eq!((t.seeders, t.leechers, t.download_count), (120, 8, 3400));
        assert_eq!(t.page_link, "https://anidex.info/torrent/555");
        assert_eq!(t.download_url.as_deref(), Some("https://anidex.info/dl/555"));
        assert_eq!(
            t.info_hash.as_deref(),
            Some("a94a8fe5ccb19ba61c4c0873d391e987982fbbd3")
        );
        assert_eq!(t.resolution, "1080p");
        assert_eq!(t.episode_number, 5);
        assert_eq!(t.release_group, "SubsPlease");
        assert!(t.is_best_release);
        assert!(t.confirmed);
    }

    #[test]
    fn test_parse_does_not_apply_title_heuristics() {
        let body = r#"[{ "title": "[Group] Show - 01 [720p] batch" }]"#;
        let t = &parser().parse(body).unwrap()[0];

        assert_eq!(t.resolution, "");
        assert!(!t.is_batch);
        assert_eq!(t.episode_number, UNKNOWN_EPISODE);
        assert_eq!(t.release_group, "");
        assert_eq!(t.formatted_size, "0.00 B");
    }

    #[test]
    fn test_parse_sanitizes_counters() {
        let body = r#"[{ "title": "x", "seeders": 99999, "leechers": -3 }]"#;
        let t = &parser().parse(body).unwrap()[0];
        assert_eq!((t.seeders, t.leechers), (0, 0));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parser().parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_payload_fails_whole_batch() {
        let err = parser().parse(r#"{"error": "nope"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedPayload(_)));

        let err = parser().parse("<html>").unwrap_err();
        assert!(matches!(err, ProviderError::MalformedPayload(_)));
    }
}
