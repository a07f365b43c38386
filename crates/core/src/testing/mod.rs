//! Testing utilities and mock implementations.
//!
//! This module provides a mock transport so providers can be exercised
//! end to end without reaching a real indexer.
//!
//! # Example
//!
//! ```rust,ignore
//! use anitorrent_core::testing::{MockFetcher, fixtures};
//!
//! let fetcher = MockFetcher::with_body(fixtures::ANIMETOSHO_FEED);
//! let provider = IndexerProvider::new(Dialect::AnimeTosho, "http://feed", Arc::new(fetcher));
//! ```

mod mock_fetcher;

pub use mock_fetcher::MockFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::provider::{AnimeTorrent, UNKNOWN_EPISODE};

    /// Feed payload with a multi-file batch, a single-file "batch" and a glitched counter.
    pub const ANIMETOSHO_FEED: &str = r#"[
        {
            "title": "[SubsPlease] Show (01-12) (1080p) [Batch]",
            "link": "https://animetosho.org/view/1",
            "timestamp": 1704067200,
            "info_hash": "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3",
            "magnet_uri": "magnet:?xt=urn:btih:a94a8fe5ccb19ba61c4c0873d391e987982fbbd3",
            "seeders": 120,
            "leechers": 4,
            "torrent_downloaded_count": 800,
            "total_size": 17179869184,
            "num_files": 12
        },
        {
            "title": "[Group] Show - 01 (1080p)",
            "link": "https://animetosho.org/view/2",
            "timestamp": 1704153600,
            "seeders": 4294967295,
            "leechers": 2,
            "total_size": 1468006400,
            "num_files": 1
        }
    ]"#;

    /// Listing page with one row per title, in the indexer's table layout.
    pub fn anidex_listing(rows: &[(&str, &str, &str, &str, &str)]) -> String {
        let rows: String = rows
            .iter()
            .enumerate()
            .map(|(i, (title, size, seeders, leechers, date))| {
                format!(
                    r#"<tr><td>Anime</td><td>EN</td><td><a href="/torrent/{id}">{title}</a></td><td><a href="/dl/{id}">DL</a></td><td title="{date}">ago</td><td>1</td><td>{size}</td><td>10</td><td>{seeders}</td><td>{leechers}</td></tr>"#,
                    id = i + 1,
                    title = title,
                    size = size,
                    seeders = seeders,
                    leechers = leechers,
                    date = date,
                )
            })
            .collect();

        format!(
            r#"<!DOCTYPE html><html><body><div class="table-responsive"><table class="table table-striped table-hover"><thead><tr><th>Category</th></tr></thead><tbody>{}</tbody></table></div></body></html>"#,
            rows
        )
    }

    /// Create a test torrent with reasonable defaults.
    pub fn torrent(title: &str) -> AnimeTorrent {
        AnimeTorrent {
            title: title.to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default(),
            size_bytes: 1024 * 1024 * 350, // 350 MB
            formatted_size: "350.00 MB".to_string(),
            seeders: 50,
            leechers: 10,
            download_count: 100,
            page_link: "https://indexer.example/torrent/1".to_string(),
            download_url: None,
            magnet_link: None,
            info_hash: None,
            resolution: String::new(),
            is_batch: false,
            episode_number: UNKNOWN_EPISODE,
            release_group: String::new(),
            is_best_release: false,
            confirmed: false,
            file_count: None,
        }
    }
}
