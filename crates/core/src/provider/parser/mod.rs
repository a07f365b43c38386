//! Conversion of raw upstream payloads into canonical torrent records.
//!
//! Every dialect implements the same `ResponseParser` capability so the
//! provider and strategy code stay dialect-agnostic. Whole-payload failures
//! surface as `ProviderError::MalformedPayload`; the HTML parser degrades
//! individual rows to default values instead.

mod anidex_api;
mod anidex_html;
mod animetosho;

pub use anidex_api::AnidexApiParser;
pub use anidex_html::AnidexHtmlParser;
pub use animetosho::AnimeToshoParser;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::Url;

use super::dialect::Dialect;
use super::types::{AnimeTorrent, ProviderError};

/// Converts one upstream payload into canonical records.
pub trait ResponseParser: Send + Sync {
    fn parse(&self, body: &str) -> Result<Vec<AnimeTorrent>, ProviderError>;
}

/// Create the parser for a dialect. Relative links resolve against `base_url`.
pub fn parser_for(dialect: Dialect, base_url: &str) -> Box<dyn ResponseParser> {
    match dialect {
        Dialect::AnidexApi => Box::new(AnidexApiParser::new(base_url)),
        Dialect::AnidexHtml => Box::new(AnidexHtmlParser::new(base_url)),
        Dialect::AnimeTosho => Box::new(AnimeToshoParser),
    }
}

/// Resolve a possibly relative link against the indexer base.
pub(crate) fn resolve_link(base_url: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Parse an upstream timestamp string.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (optionally suffixed with `UTC`),
/// `YYYY-MM-DD HH:MM` and a bare `YYYY-MM-DD` (midnight UTC).
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    let text = text.strip_suffix("UTC").map(str::trim_end).unwrap_or(text);

    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|ndt| ndt.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|ndt| ndt.and_utc())
        })
}

/// Keep an info hash only if it is 40 hex characters, lowercased.
pub(crate) fn normalize_info_hash(hash: Option<String>) -> Option<String> {
    hash.map(|h| h.trim().to_lowercase())
        .filter(|h| h.len() == 40 && h.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Clamp an upstream count into `u32`.
pub(crate) fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
