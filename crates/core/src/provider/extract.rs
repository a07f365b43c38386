//! Heuristic field extraction from free-text torrent titles.
//!
//! Indexers that only expose a title (scraped listings) get their
//! resolution, episode, release group and batch flag derived here.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::types::UNKNOWN_EPISODE;

/// Resolution candidates, checked in order. First match wins.
pub const RESOLUTIONS: [&str; 4] = ["4K", "1080p", "720p", "480p"];

/// Size units, indexed by power of 1024.
pub const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

static EPISODE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:E|EP|Episode)\s*(\d+)\b").unwrap());

// "Show - 01", "Show - 01v2"
static EPISODE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s-\s+(\d{1,4})(?:v\d+)?\b").unwrap());

static RELEASE_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

static SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([\d.]+)\s*([KMGT]?B)$").unwrap());

/// Find the first known resolution contained in the title.
pub fn extract_resolution(title: &str) -> String {
    RESOLUTIONS
        .iter()
        .find(|res| title.contains(*res))
        .map(|res| res.to_string())
        .unwrap_or_default()
}

/// Extract the episode number, or `UNKNOWN_EPISODE`.
pub fn extract_episode_number(title: &str) -> i32 {
    EPISODE_TOKEN
        .captures(title)
        .or_else(|| EPISODE_SEPARATOR.captures(title))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(UNKNOWN_EPISODE)
}

/// Contents of the first bracketed segment, usually the fansub group.
pub fn extract_release_group(title: &str) -> String {
    RELEASE_GROUP
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn detect_batch(title: &str) -> bool {
    title.to_lowercase().contains("batch")
}

/// Parse a size such as `1.46 GB` into bytes (binary multiples). Returns 0 on mismatch.
pub fn parse_size(text: &str) -> u64 {
    let Some(caps) = SIZE.captures(text.trim()) else {
        return 0;
    };
    let Ok(value) = caps[1].parse::<f64>() else {
        return 0;
    };
    let unit = caps[2].to_uppercase();
    let power = SIZE_UNITS
        .iter()
        .position(|u| *u == unit)
        .unwrap_or_default();

    (value * 1024f64.powi(power as i32)).round() as u64
}

/// Render bytes as a human readable size with two decimals.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0.00 B".to_string();
    }

    // floor(log1024(bytes)), clamped to the known units
    let mut power = 0;
    let mut threshold = 1024u64;
    while power < SIZE_UNITS.len() - 1 && bytes >= threshold {
        power += 1;
        threshold = threshold.saturating_mul(1024);
    }

    let scaled = bytes as f64 / 1024f64.powi(power as i32);
    format!("{:.2} {}", scaled, SIZE_UNITS[power])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_resolution() {
        assert_eq!(extract_resolution("[Group] Show - 12 [1080p]"), "1080p");
        assert_eq!(extract_resolution("[Group] Show - 12 [480p]"), "480p");
        assert_eq!(extract_resolution("[Group] Show - 12 [720p]"), "720p");
        assert_eq!(extract_resolution("[Group] Show 4K HDR"), "4K");
        assert_eq!(extract_resolution("[Group] Show - 12"), "");
    }

    #[test]
    fn test_extract_resolution_is_case_sensitive() {
        assert_eq!(extract_resolution("Show 1080P"), "");
        assert_eq!(extract_resolution("Show 4k"), "");
    }

    #[test]
    fn test_extract_episode_number_tokens() {
        assert_eq!(extract_episode_number("Show E12 [1080p]"), 12);
        assert_eq!(extract_episode_number("Show EP 12 [1080p]"), 12);
        assert_eq!(extract_episode_number("Show Episode 12"), 12);
        assert_eq!(extract_episode_number("Show episode 12"), 12);
        assert_eq!(extract_episode_number("Show ep12"), 12);
    }

    #[test]
    fn test_extract_episode_number_separator() {
        assert_eq!(extract_episode_number("[Group] Show - 01 [720p]"), 1);
        assert_eq!(extract_episode_number("[Group] Show - 07v2 [1080p]"), 7);
    }

    #[test]
    fn test_extract_episode_number_absent() {
        assert_eq!(extract_episode_number("[Group] Show [1080p]"), UNKNOWN_EPISODE);
        assert_eq!(extract_episode_number("Show S01E05"), UNKNOWN_EPISODE);
        assert_eq!(extract_episode_number(""), UNKNOWN_EPISODE);
    }

    #[test]
    fn test_extract_release_group() {
        assert_eq!(extract_release_group("[SubsPlease] Show - 12"), "SubsPlease");
        assert_eq!(extract_release_group("Show - 12 [1080p]"), "1080p");
        assert_eq!(extract_release_group("Show - 12"), "");
        assert_eq!(extract_release_group("Show [] 12"), "");
    }

    #[test]
    fn test_detect_batch() {
        assert!(detect_batch("[Group] Show (01-12) [BATCH]"));
        assert!(detect_batch("show batch"));
        assert!(!detect_batch("[Group] Show - 01"));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("512 B"), 512);
        assert_eq!(parse_size("1 KB"), 1024);
        assert_eq!(parse_size("1.5MB"), 1_572_864);
        assert_eq!(parse_size("2 gb"), 2 * 1024 * 1024 * 1024);
        assert_eq!(parse_size("1 TB"), 1024u64.pow(4));
        assert_eq!(parse_size("  700 MB "), 700 * 1024 * 1024);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert_eq!(parse_size(""), 0);
        assert_eq!(parse_size("unknown"), 0);
        assert_eq!(parse_size("12 PB"), 0);
        assert_eq!(parse_size("1.2.3 GB"), 0);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(1), "1.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1_572_864), "1.50 MB");
        assert_eq!(format_size(1024u64.pow(3)), "1.00 GB");
        assert_eq!(format_size(1024u64.pow(4)), "1.00 TB");
    }

    #[test]
    fn test_format_size_clamps_to_terabytes() {
        assert_eq!(format_size(2048 * 1024u64.pow(4)), "2048.00 TB");
    }

    #[test]
    fn test_parse_format_size_within_rounding() {
        for bytes in [1u64, 999, 1024, 123_456, 1_567_640_617, 3 * 1024u64.pow(4) + 17] {
            let recovered = parse_size(&format_size(bytes));
            let tolerance = (bytes as f64 * 0.005).max(1.0);
            assert!(
                (recovered as f64 - bytes as f64).abs() <= tolerance,
                "{} -> {} -> {}",
                bytes,
                format_size(bytes),
                recovered
            );
        }
    }
}
