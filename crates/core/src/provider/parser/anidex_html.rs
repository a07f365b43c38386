//! Scraped HTML result tables.
//!
//! Rows are read by fixed column position; nothing in the markup is
//! structured beyond that, so anime fields come from the title text.

use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::provider::extract::{
    detect_batch, extract_episode_number, extract_release_group, extract_resolution, parse_size,
};
use crate::provider::sanitize::sanitize_counters;
use crate::provider::types::{AnimeTorrent, ProviderError};

use super::{clamp_count, parse_timestamp, resolve_link, ResponseParser};

/// Result rows of the listing table.
const ROW_SELECTOR: &str = "table.table-hover > tbody > tr";

// 1-based column positions within a result row.
const TITLE_COLUMN: usize = 3;
const DATE_COLUMN: usize = 5;
const SIZE_COLUMN: usize = 7;
const DOWNLOADS_COLUMN: usize = 8;
const SEEDERS_COLUMN: usize = 9;
const LEECHERS_COLUMN: usize = 10;

/// Selectors for one row, compiled once per payload.
struct RowSelectors {
    cell: Selector,
    title: Selector,
    date: Selector,
    size: Selector,
    downloads: Selector,
    seeders: Selector,
    leechers: Selector,
    magnet: Selector,
    download: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self, ProviderError> {
        Ok(Self {
            cell: selector("td")?,
            title: selector(&format!("td:nth-child({}) a", TITLE_COLUMN))?,
            date: column(DATE_COLUMN)?,
            size: column(SIZE_COLUMN)?,
            downloads: column(DOWNLOADS_COLUMN)?,
            seeders: column(SEEDERS_COLUMN)?,
            leechers: column(LEECHERS_COLUMN)?,
            magnet: selector(r#"a[href^="magnet:"]"#)?,
            download: selector(r#"a[href^="/dl/"]"#)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ProviderError> {
    Selector::parse(css)
        .map_err(|e| ProviderError::Internal(format!("Invalid selector {}: {}", css, e)))
}

fn column(position: usize) -> Result<Selector, ProviderError> {
    selector(&format!("td:nth-child({})", position))
}

/// Parser for scraped listing pages.
pub struct AnidexHtmlParser {
    base_url: String,
}

impl AnidexHtmlParser {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Extract one row. Missing or unparsable cells fall back to defaults.
    fn parse_row(&self, row: ElementRef<'_>, sel: &RowSelectors) -> AnimeTorrent {
        let anchor = row.select(&sel.title).next();
        let title = anchor.map(element_text).unwrap_or_default();
        let href = anchor
            .and_then(|a| a.value().attr("href"))
            .unwrap_or_default();
        if anchor.is_none() {
            warn!("Result row has no title anchor");
        }

        let size_text = cell_text(row, &sel.size);
        let (seeders, leechers) = sanitize_counters(
            parse_count(&cell_text(row, &sel.seeders)),
            parse_count(&cell_text(row, &sel.leechers)),
        );

        let published_at = row
            .select(&sel.date)
            .next()
            .and_then(|cell| cell.value().attr("title"))
            .and_then(parse_timestamp)
            .unwrap_or_else(|| {
                debug!(title = %title, "Missing or unparsable date, using now");
                Utc::now()
            });

        let magnet_link = row
            .select(&sel.magnet)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);
        let download_url = row
            .select(&sel.download)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_link(&self.base_url, href));

        AnimeTorrent {
            published_at,
            size_bytes: parse_size(&size_text),
            formatted_size: size_text,
            seeders,
            leechers,
            download_count: clamp_count(parse_count(&cell_text(row, &sel.downloads))),
            page_link: resolve_link(&self.base_url, href),
            download_url,
            magnet_link,
            info_hash: None,
            resolution: extract_resolution(&title),
            is_batch: detect_batch(&title),
            episode_number: extract_episode_number(&title),
            release_group: extract_release_group(&title),
            is_best_release: false,
            confirmed: false,
            file_count: None,
            title,
        }
    }
}

impl ResponseParser for AnidexHtmlParser {
    fn parse(&self, body: &str) -> Result<Vec<AnimeTorrent>, ProviderError> {
        let document = Html::parse_document(body);
        let rows = selector(ROW_SELECTOR)?;
        let sel = RowSelectors::new()?;

        Ok(document
            .select(&rows)
            .filter(|row| row.select(&sel.cell).next().is_some())
            .map(|row| self.parse_row(row, &sel))
            .collect())
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn cell_text(row: ElementRef<'_>, selector: &Selector) -> String {
    row.select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Parse a counter cell, tolerating thousands separators. Defaults to 0.
fn parse_count(text: &str) -> i64 {
    text.replace(',', "").trim().parse().unwrap_or(0)
}
