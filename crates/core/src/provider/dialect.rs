//! Upstream indexer dialects.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{ProviderSettings, ProviderType, SmartSearchFilter};

/// The upstream shape an indexer speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Flat JSON search API.
    AnidexApi,
    /// Scraped HTML result tables.
    #[default]
    AnidexHtml,
    /// Typed JSON feed keyed by AniDB identifiers.
    #[serde(rename = "animetosho")]
    AnimeTosho,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::AnidexApi, Dialect::AnidexHtml, Dialect::AnimeTosho];

    /// Stable name for logs and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::AnidexApi => "anidex_api",
            Dialect::AnidexHtml => "anidex_html",
            Dialect::AnimeTosho => "animetosho",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Dialect::AnidexApi => "https://anidex.info/api",
            Dialect::AnidexHtml => "https://anidex.info",
            Dialect::AnimeTosho => "https://feed.animetosho.org",
        }
    }

    /// Whether the dialect can look torrents up by AniDB anime/episode id.
    pub fn supports_id_search(&self) -> bool {
        matches!(self, Dialect::AnimeTosho)
    }

    /// Capabilities declared to the host.
    pub fn settings(&self) -> ProviderSettings {
        use SmartSearchFilter::*;

        let (smart_search_filters, supports_adult) = match self {
            Dialect::AnidexApi => (vec![Batch, EpisodeNumber, Resolution], false),
            Dialect::AnidexHtml => (vec![Batch, EpisodeNumber, Resolution, Query], true),
            Dialect::AnimeTosho => (vec![Batch, EpisodeNumber, Resolution], false),
        };

        ProviderSettings {
            can_smart_search: true,
            smart_search_filters,
            supports_adult,
            provider_type: ProviderType::Main,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_names_match_serde() {
        for dialect in Dialect::ALL {
            let json = serde_json::to_string(&dialect).unwrap();
            assert_eq!(json, format!("\"{}\"", dialect.name()));
        }
    }

    #[test]
    fn test_only_animetosho_searches_by_id() {
        assert!(Dialect::AnimeTosho.supports_id_search());
        assert!(!Dialect::AnidexApi.supports_id_search());
        assert!(!Dialect::AnidexHtml.supports_id_search());
    }

    #[test]
    fn test_html_settings_declare_query_filter() {
        let settings = Dialect::AnidexHtml.settings();
        assert!(settings.can_smart_search);
        assert!(settings.supports_adult);
        assert!(settings.smart_search_filters.contains(&SmartSearchFilter::Query));

        let settings = Dialect::AnimeTosho.settings();
        assert!(!settings.supports_adult);
        assert!(!settings.smart_search_filters.contains(&SmartSearchFilter::Query));
    }
}
