//! Anime torrent provider abstraction.
//!
//! This module normalizes search results from several upstream indexer
//! dialects into one `AnimeTorrent` record and builds dialect-specific
//! queries from a `SearchIntent`.

mod dialect;
pub mod extract;
mod fetcher;
mod indexer;
pub mod parser;
mod query;
pub mod sanitize;
mod strategy;
mod types;

pub use dialect::Dialect;
pub use fetcher::{Fetcher, HttpFetcher};
pub use indexer::IndexerProvider;
pub use parser::{parser_for, AnidexApiParser, AnidexHtmlParser, AnimeToshoParser, ResponseParser};
pub use query::{compose_query, resolution_exclusion_query, QueryBuilder, EXCLUSION_RESOLUTIONS};
pub use strategy::{plan_smart_search, PostFilter, SearchPlan, Unsatisfiable};
pub use types::*;
