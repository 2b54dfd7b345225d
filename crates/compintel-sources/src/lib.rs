//! Source Fetcher capability: web search, news search, document retrieval
//! and social timelines, each either returning structured records or failing.
//!
//! [`SourceFetcher`] is the seam the collector depends on.
//! [`HttpSourceFetcher`] is the production implementation composed of the
//! per-vendor clients in this crate.

pub mod document;
pub mod error;
pub mod fetcher;
pub mod google;
pub mod google_news_rss;
pub mod http;
pub mod newsapi;
pub mod social;

mod html;

pub use document::DocumentClient;
pub use error::SourceError;
pub use fetcher::SourceFetcher;
pub use google::GoogleSearchClient;
pub use google_news_rss::GoogleNewsRssClient;
pub use http::{HttpSourceFetcher, NewsBackend};
pub use newsapi::NewsApiClient;
pub use social::{BirdClient, BlueskyClient, MastodonClient};
