use async_trait::async_trait;
use chrono::NaiveDate;
use compintel_core::{NewsItem, PlatformPost, SearchHit, SocialHandle, WebSection};

use crate::SourceError;

/// One call per logical source; every method either returns structured
/// records or fails. Timeouts are enforced by implementations.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn web_search(&self, query: &str, result_count: u32)
        -> Result<Vec<SearchHit>, SourceError>;

    /// Articles about `query` published on or after `since`, in relevance order.
    async fn news_search(&self, query: &str, since: NaiveDate)
        -> Result<Vec<NewsItem>, SourceError>;

    /// Retrieve and parse one page.
    async fn fetch_document(&self, url: &str) -> Result<WebSection, SourceError>;

    async fn fetch_social_timeline(
        &self,
        handle: &SocialHandle,
        count: u32,
    ) -> Result<Vec<PlatformPost>, SourceError>;
}
