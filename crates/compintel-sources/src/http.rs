//! Production [`SourceFetcher`] composed from the per-vendor clients.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use compintel_core::{
    AppConfig, NewsItem, NewsProvider, PlatformPost, SearchHit, SocialHandle, WebSection,
};
use reqwest::Client;

use crate::google_news_rss::GoogleNewsRssClient;
use crate::social::{threads_unsupported, BirdClient, BlueskyClient, MastodonClient};
use crate::{DocumentClient, GoogleSearchClient, NewsApiClient, SourceError, SourceFetcher};

/// The backend serving `news_search`.
#[derive(Debug, Clone)]
pub enum NewsBackend {
    NewsApi(NewsApiClient),
    GoogleRss(GoogleNewsRssClient),
}

impl NewsBackend {
    /// # Errors
    ///
    /// Propagates the backend client's [`SourceError`].
    pub async fn search(&self, query: &str, since: NaiveDate) -> Result<Vec<NewsItem>, SourceError> {
        match self {
            NewsBackend::NewsApi(client) => client.everything(query, since).await,
            NewsBackend::GoogleRss(client) => client.search(query, since).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            NewsBackend::NewsApi(_) => "newsapi",
            NewsBackend::GoogleRss(_) => "google_rss",
        }
    }
}

/// Sources without credentials stay `None` and fail with
/// [`SourceError::NotConfigured`] when called.
#[derive(Debug, Clone)]
pub struct HttpSourceFetcher {
    web_search: Option<GoogleSearchClient>,
    news: Option<NewsBackend>,
    documents: DocumentClient,
    twitter: Option<BirdClient>,
    bluesky: BlueskyClient,
    mastodon: MastodonClient,
}

impl HttpSourceFetcher {
    /// Build every client over one shared `reqwest::Client` carrying the
    /// configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        let web_search = match (&config.google_api_key, &config.google_cse_id) {
            (Some(key), Some(cse)) => Some(GoogleSearchClient::new(client.clone(), key, cse)?),
            _ => None,
        };

        let news = match config.news_provider {
            NewsProvider::NewsApi => config
                .news_api_key
                .as_deref()
                .map(|key| NewsApiClient::new(client.clone(), key).map(NewsBackend::NewsApi))
                .transpose()?,
            NewsProvider::GoogleRss => Some(NewsBackend::GoogleRss(GoogleNewsRssClient::new(
                client.clone(),
            )?)),
        };

        let twitter = match (&config.twitter_auth_token, &config.twitter_ct0) {
            (Some(token), Some(ct0)) => Some(BirdClient::new(token, ct0)),
            _ => None,
        };

        tracing::debug!(
            web_search = web_search.is_some(),
            news = news.as_ref().map_or("none", NewsBackend::name),
            twitter = twitter.is_some(),
            "source fetcher configured"
        );

        Ok(Self {
            web_search,
            news,
            documents: DocumentClient::new(client.clone()),
            twitter,
            bluesky: BlueskyClient::new(client.clone())?,
            mastodon: MastodonClient::new(client),
        })
    }

    /// A fetcher with only the keyless sources wired; add the rest with the
    /// `with_*` methods.
    #[must_use]
    pub fn new(documents: DocumentClient, bluesky: BlueskyClient, mastodon: MastodonClient) -> Self {
        Self {
            web_search: None,
            news: None,
            documents,
            twitter: None,
            bluesky,
            mastodon,
        }
    }

    #[must_use]
    pub fn with_web_search(mut self, client: GoogleSearchClient) -> Self {
        self.web_search = Some(client);
        self
    }

    #[must_use]
    pub fn with_news(mut self, backend: NewsBackend) -> Self {
        self.news = Some(backend);
        self
    }

    #[must_use]
    pub fn with_twitter(mut self, client: BirdClient) -> Self {
        self.twitter = Some(client);
        self
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn web_search(
        &self,
        query: &str,
        result_count: u32,
    ) -> Result<Vec<SearchHit>, SourceError> {
        let client = self
            .web_search
            .as_ref()
            .ok_or(SourceError::NotConfigured("GOOGLE_API_KEY / GOOGLE_CSE_ID"))?;
        client.search(query, result_count).await
    }

    async fn news_search(
        &self,
        query: &str,
        since: NaiveDate,
    ) -> Result<Vec<NewsItem>, SourceError> {
        let backend = self
            .news
            .as_ref()
            .ok_or(SourceError::NotConfigured("NEWS_API_KEY"))?;
        backend.search(query, since).await
    }

    async fn fetch_document(&self, url: &str) -> Result<WebSection, SourceError> {
        self.documents.fetch(url).await
    }

    async fn fetch_social_timeline(
        &self,
        handle: &SocialHandle,
        count: u32,
    ) -> Result<Vec<PlatformPost>, SourceError> {
        match handle {
            SocialHandle::Twitter { username } => {
                let client = self
                    .twitter
                    .as_ref()
                    .ok_or(SourceError::NotConfigured("TWITTER_AUTH_TOKEN / TWITTER_CT0"))?;
                client.user_tweets(username, count).await
            }
            SocialHandle::Bluesky { handle } => self.bluesky.author_feed(handle, count).await,
            SocialHandle::Mastodon(account) => self.mastodon.statuses(account, count).await,
            SocialHandle::Threads { .. } => Err(threads_unsupported()),
        }
    }
}
