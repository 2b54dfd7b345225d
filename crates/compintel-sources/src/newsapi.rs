//! NewsAPI `/v2/everything` client for `news_search`.

use chrono::NaiveDate;
use compintel_core::NewsItem;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::display_url;
use crate::SourceError;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/";

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    source: Option<ArticleSource>,
    title: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    content: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

impl From<Article> for NewsItem {
    fn from(article: Article) -> Self {
        NewsItem {
            title: article.title.unwrap_or_default(),
            source: article
                .source
                .and_then(|s| s.name)
                .unwrap_or_default(),
            url: article.url.unwrap_or_default(),
            published_at: article.published_at.unwrap_or_default(),
            content: article.content,
            description: article.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl NewsApiClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Api`] if the built-in base URL fails to parse.
    pub fn new(client: Client, api_key: &str) -> Result<Self, SourceError> {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`SourceError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(client: Client, api_key: &str, base_url: &str) -> Result<Self, SourceError> {
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SourceError::Api {
            provider: "newsapi",
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// English articles matching `query` since `since`, sorted by relevancy.
    ///
    /// `content` and `description` stay `None` when the API reports null.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Api`] when the envelope reports `"status": "error"`.
    /// - [`SourceError::UnexpectedStatus`] for other non-2xx responses.
    /// - [`SourceError::Http`] / [`SourceError::Deserialize`] on transport or
    ///   decoding failures.
    pub async fn everything(
        &self,
        query: &str,
        since: NaiveDate,
    ) -> Result<Vec<NewsItem>, SourceError> {
        let url = self
            .base_url
            .join("v2/everything")
            .map_err(|e| SourceError::Api {
                provider: "newsapi",
                message: format!("invalid endpoint: {e}"),
            })?;
        let from = since.format("%Y-%m-%d").to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("q", query),
                ("from", from.as_str()),
                ("sortBy", "relevancy"),
                ("language", "en"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let shown_url = display_url(response.url());
        let body = response.text().await?;

        // Error envelopes arrive with 4xx statuses and carry the useful message.
        let envelope = match serde_json::from_str::<Envelope>(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(SourceError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: shown_url,
                });
            }
            Err(source) => {
                return Err(SourceError::Deserialize {
                    context: "newsapi everything response".to_string(),
                    source,
                });
            }
        };

        if envelope.status != "ok" {
            return Err(SourceError::Api {
                provider: "newsapi",
                message: format!(
                    "{}: {}",
                    envelope.code.as_deref().unwrap_or(envelope.status.as_str()),
                    envelope.message.as_deref().unwrap_or_default()
                ),
            });
        }
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: shown_url,
            });
        }

        Ok(envelope.articles.into_iter().map(NewsItem::from).collect())
    }
}
