//! Google Custom Search JSON API client for `web_search`.

use compintel_core::SearchHit;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::display_url;
use crate::SourceError;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    display_link: Option<String>,
}

impl From<SearchItem> for SearchHit {
    fn from(item: SearchItem) -> Self {
        SearchHit {
            title: item.title,
            link: item.link,
            snippet: item.snippet,
            display_link: item.display_link,
        }
    }
}

/// Client for one Custom Search engine.
///
/// Use [`GoogleSearchClient::new`] for production or
/// [`GoogleSearchClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct GoogleSearchClient {
    client: Client,
    api_key: String,
    cse_id: String,
    base_url: Url,
}

impl GoogleSearchClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Api`] if the built-in base URL fails to parse.
    pub fn new(client: Client, api_key: &str, cse_id: &str) -> Result<Self, SourceError> {
        Self::with_base_url(client, api_key, cse_id, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`SourceError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        client: Client,
        api_key: &str,
        cse_id: &str,
        base_url: &str,
    ) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url).map_err(|e| SourceError::Api {
            provider: "google",
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            cse_id: cse_id.to_owned(),
            base_url,
        })
    }

    /// Run one search, returning hits in ranking order.
    ///
    /// A response without `items` is an empty result, not an error.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] on network failure.
    /// - [`SourceError::UnexpectedStatus`] for non-2xx responses.
    /// - [`SourceError::Deserialize`] if the body is not the expected JSON.
    pub async fn search(
        &self,
        query: &str,
        result_count: u32,
    ) -> Result<Vec<SearchHit>, SourceError> {
        let num = result_count.to_string();
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: display_url(response.url()),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|source| SourceError::Deserialize {
                context: "google custom search response".to_string(),
                source,
            })?;

        Ok(parsed.items.into_iter().map(SearchHit::from).collect())
    }
}
