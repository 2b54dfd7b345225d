//! Page retrieval and parsing for `fetch_document`.

use compintel_core::WebSection;
use reqwest::{header, Client, Url};

use crate::error::display_url;
use crate::html::{extract_body_text, extract_title, extract_top_image};
use crate::SourceError;

/// Fetches a URL and parses it into title, paragraph text and top image.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    client: Client,
}

impl DocumentClient {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// - [`SourceError::Http`] on network failure or an unparseable URL.
    /// - [`SourceError::UnexpectedStatus`] for non-2xx responses.
    /// - [`SourceError::NotADocument`] when the response is not HTML.
    pub async fn fetch(&self, url: &str) -> Result<WebSection, SourceError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let final_url = response.url().clone();
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: display_url(&final_url),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();
        if !content_type.is_empty() && !content_type.contains("html") {
            return Err(SourceError::NotADocument {
                url: display_url(&final_url),
                content_type,
            });
        }

        let body = response.text().await?;
        Ok(parse_document(&body, &final_url))
    }
}

/// Parse an HTML body; relative `og:image` URLs are resolved against `page_url`.
pub(crate) fn parse_document(html: &str, page_url: &Url) -> WebSection {
    let top_image = extract_top_image(html).and_then(|raw| {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Some(raw)
        } else {
            page_url.join(&raw).ok().map(String::from)
        }
    });

    WebSection {
        title: extract_title(html),
        text: extract_body_text(html),
        top_image,
    }
}
