//! Google News RSS search, the keyless alternative `news_search` backend.

use chrono::NaiveDate;
use compintel_core::NewsItem;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::{Client, Url};

use crate::error::display_url;
use crate::html::clean_text;
use crate::SourceError;

const DEFAULT_BASE_URL: &str = "https://news.google.com/rss/search";

#[derive(Debug, Clone)]
pub struct GoogleNewsRssClient {
    client: Client,
    base_url: Url,
}

impl GoogleNewsRssClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Api`] if the built-in base URL fails to parse.
    pub fn new(client: Client) -> Result<Self, SourceError> {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`SourceError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(client: Client, base_url: &str) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url).map_err(|e| SourceError::Api {
            provider: "google_news_rss",
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;
        Ok(Self { client, base_url })
    }

    /// # Errors
    ///
    /// Returns [`SourceError::Http`] on network failure,
    /// [`SourceError::UnexpectedStatus`] for non-2xx responses, or
    /// [`SourceError::Xml`] on a malformed feed.
    pub async fn search(&self, query: &str, since: NaiveDate) -> Result<Vec<NewsItem>, SourceError> {
        let q = format!("{query} after:{}", since.format("%Y-%m-%d"));
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("q", q.as_str()),
                ("hl", "en-US"),
                ("gl", "US"),
                ("ceid", "US:en"),
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
        parse_rss_feed(&body)
    }
}

#[derive(Default)]
struct ItemFields {
    title: String,
    link: String,
    pub_date: String,
    source: String,
    description: String,
}

impl ItemFields {
    fn set(&mut self, tag: &str, text: String) {
        match tag {
            "title" => self.title = text,
            "link" => self.link = text,
            "pubDate" => self.pub_date = text,
            "source" => self.source = text,
            "description" => self.description = clean_text(&text),
            _ => {}
        }
    }

    fn into_news_item(self) -> NewsItem {
        NewsItem {
            title: self.title,
            source: self.source,
            url: self.link,
            published_at: self.pub_date,
            content: None,
            description: Some(self.description).filter(|d| !d.is_empty()),
        }
    }
}

/// Parse an RSS feed body into news items; items without a link are dropped.
///
/// # Errors
///
/// Returns [`SourceError::Xml`] if the XML is malformed.
pub(crate) fn parse_rss_feed(xml: &str) -> Result<Vec<NewsItem>, SourceError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<ItemFields> = None;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "item" {
                    current = Some(ItemFields::default());
                } else {
                    current_tag = name;
                }
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                if name == "item" {
                    if let Some(fields) = current.take() {
                        if !fields.link.is_empty() {
                            items.push(fields.into_news_item());
                        }
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if let Some(fields) = current.as_mut() {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    fields.set(&current_tag, text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(fields) = current.as_mut() {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    fields.set(&current_tag, text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SourceError::Xml(e)),
            _ => {}
        }
    }

    Ok(items)
}
