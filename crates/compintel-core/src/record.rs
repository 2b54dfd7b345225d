//! The aggregate company record and the pieces it is assembled from.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most news items a single record keeps, in source relevance order.
pub const NEWS_CAP: usize = 20;

/// Identity fields fixed when the record is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicInfo {
    name: String,
    description: String,
    timestamp: DateTime<Utc>,
    #[serde(rename = "official_website", skip_serializing_if = "Option::is_none")]
    official_website_url: Option<String>,
}

impl BasicInfo {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn official_website_url(&self) -> Option<&str> {
        self.official_website_url.as_deref()
    }
}

/// Website sections the collector looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Main,
    About,
    Products,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Main => write!(f, "main"),
            Section::About => write!(f, "about"),
            Section::Products => write!(f, "products"),
        }
    }
}

/// Parsed content of one fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSection {
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_image: Option<String>,
}

impl WebSection {
    /// Character count of `text`, as opposed to its byte length.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub url: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub content: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Display domain reported by the search backend, used only for
    /// official-website discovery.
    #[serde(default, skip_serializing)]
    pub display_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorMention {
    pub source: String,
    pub title: String,
    pub snippet: String,
}

/// Everything collected about one company during one run.
///
/// Identity is fixed at construction. Collections only grow, and each
/// website section is written at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionRecord {
    basic_info: BasicInfo,
    news: Vec<NewsItem>,
    website_content: BTreeMap<Section, WebSection>,
    industry_keywords: Vec<String>,
    competitors: Vec<CompetitorMention>,
    search_results: Vec<SearchHit>,
}

impl CollectionRecord {
    #[must_use]
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            basic_info: BasicInfo {
                name: name.to_string(),
                description: description.to_string(),
                timestamp: Utc::now(),
                official_website_url: None,
            },
            news: Vec::new(),
            website_content: BTreeMap::new(),
            industry_keywords: Vec::new(),
            competitors: Vec::new(),
            search_results: Vec::new(),
        }
    }

    #[must_use]
    pub fn basic_info(&self) -> &BasicInfo {
        &self.basic_info
    }

    #[must_use]
    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    #[must_use]
    pub fn website_content(&self) -> &BTreeMap<Section, WebSection> {
        &self.website_content
    }

    #[must_use]
    pub fn section(&self, section: Section) -> Option<&WebSection> {
        self.website_content.get(&section)
    }

    #[must_use]
    pub fn industry_keywords(&self) -> &[String] {
        &self.industry_keywords
    }

    #[must_use]
    pub fn competitors(&self) -> &[CompetitorMention] {
        &self.competitors
    }

    #[must_use]
    pub fn search_results(&self) -> &[SearchHit] {
        &self.search_results
    }

    /// Sets the official website unless one was already adopted.
    ///
    /// Returns `true` when `url` was adopted.
    pub fn adopt_official_website(&mut self, url: &str) -> bool {
        if self.basic_info.official_website_url.is_some() {
            return false;
        }
        self.basic_info.official_website_url = Some(url.to_string());
        true
    }

    /// Appends news items until [`NEWS_CAP`] is reached; returns how many were kept.
    pub fn extend_news(&mut self, items: impl IntoIterator<Item = NewsItem>) -> usize {
        let room = NEWS_CAP.saturating_sub(self.news.len());
        let before = self.news.len();
        self.news.extend(items.into_iter().take(room));
        self.news.len() - before
    }

    /// Stores `content` under `section` if that section is still empty.
    ///
    /// Returns `false` (and drops `content`) when the section was already set.
    pub fn set_section(&mut self, section: Section, content: WebSection) -> bool {
        match self.website_content.entry(section) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(content);
                true
            }
        }
    }

    pub fn extend_keywords(&mut self, keywords: impl IntoIterator<Item = String>) {
        self.industry_keywords.extend(keywords);
    }

    pub fn extend_competitors(&mut self, mentions: impl IntoIterator<Item = CompetitorMention>) {
        for mention in mentions {
            if !self.competitors.contains(&mention) {
                self.competitors.push(mention);
            }
        }
    }

    pub fn extend_search_results(&mut self, hits: impl IntoIterator<Item = SearchHit>) {
        self.search_results.extend(hits);
    }
}

/// Per-step outcome of one company collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyStepResults {
    #[serde(rename = "google_search")]
    pub search: bool,
    pub news: bool,
    pub website: bool,
    pub keywords: bool,
    pub competitors: bool,
}

/// File-name stem for a company: lower-cased with spaces replaced by `_`.
#[must_use]
pub fn record_slug(company_name: &str) -> String {
    company_name.replace(' ', "_").to_lowercase()
}
