//! Scripted fetcher and in-memory store shared by the pipeline tests.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use compintel_core::{
    Engagement, NewsItem, Platform, PlatformPost, SearchHit, SocialHandle, WebSection,
};
use compintel_sources::{SourceError, SourceFetcher};

use crate::{RecordStore, StoreError};

fn scripted_failure(what: &str) -> SourceError {
    SourceError::Api {
        provider: "scripted",
        message: format!("{what} scripted to fail"),
    }
}

/// Canned responses keyed by query, URL or platform. Anything unscripted fails.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    searches: HashMap<String, Option<Vec<SearchHit>>>,
    news: Option<Vec<NewsItem>>,
    documents: HashMap<String, Option<WebSection>>,
    timelines: HashMap<Platform, Option<Vec<PlatformPost>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn search(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.searches.insert(query.to_string(), Some(hits));
        self
    }

    pub(crate) fn failing_search(mut self, query: &str) -> Self {
        self.searches.insert(query.to_string(), None);
        self
    }

    pub(crate) fn news(mut self, items: Vec<NewsItem>) -> Self {
        self.news = Some(items);
        self
    }

    pub(crate) fn document(mut self, url: &str, section: WebSection) -> Self {
        self.documents.insert(url.to_string(), Some(section));
        self
    }

    pub(crate) fn failing_document(mut self, url: &str) -> Self {
        self.documents.insert(url.to_string(), None);
        self
    }

    pub(crate) fn timeline(mut self, platform: Platform, posts: Vec<PlatformPost>) -> Self {
        self.timelines.insert(platform, Some(posts));
        self
    }

    pub(crate) fn failing_timeline(mut self, platform: Platform) -> Self {
        self.timelines.insert(platform, None);
        self
    }

    /// Every call so far, as `kind:argument`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn document_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("document:").map(str::to_string))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl SourceFetcher for ScriptedFetcher {
    async fn web_search(
        &self,
        query: &str,
        _result_count: u32,
    ) -> Result<Vec<SearchHit>, SourceError> {
        self.record(format!("search:{query}"));
        self.searches
            .get(query)
            .cloned()
            .flatten()
            .ok_or_else(|| scripted_failure("search"))
    }

    async fn news_search(
        &self,
        query: &str,
        _since: NaiveDate,
    ) -> Result<Vec<NewsItem>, SourceError> {
        self.record(format!("news:{query}"));
        self.news.clone().ok_or_else(|| scripted_failure("news"))
    }

    async fn fetch_document(&self, url: &str) -> Result<WebSection, SourceError> {
        self.record(format!("document:{url}"));
        self.documents
            .get(url)
            .cloned()
            .flatten()
            .ok_or_else(|| scripted_failure("document"))
    }

    async fn fetch_social_timeline(
        &self,
        handle: &SocialHandle,
        _count: u32,
    ) -> Result<Vec<PlatformPost>, SourceError> {
        let platform = handle.platform();
        self.record(format!("social:{platform}"));
        self.timelines
            .get(&platform)
            .cloned()
            .flatten()
            .ok_or_else(|| scripted_failure("timeline"))
    }
}

/// Keeps written records in memory; can be told to fail every write.
#[derive(Default)]
pub(crate) struct MemoryStore {
    records: Mutex<BTreeMap<String, serde_json::Value>>,
    fail: bool,
}

impl MemoryStore {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<serde_json::Value> {
        self.records.lock().expect("records lock").get(name).cloned()
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.records.lock().expect("records lock").keys().cloned().collect()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn write(&self, name: &str, record: &serde_json::Value) -> Result<String, StoreError> {
        if self.fail {
            return Err(StoreError::Io {
                path: PathBuf::from(name),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.records
            .lock()
            .expect("records lock")
            .insert(name.to_string(), record.clone());
        Ok(format!("memory://{name}"))
    }
}

pub(crate) fn section(text: &str) -> WebSection {
    WebSection {
        title: "Page".to_string(),
        text: text.to_string(),
        top_image: None,
    }
}

pub(crate) fn long_text(seed: &str) -> String {
    let mut text = String::new();
    while text.chars().count() < 120 {
        text.push_str(seed);
        text.push(' ');
    }
    text
}

pub(crate) fn hit(title: &str, link: &str, snippet: &str, display_link: Option<&str>) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        link: link.to_string(),
        snippet: snippet.to_string(),
        display_link: display_link.map(str::to_string),
    }
}

pub(crate) fn news_item(content: Option<&str>, description: Option<&str>) -> NewsItem {
    NewsItem {
        title: "headline".to_string(),
        source: "Wire".to_string(),
        url: "https://wire.example/story".to_string(),
        published_at: "2026-10-01T00:00:00Z".to_string(),
        content: content.map(str::to_string),
        description: description.map(str::to_string),
    }
}

pub(crate) fn post(id: &str) -> PlatformPost {
    PlatformPost {
        id: id.to_string(),
        text: format!("post {id}"),
        created_at: "2026-10-01T00:00:00Z".to_string(),
        url: None,
        engagement: Engagement::Bluesky {
            likes: 1,
            reposts: 0,
            replies: 0,
        },
        hashtags: Vec::new(),
        mentions: Vec::new(),
    }
}
