//! Bluesky author feeds from the public AppView.

use compintel_core::{Engagement, PlatformPost};
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{get_json, hashtags_in, mentions_in};
use crate::SourceError;

const DEFAULT_BASE_URL: &str = "https://public.api.bsky.app/";
/// Largest `limit` `getAuthorFeed` accepts.
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
struct AuthorFeed {
    #[serde(default)]
    feed: Vec<FeedItem>,
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    post: PostView,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostView {
    uri: String,
    #[serde(default)]
    record: PostRecord,
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    repost_count: u64,
    #[serde(default)]
    reply_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostRecord {
    #[serde(default)]
    text: String,
    #[serde(default)]
    created_at: String,
}

impl PostView {
    fn into_post(self, handle: &str) -> PlatformPost {
        let url = self
            .uri
            .rsplit('/')
            .next()
            .filter(|rkey| !rkey.is_empty())
            .map(|rkey| format!("https://bsky.app/profile/{handle}/post/{rkey}"));
        PlatformPost {
            hashtags: hashtags_in(&self.record.text),
            mentions: mentions_in(&self.record.text),
            id: self.uri,
            text: self.record.text,
            created_at: self.record.created_at,
            url,
            engagement: Engagement::Bluesky {
                likes: self.like_count,
                reposts: self.repost_count,
                replies: self.reply_count,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlueskyClient {
    client: Client,
    base_url: Url,
}

impl BlueskyClient {
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
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SourceError::Api {
            provider: "bluesky",
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;
        Ok(Self { client, base_url })
    }

    /// Up to `count` most recent posts by `handle`, following feed cursors.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if any page request fails; posts from earlier
    /// pages are discarded in that case.
    pub async fn author_feed(
        &self,
        handle: &str,
        count: u32,
    ) -> Result<Vec<PlatformPost>, SourceError> {
        let url = self
            .base_url
            .join("xrpc/app.bsky.feed.getAuthorFeed")
            .map_err(|e| SourceError::Api {
                provider: "bluesky",
                message: format!("invalid endpoint: {e}"),
            })?;

        let wanted = count as usize;
        let mut posts = Vec::with_capacity(wanted.min(MAX_PAGE_SIZE as usize));
        let mut cursor: Option<String> = None;

        while posts.len() < wanted {
            let remaining = u32::try_from(wanted - posts.len()).unwrap_or(MAX_PAGE_SIZE);
            let limit = remaining.min(MAX_PAGE_SIZE).to_string();
            let mut request = self
                .client
                .get(url.clone())
                .query(&[("actor", handle), ("limit", limit.as_str())]);
            if let Some(c) = &cursor {
                request = request.query(&[("cursor", c.as_str())]);
            }

            let page: AuthorFeed = get_json(request, "bluesky getAuthorFeed response").await?;
            let page_len = page.feed.len();
            let take = wanted - posts.len();
            posts.extend(
                page.feed
                    .into_iter()
                    .take(take)
                    .map(|item| item.post.into_post(handle)),
            );

            match page.cursor {
                Some(next) if page_len > 0 => cursor = Some(next),
                _ => break,
            }
        }

        Ok(posts)
    }
}
