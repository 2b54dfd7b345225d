//! Mastodon account statuses from the account's home instance.

use compintel_core::{Engagement, MastodonAccount, PlatformPost};
use reqwest::{Client, Url};
use serde::Deserialize;

use super::get_json;
use crate::html::clean_text;
use crate::SourceError;

/// Largest `limit` the statuses endpoint accepts.
const MAX_PAGE_SIZE: u32 = 40;

#[derive(Debug, Deserialize)]
struct Account {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    id: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    content: String,
    url: Option<String>,
    #[serde(default)]
    favourites_count: u64,
    #[serde(default)]
    reblogs_count: u64,
    #[serde(default)]
    replies_count: u64,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    mentions: Vec<Mention>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Mention {
    acct: String,
}

impl From<Status> for PlatformPost {
    fn from(status: Status) -> Self {
        PlatformPost {
            id: status.id,
            text: clean_text(&status.content),
            created_at: status.created_at,
            url: status.url,
            engagement: Engagement::Mastodon {
                favourites: status.favourites_count,
                reblogs: status.reblogs_count,
                replies: status.replies_count,
            },
            hashtags: status.tags.into_iter().map(|t| t.name).collect(),
            mentions: status.mentions.into_iter().map(|m| m.acct).collect(),
        }
    }
}

/// Talks to whichever instance an account lives on.
///
/// [`MastodonClient::with_base_url`] pins every request to one server, which
/// is how tests point the client at a mock.
#[derive(Debug, Clone)]
pub struct MastodonClient {
    client: Client,
    base_override: Option<Url>,
}

impl MastodonClient {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_override: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`SourceError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(client: Client, base_url: &str) -> Result<Self, SourceError> {
        let base = parse_base(&format!("{}/", base_url.trim_end_matches('/')))?;
        Ok(Self {
            client,
            base_override: Some(base),
        })
    }

    fn base_for(&self, account: &MastodonAccount) -> Result<Url, SourceError> {
        match &self.base_override {
            Some(base) => Ok(base.clone()),
            None => parse_base(&format!("https://{}/", account.instance)),
        }
    }

    /// Up to `count` most recent statuses posted by `account`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnexpectedStatus`] when the account lookup
    /// fails (404 for unknown accounts) and other [`SourceError`]s for
    /// transport or decoding failures.
    pub async fn statuses(
        &self,
        account: &MastodonAccount,
        count: u32,
    ) -> Result<Vec<PlatformPost>, SourceError> {
        let base = self.base_for(account)?;

        let lookup_url = join(&base, "api/v1/accounts/lookup")?;
        let found: Account = get_json(
            self.client
                .get(lookup_url)
                .query(&[("acct", account.username.as_str())]),
            "mastodon account lookup response",
        )
        .await?;

        let statuses_url = join(&base, &format!("api/v1/accounts/{}/statuses", found.id))?;
        let wanted = count as usize;
        let mut posts: Vec<PlatformPost> = Vec::new();
        let mut max_id: Option<String> = None;

        while posts.len() < wanted {
            let remaining = u32::try_from(wanted - posts.len()).unwrap_or(MAX_PAGE_SIZE);
            let limit = remaining.min(MAX_PAGE_SIZE).to_string();
            let mut request = self
                .client
                .get(statuses_url.clone())
                .query(&[("limit", limit.as_str())]);
            if let Some(id) = &max_id {
                request = request.query(&[("max_id", id.as_str())]);
            }

            let page: Vec<Status> = get_json(request, "mastodon statuses response").await?;
            let Some(last) = page.last() else {
                break;
            };
            max_id = Some(last.id.clone());

            let take = wanted - posts.len();
            posts.extend(page.into_iter().take(take).map(PlatformPost::from));
        }

        Ok(posts)
    }
}

fn parse_base(raw: &str) -> Result<Url, SourceError> {
    Url::parse(raw).map_err(|e| SourceError::Api {
        provider: "mastodon",
        message: format!("invalid instance URL '{raw}': {e}"),
    })
}

fn join(base: &Url, path: &str) -> Result<Url, SourceError> {
    base.join(path).map_err(|e| SourceError::Api {
        provider: "mastodon",
        message: format!("invalid endpoint '{path}': {e}"),
    })
}
