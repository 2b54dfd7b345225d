//! Per-platform timeline fetchers behind `fetch_social_timeline`.

pub mod bluesky;
pub mod mastodon;
pub mod twitter;

pub use bluesky::BlueskyClient;
pub use mastodon::MastodonClient;
pub use twitter::BirdClient;

use std::sync::LazyLock;

use regex::Regex;

use crate::SourceError;

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w&])#(\w+)").expect("valid hashtag regex"));
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w])@([\w.]*\w)").expect("valid mention regex"));

/// `#tag` names in `text`, in order of appearance.
pub(crate) fn hashtags_in(text: &str) -> Vec<String> {
    captured(&HASHTAG_RE, text)
}

/// `@account` names in `text`; email addresses are not mentions.
pub(crate) fn mentions_in(text: &str) -> Vec<String> {
    captured(&MENTION_RE, text)
}

fn captured(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Threads exposes no public timeline API, so every fetch fails.
pub(crate) fn threads_unsupported() -> SourceError {
    SourceError::Unsupported {
        platform: "threads",
        reason: "no public API",
    }
}

/// Send `request` and decode a 2xx JSON body as `T`.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
    context: &str,
) -> Result<T, SourceError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            status: status.as_u16(),
            url: crate::error::display_url(response.url()),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| SourceError::Deserialize {
        context: context.to_string(),
        source,
    })
}
