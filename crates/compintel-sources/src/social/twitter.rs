//! Twitter/X timelines via the `bird` CLI.
//!
//! Invokes `bird user-tweets {handle} --json -n {count} --auth-token ... --ct0 ...`
//! as a subprocess and decodes its JSON array output.

use compintel_core::{Engagement, PlatformPost};
use serde::Deserialize;

use super::{hashtags_in, mentions_in};
use crate::SourceError;

const DEFAULT_PROGRAM: &str = "bird";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BirdTweet {
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    retweet_count: u64,
    #[serde(default)]
    reply_count: u64,
}

/// Runs `bird` with one set of session credentials.
#[derive(Clone)]
pub struct BirdClient {
    program: String,
    auth_token: String,
    ct0: String,
}

impl std::fmt::Debug for BirdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BirdClient")
            .field("program", &self.program)
            .field("auth_token", &"[redacted]")
            .field("ct0", &"[redacted]")
            .finish()
    }
}

impl BirdClient {
    #[must_use]
    pub fn new(auth_token: &str, ct0: &str) -> Self {
        Self::with_program(DEFAULT_PROGRAM, auth_token, ct0)
    }

    /// Use a specific executable instead of `bird` on `PATH`.
    #[must_use]
    pub fn with_program(program: &str, auth_token: &str, ct0: &str) -> Self {
        Self {
            program: program.to_owned(),
            auth_token: auth_token.to_owned(),
            ct0: ct0.to_owned(),
        }
    }

    /// The `count` most recent tweets from `username`'s own timeline.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Subprocess`] if `bird` cannot be spawned or
    /// exits non-zero, and [`SourceError::Deserialize`] if its output is not
    /// a JSON tweet array.
    pub async fn user_tweets(
        &self,
        username: &str,
        count: u32,
    ) -> Result<Vec<PlatformPost>, SourceError> {
        let count = count.to_string();
        let output = tokio::process::Command::new(&self.program)
            .args([
                "user-tweets",
                username,
                "--json",
                "-n",
                count.as_str(),
                "--auth-token",
                self.auth_token.as_str(),
                "--ct0",
                self.ct0.as_str(),
            ])
            .output()
            .await
            .map_err(|e| SourceError::Subprocess(format!("{} user-tweets: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::Subprocess(format!(
                "{} user-tweets exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        parse_bird_output(&output.stdout, username)
    }
}

pub(crate) fn parse_bird_output(
    stdout: &[u8],
    username: &str,
) -> Result<Vec<PlatformPost>, SourceError> {
    let tweets: Vec<BirdTweet> =
        serde_json::from_slice(stdout).map_err(|source| SourceError::Deserialize {
            context: "bird user-tweets output".to_string(),
            source,
        })?;

    Ok(tweets
        .into_iter()
        .map(|tweet| PlatformPost {
            url: Some(format!("https://x.com/{username}/status/{}", tweet.id)),
            hashtags: hashtags_in(&tweet.text),
            mentions: mentions_in(&tweet.text),
            id: tweet.id,
            text: tweet.text,
            created_at: tweet.created_at,
            engagement: Engagement::Twitter {
                retweet_count: tweet.retweet_count,
                favorite_count: tweet.like_count,
                reply_count: tweet.reply_count,
            },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tweets_with_engagement() {
        let json = br#"[
            {"id": "1001", "text": "Quarterly results are out #HDFC via @ir_desk", "createdAt": "2026-10-01T09:00:00Z",
             "likeCount": 42, "retweetCount": 7, "replyCount": 3,
             "author": {"username": "HDFC_Bank"}},
            {"id": "1002", "text": "Branch hours update"}
        ]"#;
        let posts = parse_bird_output(json, "HDFC_Bank").unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "1001");
        assert_eq!(
            posts[0].url.as_deref(),
            Some("https://x.com/HDFC_Bank/status/1001")
        );
        assert_eq!(
            posts[0].engagement,
            Engagement::Twitter {
                retweet_count: 7,
                favorite_count: 42,
                reply_count: 3
            }
        );
        assert_eq!(posts[0].hashtags, vec!["HDFC"]);
        assert_eq!(posts[0].mentions, vec!["ir_desk"]);
        assert_eq!(posts[1].created_at, "");
        assert!(posts[1].hashtags.is_empty());
    }

    #[test]
    fn non_json_output_is_a_deserialize_error() {
        let err = parse_bird_output(b"rate limited", "acme").unwrap_err();
        assert!(matches!(err, SourceError::Deserialize { .. }));
    }

    #[tokio::test]
    async fn missing_program_is_a_subprocess_error() {
        let client = BirdClient::with_program("compintel-no-such-bird-binary", "tok", "ct0");
        let err = client.user_tweets("acme", 5).await.unwrap_err();
        assert!(matches!(err, SourceError::Subprocess(_)));
    }

    #[test]
    fn debug_redacts_credentials() {
        let client = BirdClient::new("secret-token", "secret-ct0");
        let shown = format!("{client:?}");
        assert!(!shown.contains("secret"));
    }
}
