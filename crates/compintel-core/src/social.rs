//! Social platform handles, posts, and the per-company social record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::HandleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Bluesky,
    Mastodon,
    Threads,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Bluesky,
        Platform::Mastodon,
        Platform::Threads,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Bluesky => "bluesky",
            Platform::Mastodon => "mastodon",
            Platform::Threads => "threads",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twitter" | "x" => Ok(Platform::Twitter),
            "bluesky" => Ok(Platform::Bluesky),
            "mastodon" => Ok(Platform::Mastodon),
            "threads" => Ok(Platform::Threads),
            _ => Err(HandleError::UnknownPlatform(s.to_string())),
        }
    }
}

/// A Mastodon account on a specific instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MastodonAccount {
    pub username: String,
    pub instance: String,
}

impl MastodonAccount {
    /// Parse `user`, `@user`, `user@instance` or `@user@instance`.
    ///
    /// Bare usernames are placed on `default_instance`.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::Malformed`] for empty parts, whitespace, or
    /// more than one instance separator.
    pub fn parse(raw: &str, default_instance: &str) -> Result<Self, HandleError> {
        let malformed = |reason| HandleError::Malformed {
            platform: "mastodon",
            handle: raw.to_string(),
            reason,
        };

        let trimmed = raw.trim();
        let body = trimmed.strip_prefix('@').unwrap_or(trimmed);
        if body.chars().any(char::is_whitespace) {
            return Err(malformed("contains whitespace"));
        }

        let (username, instance) = match body.split_once('@') {
            Some((user, instance)) => (user, instance),
            None => (body, default_instance),
        };

        if username.is_empty() {
            return Err(malformed("empty username"));
        }
        if instance.is_empty() {
            return Err(malformed("empty instance"));
        }
        if instance.contains('@') {
            return Err(malformed("more than one '@' separator"));
        }

        Ok(Self {
            username: username.to_string(),
            instance: instance.to_lowercase(),
        })
    }
}

impl std::fmt::Display for MastodonAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}@{}", self.username, self.instance)
    }
}

/// An account on one known platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum SocialHandle {
    Twitter { username: String },
    Bluesky { handle: String },
    Mastodon(MastodonAccount),
    Threads { username: String },
}

impl SocialHandle {
    /// Build a handle for `platform` from its user-facing string.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::Malformed`] when the string is empty or, for
    /// Mastodon, not a valid account.
    pub fn parse(
        platform: Platform,
        raw: &str,
        mastodon_default_instance: &str,
    ) -> Result<Self, HandleError> {
        let bare = raw.trim().trim_start_matches('@');
        if bare.is_empty() {
            return Err(HandleError::Malformed {
                platform: platform.as_str(),
                handle: raw.to_string(),
                reason: "empty handle",
            });
        }
        Ok(match platform {
            Platform::Twitter => SocialHandle::Twitter {
                username: bare.to_string(),
            },
            Platform::Bluesky => SocialHandle::Bluesky {
                handle: bare.to_string(),
            },
            Platform::Mastodon => {
                SocialHandle::Mastodon(MastodonAccount::parse(raw, mastodon_default_instance)?)
            }
            Platform::Threads => SocialHandle::Threads {
                username: bare.to_string(),
            },
        })
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            SocialHandle::Twitter { .. } => Platform::Twitter,
            SocialHandle::Bluesky { .. } => Platform::Bluesky,
            SocialHandle::Mastodon(_) => Platform::Mastodon,
            SocialHandle::Threads { .. } => Platform::Threads,
        }
    }
}

impl std::fmt::Display for SocialHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SocialHandle::Twitter { username } | SocialHandle::Threads { username } => {
                write!(f, "@{username}")
            }
            SocialHandle::Bluesky { handle } => write!(f, "@{handle}"),
            SocialHandle::Mastodon(account) => write!(f, "{account}"),
        }
    }
}

/// The handles supplied for one company, at most one per platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialHandles {
    handles: BTreeMap<Platform, SocialHandle>,
}

impl SocialHandles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(platform name, handle)` pairs.
    ///
    /// Blank handles are treated as not supplied.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError`] for unknown platform names or malformed handles.
    pub fn from_pairs<I, K, V>(pairs: I, mastodon_default_instance: &str) -> Result<Self, HandleError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut handles = Self::new();
        for (name, raw) in pairs {
            let platform: Platform = name.as_ref().parse()?;
            if raw.as_ref().trim().is_empty() {
                continue;
            }
            handles.insert(SocialHandle::parse(
                platform,
                raw.as_ref(),
                mastodon_default_instance,
            )?);
        }
        Ok(handles)
    }

    /// Adds or replaces the handle for its platform.
    pub fn insert(&mut self, handle: SocialHandle) {
        self.handles.insert(handle.platform(), handle);
    }

    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<&SocialHandle> {
        self.handles.get(&platform)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }
}

/// Platform-specific engagement counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Engagement {
    Twitter {
        retweet_count: u64,
        favorite_count: u64,
        reply_count: u64,
    },
    Bluesky {
        likes: u64,
        reposts: u64,
        replies: u64,
    },
    Mastodon {
        favourites: u64,
        reblogs: u64,
        replies: u64,
    },
    Threads {
        likes: u64,
        replies: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPost {
    pub id: String,
    pub text: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub engagement: Engagement,
    /// Tag names without the leading `#`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashtags: Vec<String>,
    /// Mentioned account names without the leading `@`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<String>,
}

/// Posts collected per platform for one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialRecord {
    company_name: String,
    timestamp: DateTime<Utc>,
    posts: BTreeMap<Platform, Vec<PlatformPost>>,
}

impl SocialRecord {
    /// Creates a record with an empty post list for every known platform.
    #[must_use]
    pub fn new(company_name: &str) -> Self {
        Self {
            company_name: company_name.to_string(),
            timestamp: Utc::now(),
            posts: Platform::ALL.iter().map(|p| (*p, Vec::new())).collect(),
        }
    }

    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn posts(&self, platform: Platform) -> &[PlatformPost] {
        self.posts.get(&platform).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn extend_posts(&mut self, platform: Platform, posts: impl IntoIterator<Item = PlatformPost>) {
        self.posts.entry(platform).or_default().extend(posts);
    }
}

/// Outcome of one platform fetch. `NotAttempted` means no handle was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformStatus {
    Succeeded,
    Failed,
    NotAttempted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocialStepResults(BTreeMap<Platform, PlatformStatus>);

impl Default for SocialStepResults {
    fn default() -> Self {
        Self(
            Platform::ALL
                .iter()
                .map(|p| (*p, PlatformStatus::NotAttempted))
                .collect(),
        )
    }
}

impl SocialStepResults {
    #[must_use]
    pub fn get(&self, platform: Platform) -> PlatformStatus {
        self.0
            .get(&platform)
            .copied()
            .unwrap_or(PlatformStatus::NotAttempted)
    }

    pub fn set(&mut self, platform: Platform, status: PlatformStatus) {
        self.0.insert(platform, status);
    }

    #[must_use]
    pub fn failed_platforms(&self) -> Vec<Platform> {
        self.0
            .iter()
            .filter(|(_, status)| **status == PlatformStatus::Failed)
            .map(|(platform, _)| *platform)
            .collect()
    }
}
