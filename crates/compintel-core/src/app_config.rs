use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which backend serves `news_search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsProvider {
    NewsApi,
    GoogleRss,
}

impl std::fmt::Display for NewsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsProvider::NewsApi => write!(f, "newsapi"),
            NewsProvider::GoogleRss => write!(f, "google_rss"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub output_dir: PathBuf,
    pub companies_path: PathBuf,
    pub google_api_key: Option<String>,
    pub google_cse_id: Option<String>,
    pub news_api_key: Option<String>,
    pub news_provider: NewsProvider,
    pub twitter_auth_token: Option<String>,
    pub twitter_ct0: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_result_count: u32,
    pub news_days_back: u32,
    pub social_post_count: u32,
    pub mastodon_default_instance: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("output_dir", &self.output_dir)
            .field("companies_path", &self.companies_path)
            .field("google_api_key", &redact(&self.google_api_key))
            .field("google_cse_id", &self.google_cse_id)
            .field("news_api_key", &redact(&self.news_api_key))
            .field("news_provider", &self.news_provider)
            .field("twitter_auth_token", &redact(&self.twitter_auth_token))
            .field("twitter_ct0", &redact(&self.twitter_ct0))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("search_result_count", &self.search_result_count)
            .field("news_days_back", &self.news_days_back)
            .field("social_post_count", &self.social_post_count)
            .field("mastodon_default_instance", &self.mastodon_default_instance)
            .finish()
    }
}
