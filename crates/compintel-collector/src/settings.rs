use compintel_core::AppConfig;

use crate::KeywordConfig;

/// Tunables the pipelines read; built from [`AppConfig`] in production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorSettings {
    pub search_result_count: u32,
    pub news_days_back: u32,
    pub social_post_count: u32,
    pub keywords: KeywordConfig,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            search_result_count: 10,
            news_days_back: 30,
            social_post_count: 200,
            keywords: KeywordConfig::default(),
        }
    }
}

impl CollectorSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            search_result_count: config.search_result_count,
            news_days_back: config.news_days_back,
            social_post_count: config.social_post_count,
            keywords: KeywordConfig::default(),
        }
    }
}
