//! Shared data model and configuration for company intelligence collection.

pub mod app_config;
pub mod companies;
pub mod config;
pub mod error;
pub mod record;
pub mod social;

pub use app_config::{AppConfig, Environment, NewsProvider};
pub use companies::{load_companies, CompaniesFile, CompanyConfig, SocialConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, HandleError};
pub use record::{
    record_slug, BasicInfo, CollectionRecord, CompanyStepResults, CompetitorMention, NewsItem,
    SearchHit, Section, WebSection, NEWS_CAP,
};
pub use social::{
    Engagement, MastodonAccount, Platform, PlatformPost, PlatformStatus, SocialHandle,
    SocialHandles, SocialRecord, SocialStepResults,
};
