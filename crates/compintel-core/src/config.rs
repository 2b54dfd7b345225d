use crate::app_config::{AppConfig, Environment, NewsProvider};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or a key pair is incomplete.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or a key pair is incomplete.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Vendor keys are optional: a source without credentials fails at fetch
/// time and is recorded as a failed step rather than refusing to start.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("COMPINTEL_ENV", "development"))?;
    let log_level = or_default("COMPINTEL_LOG_LEVEL", "info");
    let output_dir = PathBuf::from(or_default("COMPINTEL_OUTPUT_DIR", "./data"));
    let companies_path = PathBuf::from(or_default(
        "COMPINTEL_COMPANIES_PATH",
        "./config/companies.yaml",
    ));

    let google_api_key = optional("GOOGLE_API_KEY");
    let google_cse_id = optional("GOOGLE_CSE_ID");
    if google_api_key.is_some() && google_cse_id.is_none() {
        return Err(ConfigError::MissingEnvVar("GOOGLE_CSE_ID".to_string()));
    }

    let news_api_key = optional("NEWS_API_KEY");
    let news_provider = parse_news_provider(&or_default("COMPINTEL_NEWS_PROVIDER", "newsapi"))?;
    let twitter_auth_token = optional("TWITTER_AUTH_TOKEN");
    let twitter_ct0 = optional("TWITTER_CT0");

    let request_timeout_secs = parse_u64("COMPINTEL_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "COMPINTEL_USER_AGENT",
        "compintel/0.1 (company-intelligence)",
    );
    let search_result_count = parse_u32("COMPINTEL_SEARCH_RESULT_COUNT", "10")?;
    let news_days_back = parse_u32("COMPINTEL_NEWS_DAYS_BACK", "30")?;
    let social_post_count = parse_u32("COMPINTEL_SOCIAL_POST_COUNT", "200")?;
    let mastodon_default_instance =
        or_default("COMPINTEL_MASTODON_DEFAULT_INSTANCE", "mastodon.social");

    Ok(AppConfig {
        env,
        log_level,
        output_dir,
        companies_path,
        google_api_key,
        google_cse_id,
        news_api_key,
        news_provider,
        twitter_auth_token,
        twitter_ct0,
        request_timeout_secs,
        user_agent,
        search_result_count,
        news_days_back,
        social_post_count,
        mastodon_default_instance,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "COMPINTEL_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_news_provider(s: &str) -> Result<NewsProvider, ConfigError> {
    match s {
        "newsapi" => Ok(NewsProvider::NewsApi),
        "google_rss" => Ok(NewsProvider::GoogleRss),
        other => Err(ConfigError::InvalidEnvVar {
            var: "COMPINTEL_NEWS_PROVIDER".to_string(),
            reason: format!("unknown news provider '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
