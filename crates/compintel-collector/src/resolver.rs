//! First-match-wins resolution over ordered candidate URLs.

use compintel_core::WebSection;
use compintel_sources::{SourceError, SourceFetcher};

/// Minimum `text` length, in characters, for a sub-page to be kept.
pub const MIN_SECTION_CHARS: usize = 100;

/// About-page variants, tried in order.
pub const ABOUT_PATHS: [&str; 4] = ["/about", "/about-us", "/company", "/our-company"];

/// Product-page variants, tried in order.
pub const PRODUCT_PATHS: [&str; 3] = ["/products", "/services", "/brands"];

/// Why a candidate was passed over.
#[derive(Debug)]
pub enum MissReason {
    Fetch(SourceError),
    BelowQualityBar { text_chars: usize },
}

/// A candidate that did not resolve, kept for observability.
#[derive(Debug)]
pub struct CandidateMiss {
    pub url: String,
    pub reason: MissReason,
}

/// Outcome of one resolution. `section` is `None` when every candidate
/// missed, which is an expected outcome rather than an error.
#[derive(Debug, Default)]
pub struct Resolution {
    pub section: Option<WebSection>,
    pub misses: Vec<CandidateMiss>,
}

/// The default quality bar for about and product pages.
#[must_use]
pub fn meets_quality_bar(section: &WebSection) -> bool {
    section.text_len() >= MIN_SECTION_CHARS
}

/// Try `candidates` in order and return the first page passing `quality_check`.
///
/// Fetch failures and quality misses both move on to the next candidate.
/// Candidates after the first accepted one are never fetched.
pub async fn resolve<Q>(
    fetcher: &dyn SourceFetcher,
    candidates: &[String],
    quality_check: Q,
) -> Resolution
where
    Q: Fn(&WebSection) -> bool,
{
    let mut misses = Vec::new();

    for url in candidates {
        match fetcher.fetch_document(url).await {
            Ok(section) if quality_check(&section) => {
                return Resolution {
                    section: Some(section),
                    misses,
                };
            }
            Ok(section) => {
                let text_chars = section.text_len();
                tracing::debug!(url = %url, text_chars, "candidate below quality bar");
                misses.push(CandidateMiss {
                    url: url.clone(),
                    reason: MissReason::BelowQualityBar { text_chars },
                });
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "candidate fetch failed");
                misses.push(CandidateMiss {
                    url: url.clone(),
                    reason: MissReason::Fetch(e),
                });
            }
        }
    }

    Resolution {
        section: None,
        misses,
    }
}

/// Strip trailing slashes and default to `https://` when no scheme is given.
///
/// Returns `None` for blank input.
#[must_use]
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        Some(raw.trim_end_matches('/').to_string())
    } else {
        Some(format!("https://{}", raw.trim_end_matches('/')))
    }
}

/// `base` (normalized) suffixed with each of `paths`, in order.
#[must_use]
pub fn candidate_urls(base: &str, paths: &[&str]) -> Vec<String> {
    let Some(base) = normalize_base_url(base) else {
        return Vec::new();
    };
    paths.iter().map(|path| format!("{base}{path}")).collect()
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
