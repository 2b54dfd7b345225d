//! Competitor mentions from a keyword-seeded secondary search.

use compintel_core::{CompetitorMention, SearchHit};
use compintel_sources::{SourceError, SourceFetcher};

const COMPETITOR_MARKER: &str = "competitors";
const SEED_KEYWORDS: usize = 3;

/// `"{name} competitors in {k1} {k2} {k3}"`, or just `"{name} competitors"`
/// when no keywords are available.
#[must_use]
pub fn competitor_query(company_name: &str, keywords: &[String]) -> String {
    let seeds: Vec<&str> = keywords
        .iter()
        .take(SEED_KEYWORDS)
        .map(String::as_str)
        .collect();
    if seeds.is_empty() {
        format!("{company_name} {COMPETITOR_MARKER}")
    } else {
        format!("{company_name} {COMPETITOR_MARKER} in {}", seeds.join(" "))
    }
}

fn mentions_competitors(hit: &SearchHit) -> bool {
    hit.title.to_lowercase().contains(COMPETITOR_MARKER)
        || hit.snippet.to_lowercase().contains(COMPETITOR_MARKER)
}

/// Run the competitor search and keep hits that mention competitors.
///
/// # Errors
///
/// Returns the search's [`SourceError`] unchanged.
pub async fn try_infer_competitors(
    fetcher: &dyn SourceFetcher,
    company_name: &str,
    keywords: &[String],
    result_count: u32,
) -> Result<Vec<CompetitorMention>, SourceError> {
    let query = competitor_query(company_name, keywords);
    let hits = fetcher.web_search(&query, result_count).await?;
    Ok(hits
        .into_iter()
        .filter(mentions_competitors)
        .map(|hit| CompetitorMention {
            source: hit.link,
            title: hit.title,
            snippet: hit.snippet,
        })
        .collect())
}

/// Like [`try_infer_competitors`], but a failed search yields no mentions.
pub async fn infer_competitors(
    fetcher: &dyn SourceFetcher,
    company_name: &str,
    keywords: &[String],
    result_count: u32,
) -> Vec<CompetitorMention> {
    match try_infer_competitors(fetcher, company_name, keywords, result_count).await {
        Ok(mentions) => mentions,
        Err(e) => {
            tracing::warn!(company = %company_name, source = "competitors", error = %e, "competitor search failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{hit, ScriptedFetcher};

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn query_uses_first_three_keywords() {
        assert_eq!(
            competitor_query("Acme", &kw(&["anvils", "rockets", "skates", "glue"])),
            "Acme competitors in anvils rockets skates"
        );
        assert_eq!(
            competitor_query("Acme", &kw(&["anvils"])),
            "Acme competitors in anvils"
        );
    }

    #[test]
    fn empty_keywords_use_only_the_company_name() {
        assert_eq!(competitor_query("Acme", &[]), "Acme competitors");
    }

    #[tokio::test]
    async fn keeps_only_hits_mentioning_competitors() {
        let fetcher = ScriptedFetcher::new().search(
            "Acme competitors in anvils",
            vec![
                hit("Top Acme Competitors", "https://a.example", "list", None),
                hit("Acme review", "https://b.example", "Acme and its COMPETITORS compared", None),
                hit("Acme careers", "https://c.example", "Join us", None),
            ],
        );

        let mentions = infer_competitors(&fetcher, "Acme", &kw(&["anvils"]), 10).await;

        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].source, "https://a.example");
        assert_eq!(mentions[1].title, "Acme review");
    }

    #[tokio::test]
    async fn failed_search_degrades_to_no_mentions() {
        let fetcher = ScriptedFetcher::new().failing_search("Acme competitors");

        assert!(infer_competitors(&fetcher, "Acme", &[], 10).await.is_empty());
        assert!(try_infer_competitors(&fetcher, "Acme", &[], 10).await.is_err());
    }
}
