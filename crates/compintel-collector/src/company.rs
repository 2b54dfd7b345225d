//! The company collection pipeline: Search, News, Website, Keywords,
//! Competitors, strictly in that order.

use chrono::{Days, NaiveDate, Utc};
use compintel_core::{CollectionRecord, CompanyStepResults, SearchHit, Section};
use compintel_sources::SourceFetcher;

use crate::competitors::try_infer_competitors;
use crate::keywords::{extract_keywords, keyword_texts};
use crate::resolver::{
    candidate_urls, meets_quality_bar, normalize_base_url, resolve, ABOUT_PATHS, PRODUCT_PATHS,
};
use crate::CollectorSettings;

/// The filled record and one outcome per step.
#[derive(Debug)]
pub struct CompanyCollection {
    pub record: CollectionRecord,
    pub steps: CompanyStepResults,
}

/// Run every company step; a failed step is recorded and the next one runs
/// with whatever the record already holds.
pub async fn collect_company(
    fetcher: &dyn SourceFetcher,
    settings: &CollectorSettings,
    name: &str,
    description: &str,
) -> CompanyCollection {
    let mut record = CollectionRecord::new(name, description);
    let mut steps = CompanyStepResults::default();

    steps.search = search_step(fetcher, settings, &mut record).await;
    steps.news = news_step(fetcher, settings, &mut record).await;
    steps.website = website_step(fetcher, &mut record).await;
    steps.keywords = keywords_step(settings, &mut record);
    steps.competitors = competitors_step(fetcher, settings, &mut record).await;

    CompanyCollection { record, steps }
}

async fn search_step(
    fetcher: &dyn SourceFetcher,
    settings: &CollectorSettings,
    record: &mut CollectionRecord,
) -> bool {
    let name = record.basic_info().name().to_string();
    let query = format!("{name} company information");

    match fetcher.web_search(&query, settings.search_result_count).await {
        Ok(hits) if hits.is_empty() => {
            tracing::warn!(company = %name, source = "search", "search returned no items");
            false
        }
        Ok(hits) => {
            if let Some(url) = discover_official_website(&name, &hits) {
                record.adopt_official_website(url);
                tracing::info!(company = %name, url, "official website discovered");
            }
            let count = hits.len();
            record.extend_search_results(hits);
            tracing::info!(company = %name, count, "search step complete");
            true
        }
        Err(e) => {
            tracing::warn!(company = %name, source = "search", error = %e, "search step failed");
            false
        }
    }
}

async fn news_step(
    fetcher: &dyn SourceFetcher,
    settings: &CollectorSettings,
    record: &mut CollectionRecord,
) -> bool {
    let name = record.basic_info().name().to_string();
    let since = news_since(Utc::now().date_naive(), settings.news_days_back);

    match fetcher.news_search(&name, since).await {
        Ok(items) => {
            let kept = record.extend_news(items);
            tracing::info!(company = %name, count = kept, since = %since, "news step complete");
            true
        }
        Err(e) => {
            tracing::warn!(company = %name, source = "news", error = %e, "news step failed");
            false
        }
    }
}

/// The main page only needs to fetch. About and product pages are optional
/// and do not affect the step outcome.
async fn website_step(fetcher: &dyn SourceFetcher, record: &mut CollectionRecord) -> bool {
    let name = record.basic_info().name().to_string();
    let Some(website) = record.basic_info().official_website_url().map(str::to_string) else {
        tracing::warn!(company = %name, source = "website", "no official website to fetch");
        return false;
    };

    let main = resolve(fetcher, std::slice::from_ref(&website), |_| true).await;
    let Some(main_section) = main.section else {
        tracing::warn!(company = %name, source = "website", url = %website, "main page fetch failed");
        return false;
    };
    record.set_section(Section::Main, main_section);

    let base = normalize_base_url(&website).unwrap_or_default();
    for (section, paths) in [
        (Section::About, &ABOUT_PATHS[..]),
        (Section::Products, &PRODUCT_PATHS[..]),
    ] {
        let resolution = resolve(fetcher, &candidate_urls(&base, paths), meets_quality_bar).await;
        match resolution.section {
            Some(content) => {
                record.set_section(section, content);
            }
            None => tracing::debug!(
                company = %name,
                %section,
                tried = resolution.misses.len(),
                "no candidate met the quality bar"
            ),
        }
    }

    tracing::info!(
        company = %name,
        sections = record.website_content().len(),
        "website step complete"
    );
    true
}

fn keywords_step(settings: &CollectorSettings, record: &mut CollectionRecord) -> bool {
    let texts: Vec<Option<&str>> = keyword_texts(record).into_iter().map(Some).collect();
    let keywords = extract_keywords(&texts, &settings.keywords);
    let count = keywords.len();
    record.extend_keywords(keywords);
    tracing::info!(company = %record.basic_info().name(), count, "keywords step complete");
    true
}

async fn competitors_step(
    fetcher: &dyn SourceFetcher,
    settings: &CollectorSettings,
    record: &mut CollectionRecord,
) -> bool {
    let name = record.basic_info().name().to_string();
    let result = try_infer_competitors(
        fetcher,
        &name,
        record.industry_keywords(),
        settings.search_result_count,
    )
    .await;

    match result {
        Ok(mentions) => {
            let count = mentions.len();
            record.extend_competitors(mentions);
            tracing::info!(company = %name, count, "competitors step complete");
            true
        }
        Err(e) => {
            tracing::warn!(company = %name, source = "competitors", error = %e, "competitors step failed");
            false
        }
    }
}

/// `today` minus `days_back`, clamped to the earliest representable date.
pub(crate) fn news_since(today: NaiveDate, days_back: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days_back)))
        .unwrap_or(NaiveDate::MIN)
}

/// Link of the first hit whose domain and the company name contain one
/// another, compared case-insensitively. An empty domain never matches.
pub(crate) fn discover_official_website<'a>(name: &str, hits: &'a [SearchHit]) -> Option<&'a str> {
    let needle = name.to_lowercase();
    if needle.is_empty() {
        return None;
    }

    hits.iter()
        .filter(|hit| !hit.link.is_empty())
        .find(|hit| {
            let domain = hit
                .display_link
                .as_deref()
                .map_or_else(|| host_of(&hit.link), str::to_string)
                .to_lowercase();
            !domain.is_empty() && (domain.contains(&needle) || needle.contains(&domain))
        })
        .map(|hit| hit.link.as_str())
}

fn host_of(link: &str) -> String {
    let rest = link.split_once("://").map_or(link, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().unwrap_or_default().to_string()
}

#[cfg(test)]
#[path = "company_test.rs"]
mod tests;
