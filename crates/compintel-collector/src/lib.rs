//! Collection pipelines over a [`compintel_sources::SourceFetcher`].
//!
//! The [`Orchestrator`] runs the company pipeline and, when handles are
//! supplied, the social pipeline, then hands both records to a
//! [`RecordStore`]. Source failures become step results; only storage
//! failures escape as [`CollectError`].

pub mod company;
pub mod competitors;
pub mod error;
pub mod keywords;
pub mod orchestrator;
pub mod resolver;
pub mod settings;
pub mod social;
pub mod store;

#[cfg(test)]
mod testing;

pub use company::{collect_company, CompanyCollection};
pub use competitors::{competitor_query, infer_competitors, try_infer_competitors};
pub use error::{CollectError, StoreError};
pub use keywords::{extract_keywords, keyword_texts, KeywordConfig};
pub use orchestrator::{CollectionRun, CollectionSummary, Orchestrator};
pub use resolver::{
    candidate_urls, meets_quality_bar, normalize_base_url, resolve, CandidateMiss, MissReason,
    Resolution, ABOUT_PATHS, MIN_SECTION_CHARS, PRODUCT_PATHS,
};
pub use settings::CollectorSettings;
pub use social::{collect_social, SocialCollection};
pub use store::{JsonFileStore, RecordStore};
