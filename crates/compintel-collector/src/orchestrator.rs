//! Top-level sequencing of one collection run.

use std::time::Instant;

use chrono::{DateTime, Utc};
use compintel_core::{
    record_slug, CollectionRecord, CompanyStepResults, SocialHandles, SocialRecord,
    SocialStepResults,
};
use compintel_sources::SourceFetcher;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::company::collect_company;
use crate::social::collect_social;
use crate::{CollectError, CollectorSettings, RecordStore, StoreError};

/// The status envelope for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub run_id: Uuid,
    pub company_name: String,
    pub collection_timestamp: DateTime<Utc>,
    pub duration_seconds: f64,
    pub company_data_status: CompanyStepResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_data_status: Option<SocialStepResults>,
    pub company_data_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_data_path: Option<String>,
}

/// Everything one run produced. The records are moved out of the pipelines.
#[derive(Debug)]
pub struct CollectionRun {
    pub summary: CollectionSummary,
    pub summary_path: String,
    pub company: CollectionRecord,
    pub social: Option<SocialRecord>,
}

pub struct Orchestrator<F, S> {
    fetcher: F,
    store: S,
    settings: CollectorSettings,
}

impl<F: SourceFetcher, S: RecordStore> Orchestrator<F, S> {
    #[must_use]
    pub fn new(fetcher: F, store: S, settings: CollectorSettings) -> Self {
        Self {
            fetcher,
            store,
            settings,
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Collect one company. The social pipeline runs only when `handles` is
    /// `Some`, even if the set is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Store`] when a record cannot be persisted.
    /// Source failures never surface here; they are in the step results.
    pub async fn run(
        &self,
        company_name: &str,
        description: &str,
        handles: Option<&SocialHandles>,
    ) -> Result<CollectionRun, CollectError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("collection_run", company = %company_name, %run_id);
        self.run_inner(run_id, company_name, description, handles)
            .instrument(span)
            .await
    }

    async fn run_inner(
        &self,
        run_id: Uuid,
        company_name: &str,
        description: &str,
        handles: Option<&SocialHandles>,
    ) -> Result<CollectionRun, CollectError> {
        tracing::info!("collection started");
        let started = Instant::now();
        let slug = record_slug(company_name);

        let company =
            collect_company(&self.fetcher, &self.settings, company_name, description).await;

        let social = match handles {
            Some(handles) => Some(
                collect_social(
                    &self.fetcher,
                    company_name,
                    handles,
                    self.settings.social_post_count,
                )
                .await,
            ),
            None => None,
        };
        let duration_seconds = started.elapsed().as_secs_f64();

        let company_key = format!("companies/{slug}_data");
        let company_data_path = self
            .persist(&company_key, to_json(&company_key, &company.record)?)
            .await?;

        let (social_record, social_data_status, social_data_path) = match social {
            Some(collection) => {
                let name = format!("social/{slug}_social_data");
                let path = self.persist(&name, to_json(&name, &collection.record)?).await?;
                (Some(collection.record), Some(collection.steps), Some(path))
            }
            None => (None, None, None),
        };

        let summary = CollectionSummary {
            run_id,
            company_name: company_name.to_string(),
            collection_timestamp: Utc::now(),
            duration_seconds,
            company_data_status: company.steps,
            social_data_status,
            company_data_path,
            social_data_path,
        };
        let summary_name = format!("summaries/{slug}_collection_summary");
        let summary_path = self
            .persist(&summary_name, to_json(&summary_name, &summary)?)
            .await?;

        tracing::info!(
            duration_seconds,
            failed_platforms = summary
                .social_data_status
                .as_ref()
                .map_or(0, |s| s.failed_platforms().len()),
            "collection finished"
        );

        Ok(CollectionRun {
            summary,
            summary_path,
            company: company.record,
            social: social_record,
        })
    }

    async fn persist(&self, name: &str, value: serde_json::Value) -> Result<String, CollectError> {
        self.store.write(name, &value).await.map_err(|e| {
            tracing::error!(record = name, error = %e, "failed to persist record");
            CollectError::from(e)
        })
    }
}

fn to_json<T: Serialize>(name: &str, value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|source| StoreError::Json {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
