//! The social collection pipeline: one independent fetch per supplied handle.

use compintel_core::{Platform, PlatformStatus, SocialHandles, SocialRecord, SocialStepResults};
use compintel_sources::SourceFetcher;

#[derive(Debug)]
pub struct SocialCollection {
    pub record: SocialRecord,
    pub steps: SocialStepResults,
}

/// Fetch each platform that has a handle. Platforms without one stay
/// [`PlatformStatus::NotAttempted`]; a failed platform never stops the rest.
pub async fn collect_social(
    fetcher: &dyn SourceFetcher,
    company_name: &str,
    handles: &SocialHandles,
    post_count: u32,
) -> SocialCollection {
    let mut record = SocialRecord::new(company_name);
    let mut steps = SocialStepResults::default();

    for platform in Platform::ALL {
        let Some(handle) = handles.get(platform) else {
            tracing::debug!(company = %company_name, %platform, "no handle supplied");
            continue;
        };

        match fetcher.fetch_social_timeline(handle, post_count).await {
            Ok(posts) => {
                let count = posts.len();
                record.extend_posts(platform, posts);
                steps.set(platform, PlatformStatus::Succeeded);
                tracing::info!(company = %company_name, %platform, %handle, count, "timeline collected");
            }
            Err(e) => {
                steps.set(platform, PlatformStatus::Failed);
                tracing::warn!(
                    company = %company_name,
                    source = platform.as_str(),
                    %handle,
                    error = %e,
                    "timeline fetch failed"
                );
            }
        }
    }

    SocialCollection { record, steps }
}
