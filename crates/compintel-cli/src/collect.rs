use anyhow::Context;
use compintel_collector::{CollectorSettings, JsonFileStore, Orchestrator};
use compintel_core::{AppConfig, SocialConfig};
use compintel_sources::HttpSourceFetcher;

type HttpOrchestrator = Orchestrator<HttpSourceFetcher, JsonFileStore>;

fn build_orchestrator(config: &AppConfig) -> anyhow::Result<HttpOrchestrator> {
    let fetcher =
        HttpSourceFetcher::from_config(config).context("failed to build source fetcher")?;
    let store = JsonFileStore::new(&config.output_dir);
    Ok(Orchestrator::new(
        fetcher,
        store,
        CollectorSettings::from_config(config),
    ))
}

/// Collect one company and print its summary as pretty JSON on stdout.
pub(crate) async fn run_collect(
    config: &AppConfig,
    company: &str,
    description: &str,
    social: Option<&SocialConfig>,
) -> anyhow::Result<()> {
    let handles = social
        .map(|s| s.handles(&config.mastodon_default_instance))
        .transpose()
        .context("invalid social handle")?;

    let orchestrator = build_orchestrator(config)?;
    let run = orchestrator
        .run(company, description, handles.as_ref())
        .await
        .with_context(|| format!("collection for '{company}' failed"))?;

    println!("{}", serde_json::to_string_pretty(&run.summary)?);
    Ok(())
}

/// Collect every company in the configured companies file, one at a time.
///
/// A failed company is logged and counted; the batch fails only when every
/// company failed.
pub(crate) async fn run_batch(config: &AppConfig) -> anyhow::Result<()> {
    let file = compintel_core::load_companies(&config.companies_path)?;
    let orchestrator = build_orchestrator(config)?;

    let total = file.companies.len();
    let mut failed = 0usize;

    for company in &file.companies {
        let handles = match company
            .social
            .as_ref()
            .map(|s| s.handles(&config.mastodon_default_instance))
            .transpose()
        {
            Ok(handles) => handles,
            Err(e) => {
                tracing::error!(company = %company.name, error = %e, "invalid social handle");
                failed += 1;
                continue;
            }
        };

        match orchestrator
            .run(&company.name, &company.description, handles.as_ref())
            .await
        {
            Ok(run) => {
                tracing::info!(
                    company = %company.name,
                    summary = %run.summary_path,
                    "company collected"
                );
                println!("{}", serde_json::to_string_pretty(&run.summary)?);
            }
            Err(e) => {
                tracing::error!(company = %company.name, error = %e, "company collection failed");
                failed += 1;
            }
        }
    }

    tracing::info!(total, failed, "batch finished");
    if failed == total && total > 0 {
        anyhow::bail!("all {total} companies failed");
    }
    Ok(())
}
