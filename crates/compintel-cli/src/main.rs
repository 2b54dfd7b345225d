mod collect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "compintel-cli")]
#[command(about = "Collect public information about companies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect one company and print its summary envelope
    Collect {
        #[arg(long)]
        company: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        twitter: Option<String>,
        #[arg(long)]
        bluesky: Option<String>,
        /// `user`, `@user@instance` or `user@instance`
        #[arg(long)]
        mastodon: Option<String>,
        #[arg(long)]
        threads: Option<String>,
        /// Skip the social pipeline entirely
        #[arg(long, conflicts_with_all = ["twitter", "bluesky", "mastodon", "threads"])]
        no_social: bool,
        /// Overrides `COMPINTEL_OUTPUT_DIR`
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Collect every company listed in the companies file
    Batch {
        /// Overrides `COMPINTEL_COMPANIES_PATH`
        #[arg(long)]
        companies: Option<PathBuf>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = compintel_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, news_provider = %config.news_provider, "configuration loaded");

    match cli.command {
        Commands::Collect {
            company,
            description,
            twitter,
            bluesky,
            mastodon,
            threads,
            no_social,
            output_dir,
        } => {
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            let social = (!no_social).then_some(compintel_core::SocialConfig {
                twitter,
                bluesky,
                mastodon,
                threads,
            });
            collect::run_collect(&config, &company, &description, social.as_ref()).await
        }
        Commands::Batch {
            companies,
            output_dir,
        } => {
            if let Some(path) = companies {
                config.companies_path = path;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            collect::run_batch(&config).await
        }
    }
}

#[cfg(test)]
mod tests;
