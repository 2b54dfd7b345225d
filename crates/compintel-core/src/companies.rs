use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::record::record_slug;
use crate::social::{Platform, SocialHandle, SocialHandles};
use crate::{ConfigError, HandleError};

/// Social handles as written in `companies.yaml` or passed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialConfig {
    pub twitter: Option<String>,
    pub bluesky: Option<String>,
    pub mastodon: Option<String>,
    pub threads: Option<String>,
}

impl SocialConfig {
    /// Convert into typed handles, skipping platforms left blank.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError`] if any supplied handle is malformed.
    pub fn handles(&self, mastodon_default_instance: &str) -> Result<SocialHandles, HandleError> {
        let mut handles = SocialHandles::new();
        let entries = [
            (Platform::Twitter, &self.twitter),
            (Platform::Bluesky, &self.bluesky),
            (Platform::Mastodon, &self.mastodon),
            (Platform::Threads, &self.threads),
        ];
        for (platform, raw) in entries {
            let Some(raw) = raw.as_deref().filter(|r| !r.trim().is_empty()) else {
                continue;
            };
            handles.insert(SocialHandle::parse(
                platform,
                raw,
                mastodon_default_instance,
            )?);
        }
        Ok(handles)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `None` skips social collection for this company entirely.
    pub social: Option<SocialConfig>,
}

impl CompanyConfig {
    #[must_use]
    pub fn slug(&self) -> String {
        record_slug(&self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompaniesFile {
    pub companies: Vec<CompanyConfig>,
}

/// Load and validate the companies file used by batch runs.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_companies(path: &Path) -> Result<CompaniesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CompaniesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let companies_file: CompaniesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CompaniesFileParse)?;

    validate_companies(&companies_file)?;

    Ok(companies_file)
}

fn validate_companies(companies_file: &CompaniesFile) -> Result<(), ConfigError> {
    let mut seen_slugs = HashSet::new();

    for company in &companies_file.companies {
        if company.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company name must be non-empty".to_string(),
            ));
        }

        let slug = company.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate company slug: '{}' (from company '{}')",
                slug, company.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "companies_test.rs"]
mod tests;
