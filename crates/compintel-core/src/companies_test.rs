use std::io::Write;

use super::*;

fn company(name: &str) -> CompanyConfig {
    CompanyConfig {
        name: name.to_string(),
        description: String::new(),
        social: None,
    }
}

#[test]
fn validate_rejects_empty_name() {
    let file = CompaniesFile {
        companies: vec![company("   ")],
    };
    let err = validate_companies(&file).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_duplicate_slug() {
    let file = CompaniesFile {
        companies: vec![company("HDFC Bank"), company("hdfc bank")],
    };
    let err = validate_companies(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate company slug"));
}

#[test]
fn validate_accepts_distinct_companies() {
    let file = CompaniesFile {
        companies: vec![company("HDFC Bank"), company("Acme Corp")],
    };
    assert!(validate_companies(&file).is_ok());
}

#[test]
fn social_config_skips_blank_handles() {
    let social = SocialConfig {
        twitter: Some("HUL_News".to_string()),
        bluesky: Some(String::new()),
        mastodon: Some("@hindustanunilever@mastodon.social".to_string()),
        threads: None,
    };
    let handles = social.handles("mastodon.social").unwrap();
    assert_eq!(handles.len(), 2);
    assert!(handles.get(Platform::Bluesky).is_none());
    assert!(matches!(
        handles.get(Platform::Mastodon),
        Some(SocialHandle::Mastodon(account)) if account.username == "hindustanunilever"
    ));
}

#[test]
fn social_config_surfaces_malformed_mastodon() {
    let social = SocialConfig {
        mastodon: Some("@a@b@c".to_string()),
        ..SocialConfig::default()
    };
    assert!(matches!(
        social.handles("mastodon.social"),
        Err(HandleError::Malformed { platform: "mastodon", .. })
    ));
}

#[test]
fn load_companies_parses_yaml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r"
companies:
  - name: HDFC Bank
    description: Leading Bank in India
    social:
      twitter: HDFC_Bank
  - name: Acme Corp
"
    )
    .unwrap();

    let loaded = load_companies(file.path()).unwrap();
    assert_eq!(loaded.companies.len(), 2);
    assert_eq!(loaded.companies[0].slug(), "hdfc_bank");
    assert_eq!(
        loaded.companies[0]
            .social
            .as_ref()
            .and_then(|s| s.twitter.as_deref()),
        Some("HDFC_Bank")
    );
    assert!(loaded.companies[1].social.is_none());
    assert!(loaded.companies[1].description.is_empty());
}

#[test]
fn load_companies_missing_file_is_io_error() {
    let err = load_companies(Path::new("/nonexistent/companies.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::CompaniesFileIo { .. }));
}

#[test]
fn load_companies_from_repo_config() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("companies.yaml");
    let result = load_companies(&path);
    assert!(result.is_ok(), "failed to load companies.yaml: {result:?}");
    assert!(!result.unwrap().companies.is_empty());
}
