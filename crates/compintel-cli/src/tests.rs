use super::*;

#[test]
fn parses_collect_with_social_handles() {
    let cli = Cli::try_parse_from([
        "compintel-cli",
        "collect",
        "--company",
        "HDFC Bank",
        "--description",
        "Private sector bank",
        "--twitter",
        "HDFC_Bank",
        "--mastodon",
        "@hdfc@mastodon.social",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Collect {
            company,
            twitter,
            mastodon,
            bluesky,
            no_social,
            output_dir,
            ..
        } => {
            assert_eq!(company, "HDFC Bank");
            assert_eq!(twitter.as_deref(), Some("HDFC_Bank"));
            assert_eq!(mastodon.as_deref(), Some("@hdfc@mastodon.social"));
            assert!(bluesky.is_none());
            assert!(!no_social);
            assert!(output_dir.is_none());
        }
        Commands::Batch { .. } => panic!("expected collect"),
    }
}

#[test]
fn collect_requires_company() {
    assert!(Cli::try_parse_from(["compintel-cli", "collect"]).is_err());
}

#[test]
fn description_defaults_to_empty() {
    let cli = Cli::try_parse_from(["compintel-cli", "collect", "--company", "Acme"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Collect { ref description, .. } if description.is_empty()
    ));
}

#[test]
fn no_social_conflicts_with_handles() {
    let result = Cli::try_parse_from([
        "compintel-cli",
        "collect",
        "--company",
        "Acme",
        "--no-social",
        "--twitter",
        "acme",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_batch_with_companies_override() {
    let cli = Cli::try_parse_from([
        "compintel-cli",
        "batch",
        "--companies",
        "config/other.yaml",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Batch {
            companies: Some(ref path),
            output_dir: None
        } if path == &PathBuf::from("config/other.yaml")
    ));
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["compintel-cli"]).is_err());
}
