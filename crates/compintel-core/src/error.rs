use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read companies file {path}: {source}")]
    CompaniesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse companies file: {0}")]
    CompaniesFileParse(#[from] serde_yaml::Error),

    #[error("companies file validation failed: {0}")]
    Validation(String),
}

/// A social handle that cannot be mapped onto a known platform account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleError {
    #[error("unknown social platform: {0}")]
    UnknownPlatform(String),

    #[error("malformed {platform} handle \"{handle}\": {reason}")]
    Malformed {
        platform: &'static str,
        handle: String,
        reason: &'static str,
    },
}
