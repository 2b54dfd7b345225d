use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("{provider} API error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("{url} is not an HTML document (content-type: {content_type})")]
    NotADocument { url: String, content_type: String },

    #[error("{platform} timelines are unsupported: {reason}")]
    Unsupported {
        platform: &'static str,
        reason: &'static str,
    },

    #[error("subprocess error: {0}")]
    Subprocess(String),
}

/// Render a URL without its query string so API keys never reach logs.
pub(crate) fn display_url(url: &reqwest::Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}
