use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum GitlabError {
    #[error("failed to initialise HTTP client")]
    ClientInit { source: reqwest::Error },

    #[error("invalid GitLab base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request to {url} failed")]
    Request { url: String, source: reqwest::Error },

    #[error("GitLab API returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode build variables from {url}")]
    Decode { url: String, source: reqwest::Error },
}
