//! Error types for octoview

use thiserror::Error;

/// Result type alias for octoview operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for octoview
#[derive(Error, Debug)]
pub enum Error {
    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("GitHub API error: {0}")]
    GitHubError(String),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error is the profile-lookup miss, as opposed to a
    /// transient fetch failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UserNotFound(_))
    }
}
