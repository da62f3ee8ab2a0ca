//! Error types for GitHub API access.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for GitHub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to GitHub.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client")]
    #[diagnostic(code(maltmill::github::client))]
    Client {
        /// The underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed")]
    #[diagnostic(
        code(maltmill::github::request),
        help("Check your network connection")
    )]
    Request {
        /// The requested URL
        url: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("GitHub API returned HTTP {status} for {url}")]
    #[diagnostic(code(maltmill::github::api))]
    Api {
        /// The requested URL
        url: String,
        /// The HTTP status code
        status: u16,
        /// Help text for the user
        #[help]
        help: Option<String>,
    },

    /// The API response was not the expected JSON.
    #[error("invalid release response from {url}")]
    #[diagnostic(code(maltmill::github::decode))]
    Decode {
        /// The requested URL
        url: String,
        /// The underlying decode error
        #[source]
        source: reqwest::Error,
    },

    /// An asset download answered with a non-success status.
    #[error("download of {url} returned HTTP {status}")]
    #[diagnostic(
        code(maltmill::github::download),
        help("The release asset may have been removed or renamed")
    )]
    Download {
        /// The asset URL
        url: String,
        /// The HTTP status code
        status: u16,
    },
}

impl Error {
    /// Create a new API status error, with a hint for common statuses.
    #[must_use]
    pub fn api(url: impl Into<String>, status: u16) -> Self {
        let help = match status {
            401 | 403 => Some(
                "Set GITHUB_TOKEN (or pass --token) to authenticate and raise the rate limit"
                    .to_string(),
            ),
            404 => Some("Check that the repository exists and has a published release".to_string()),
            _ => None,
        };
        Self::Api {
            url: url.into(),
            status,
            help,
        }
    }

    /// Create a new download status error.
    #[must_use]
    pub fn download(url: impl Into<String>, status: u16) -> Self {
        Self::Download {
            url: url.into(),
            status,
        }
    }
}

impl From<Error> for maltmill_homebrew::Error {
    fn from(err: Error) -> Self {
        Self::upstream("GitHub request failed", err)
    }
}
