//! Connection settings for the GitHub API.

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Configuration for [`crate::GitHubReleaseSource`].
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base URL without a trailing slash
    pub api_base: String,
    /// Token sent as `Authorization: Bearer` on API requests
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
        }
    }
}

impl GitHubConfig {
    /// Creates a configuration for the public GitHub API.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (e.g. a GitHub Enterprise endpoint).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the API token. Empty tokens are ignored.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }
}
