//! GitHub Releases API client.

use crate::checksum::sha256_of_url;
use crate::config::GitHubConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use maltmill_homebrew::{Release, ReleaseSource};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::{debug, info};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("maltmill/", env!("CARGO_PKG_VERSION"));

/// Release source backed by the GitHub REST API.
pub struct GitHubReleaseSource {
    client: Client,
    config: GitHubConfig,
}

impl GitHubReleaseSource {
    /// Create a new GitHub release source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the HTTP client (TLS backend) cannot be
    /// initialized.
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| Error::Client { source })?;
        Ok(Self { client, config })
    }

    /// The configuration this source was built with.
    #[must_use]
    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    fn releases_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{owner}/{repo}/releases", self.config.api_base)
    }

    /// Fetch release information from the GitHub API.
    async fn fetch_release(&self, url: &str) -> Result<Release> {
        debug!(%url, "Fetching GitHub release");

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| Error::Request {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::api(url, status.as_u16()));
        }

        let release: Release = response.json().await.map_err(|e| Error::Decode {
            url: url.to_string(),
            source: e,
        })?;
        info!(tag = %release.tag_name, assets = release.assets.len(), "Fetched GitHub release");
        Ok(release)
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleaseSource {
    async fn latest_release(&self, owner: &str, repo: &str) -> maltmill_homebrew::Result<Release> {
        let url = format!("{}/latest", self.releases_url(owner, repo));
        Ok(self.fetch_release(&url).await?)
    }

    async fn release_by_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> maltmill_homebrew::Result<Release> {
        let url = format!("{}/tags/{tag}", self.releases_url(owner, repo));
        Ok(self.fetch_release(&url).await?)
    }

    async fn sha256_of_url(&self, url: &str) -> maltmill_homebrew::Result<String> {
        Ok(sha256_of_url(&self.client, url).await?)
    }
}
