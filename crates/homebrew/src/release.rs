//! Release metadata and the source it is fetched from.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

/// A tagged release as returned by the hosting API.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// The git tag of the release (e.g. `v1.3.0`)
    pub tag_name: String,
    /// Downloadable files attached to the release, in API order
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    /// Asset name as shown on the release page
    pub name: String,
    /// Public download URL
    pub browser_download_url: String,
}

impl Asset {
    /// The file name at the end of the download URL.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.browser_download_url
            .rsplit('/')
            .next()
            .unwrap_or(&self.browser_download_url)
    }
}

/// Where releases and asset checksums come from.
///
/// Implemented over the GitHub REST API by `maltmill-github`; tests provide
/// in-memory fakes.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the latest published release of `owner/repo`.
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release>;

    /// Fetch the release of `owner/repo` tagged `tag`.
    async fn release_by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<Release>;

    /// Download `url` and return the lowercase hex SHA-256 of its body.
    async fn sha256_of_url(&self, url: &str) -> Result<String>;
}

/// The OS and architecture markers an asset file name must contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Operating system marker (e.g. `darwin`)
    pub os: String,
    /// Architecture marker (e.g. `amd64`)
    pub arch: String,
}

impl Platform {
    /// Create a platform from its markers.
    #[must_use]
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Whether `file_name` carries both markers.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.contains(&self.os) && file_name.contains(&self.arch)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new("darwin", "amd64")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Find the first asset built for `platform` whose file name ends with
/// `extension`.
///
/// An empty `extension` accepts any file name. Assets are searched in the
/// order the API returned them; the first match wins.
///
/// # Errors
///
/// Returns [`Error::NoMatchingAsset`] when nothing matches.
pub fn find_asset<'a>(
    release: &'a Release,
    platform: &Platform,
    extension: &str,
) -> Result<&'a Asset> {
    release
        .assets
        .iter()
        .find(|asset| {
            let file_name = asset.file_name();
            platform.matches(file_name) && file_name.ends_with(extension)
        })
        .ok_or_else(|| {
            let available: Vec<&str> = release.assets.iter().map(Asset::file_name).collect();
            Error::no_matching_asset(&release.tag_name, platform.to_string(), &available)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(file: &str) -> Asset {
        Asset {
            name: file.to_string(),
            browser_download_url: format!(
                "https://github.com/acme/tool/releases/download/v1.0.0/{file}"
            ),
        }
    }

    fn release(files: &[&str]) -> Release {
        Release {
            tag_name: "v1.0.0".to_string(),
            assets: files.iter().map(|f| asset(f)).collect(),
        }
    }

    #[test]
    fn test_asset_file_name() {
        assert_eq!(asset("tool_darwin_amd64.zip").file_name(), "tool_darwin_amd64.zip");
    }

    #[test]
    fn test_platform_default_and_display() {
        let platform = Platform::default();
        assert_eq!(platform.to_string(), "darwin/amd64");
        assert!(platform.matches("tool_v1.0.0_darwin_amd64.tar.gz"));
        assert!(!platform.matches("tool_v1.0.0_linux_amd64.tar.gz"));
    }

    #[test]
    fn test_find_asset_first_match_wins() {
        let release = release(&[
            "tool_linux_amd64.zip",
            "tool_darwin_amd64.zip",
            "tool_darwin_amd64.tar.gz",
        ]);
        let found = find_asset(&release, &Platform::default(), "").unwrap();
        assert_eq!(found.file_name(), "tool_darwin_amd64.zip");
    }

    #[test]
    fn test_find_asset_respects_extension() {
        let release = release(&["tool_darwin_amd64.zip", "tool_darwin_amd64.tar.gz"]);
        let found = find_asset(&release, &Platform::default(), ".gz").unwrap();
        assert_eq!(found.file_name(), "tool_darwin_amd64.tar.gz");
    }

    #[test]
    fn test_find_asset_custom_platform() {
        let release = release(&["tool_darwin_amd64.zip", "tool_linux_arm64.zip"]);
        let found = find_asset(&release, &Platform::new("linux", "arm64"), ".zip").unwrap();
        assert_eq!(found.file_name(), "tool_linux_arm64.zip");
    }

    #[test]
    fn test_find_asset_no_match() {
        let release = release(&["tool_windows_amd64.zip"]);
        let err = find_asset(&release, &Platform::default(), ".zip").unwrap_err();
        assert!(matches!(err, Error::NoMatchingAsset { .. }));
        assert!(err.to_string().contains("darwin/amd64"));
    }

    #[test]
    fn test_release_deserializes_github_shape() {
        let json = r#"{
            "tag_name": "v1.3.0",
            "name": "1.3.0",
            "assets": [
                {
                    "name": "tool_darwin_amd64.zip",
                    "size": 1024,
                    "browser_download_url": "https://github.com/acme/tool/releases/download/v1.3.0/tool_darwin_amd64.zip"
                }
            ]
        }"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "v1.3.0");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].file_name(), "tool_darwin_amd64.zip");
    }

    #[test]
    fn test_release_without_assets() {
        let release: Release = serde_json::from_str(r#"{"tag_name": "v2"}"#).unwrap();
        assert!(release.assets.is_empty());
    }
}
