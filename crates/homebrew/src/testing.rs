//! In-memory release source for unit tests.

use crate::error::{Error, Result};
use crate::release::{Asset, Release, ReleaseSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeSource {
    latest: HashMap<String, Release>,
    tagged: HashMap<String, Release>,
    checksums: HashMap<String, String>,
    pub downloads: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_latest(mut self, repo: &str, release: Release) -> Self {
        self.latest.insert(repo.to_string(), release);
        self
    }

    pub fn with_tagged(mut self, repo: &str, release: Release) -> Self {
        self.tagged
            .insert(format!("{repo}@{}", release.tag_name), release);
        self
    }

    pub fn with_checksum(mut self, url: &str, sha256: &str) -> Self {
        self.checksums.insert(url.to_string(), sha256.to_string());
        self
    }

    pub fn downloaded(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReleaseSource for FakeSource {
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release> {
        self.latest
            .get(&format!("{owner}/{repo}"))
            .cloned()
            .ok_or_else(|| Error::release_source(format!("no latest release for {owner}/{repo}")))
    }

    async fn release_by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<Release> {
        self.tagged
            .get(&format!("{owner}/{repo}@{tag}"))
            .cloned()
            .ok_or_else(|| Error::release_source(format!("no release {tag} for {owner}/{repo}")))
    }

    async fn sha256_of_url(&self, url: &str) -> Result<String> {
        self.downloads.lock().unwrap().push(url.to_string());
        self.checksums
            .get(url)
            .cloned()
            .ok_or_else(|| Error::release_source(format!("download failed: {url}")))
    }
}

pub fn release(tag: &str, urls: &[&str]) -> Release {
    Release {
        tag_name: tag.to_string(),
        assets: urls
            .iter()
            .map(|url| Asset {
                name: url.rsplit('/').next().unwrap_or(url).to_string(),
                browser_download_url: (*url).to_string(),
            })
            .collect(),
    }
}
