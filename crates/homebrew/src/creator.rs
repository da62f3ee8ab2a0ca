//! Scaffolding a new formula from a repository slug.

use crate::error::Result;
use crate::generator::{FormulaData, capitalized_name};
use crate::release::{Platform, ReleaseSource, find_asset};
use crate::slug::Slug;
use crate::version::{normalize, parse_version};
use tracing::{debug, info, instrument};

/// Gathers everything needed to render a new formula.
pub struct FormulaCreator<'a> {
    source: &'a dyn ReleaseSource,
    platform: Platform,
}

impl<'a> FormulaCreator<'a> {
    /// Create a creator that selects assets for `platform`.
    #[must_use]
    pub fn new(source: &'a dyn ReleaseSource, platform: Platform) -> Self {
        Self { source, platform }
    }

    /// Resolve the release for `slug` and build the formula data.
    ///
    /// Uses the tagged release when the slug names one, otherwise the latest
    /// release. The first asset whose file name carries the platform
    /// markers is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the release cannot be fetched, its tag is not a
    /// version, no asset matches, or the checksum download fails.
    #[instrument(skip_all, fields(slug = %slug))]
    pub async fn create(&self, slug: &Slug) -> Result<FormulaData> {
        let release = match slug.tag() {
            Some(tag) => {
                self.source
                    .release_by_tag(slug.owner(), slug.repo(), tag)
                    .await?
            }
            None => self.source.latest_release(slug.owner(), slug.repo()).await?,
        };
        debug!(tag = %release.tag_name, assets = release.assets.len(), "Fetched release");

        let version = normalize(&parse_version(&release.tag_name)?);
        let url = find_asset(&release, &self.platform, "")?
            .browser_download_url
            .clone();
        let sha256 = self.source.sha256_of_url(&url).await?;

        info!(%version, %url, "Resolved new formula");

        Ok(FormulaData {
            name: slug.repo().to_string(),
            class_name: capitalized_name(slug.repo()),
            version,
            owner: slug.owner().to_string(),
            repo: slug.repo().to_string(),
            sha256,
            url,
        })
    }
}
