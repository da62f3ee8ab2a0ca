//! Reconciling an existing formula with the latest release.

use crate::error::Result;
use crate::formula::{Formula, expand_url, url_extension};
use crate::release::{Platform, ReleaseSource, find_asset};
use crate::version::{is_newer, normalize, parse_version};
use tracing::{debug, info, instrument};

/// Result of reconciling a formula with its latest release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The latest release is not newer than the formula; nothing changed.
    UpToDate {
        /// Version currently in the formula
        current: String,
        /// Tag of the latest release
        latest: String,
    },
    /// The formula was patched to a newer release.
    Updated {
        /// Previous version string
        from: String,
        /// New `major.minor.patch` version
        to: String,
    },
}

impl UpdateOutcome {
    /// Whether the formula content changed.
    #[must_use]
    pub const fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Updates formulas to the latest release of their repository.
pub struct FormulaUpdater<'a> {
    source: &'a dyn ReleaseSource,
    platform: Platform,
}

impl<'a> FormulaUpdater<'a> {
    /// Create an updater that selects assets for `platform`.
    #[must_use]
    pub fn new(source: &'a dyn ReleaseSource, platform: Platform) -> Self {
        Self { source, platform }
    }

    /// Bring `formula` up to date with the latest release.
    ///
    /// On [`UpdateOutcome::Updated`] the formula content has been patched in
    /// memory; call [`Formula::write`] to persist it. On
    /// [`UpdateOutcome::UpToDate`] the formula is untouched.
    ///
    /// # Errors
    ///
    /// Any failure (unparseable version, API error, no matching asset,
    /// download failure) is returned wrapped with the formula path.
    #[instrument(skip_all, fields(formula = %formula.path().display()))]
    pub async fn update(&self, formula: &mut Formula) -> Result<UpdateOutcome> {
        let path = formula.path().to_path_buf();
        self.reconcile(formula)
            .await
            .map_err(|e| e.in_formula(path))
    }

    async fn reconcile(&self, formula: &mut Formula) -> Result<UpdateOutcome> {
        let current = parse_version(formula.version())?;

        let release = self
            .source
            .latest_release(formula.owner(), formula.repo())
            .await?;
        let latest = parse_version(&release.tag_name)?;

        if !is_newer(&latest, &current) {
            debug!(
                current = %formula.version(),
                latest = %release.tag_name,
                "Formula is up to date"
            );
            return Ok(UpdateOutcome::UpToDate {
                current: formula.version().to_string(),
                latest: release.tag_name,
            });
        }

        let version = normalize(&latest);
        let url = if formula.is_url_template() {
            expand_url(formula.url_template(), formula.name(), &version)
        } else {
            let extension = url_extension(formula.url());
            find_asset(&release, &self.platform, extension)?
                .browser_download_url
                .clone()
        };
        debug!(%url, "Resolved download URL");

        let sha256 = self.source.sha256_of_url(&url).await?;

        let from = formula.version().to_string();
        formula.apply(&version, &url, &sha256);

        info!(%from, to = %version, %sha256, "Updated formula");
        Ok(UpdateOutcome::Updated { from, to: version })
    }
}
