use crate::errors::{CliError, CliResult};
use maltmill_homebrew::{Error, Formula, FormulaUpdater, Platform, ReleaseSource, UpdateOutcome};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Update each formula in order, stopping at the first failure.
///
/// With `write` the file is rewritten in place when a newer release was
/// applied. Without it the formula content, changed or not, goes to `out`.
#[instrument(skip_all, fields(files = files.len(), write))]
pub async fn execute_update(
    source: &dyn ReleaseSource,
    platform: Platform,
    files: &[PathBuf],
    write: bool,
    out: &mut impl Write,
) -> CliResult<()> {
    if files.is_empty() {
        return Err(CliError::config("No formula files given"));
    }

    let updater = FormulaUpdater::new(source, platform);
    for path in files {
        update_one(&updater, path, write, out)
            .await
            .map_err(|e| CliError::failed(format!("Failed to update {}", path.display()), e))?;
    }
    Ok(())
}

async fn update_one(
    updater: &FormulaUpdater<'_>,
    path: &Path,
    write: bool,
    out: &mut impl Write,
) -> maltmill_homebrew::Result<()> {
    let mut formula = Formula::load(path)?;
    let outcome = updater.update(&mut formula).await?;

    match &outcome {
        UpdateOutcome::Updated { from, to } => {
            info!(formula = %formula.name(), "{from} -> {to}");
        }
        UpdateOutcome::UpToDate { current, .. } => {
            info!(formula = %formula.name(), version = %current, "already up to date");
        }
    }

    if write {
        if outcome.is_updated() {
            formula.write()?;
        }
    } else {
        out.write_all(formula.content().as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| Error::io("write", "<stdout>", e))?;
    }
    Ok(())
}
