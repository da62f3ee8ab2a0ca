use crate::errors::{CliError, CliResult};
use maltmill_homebrew::{Error, FormulaCreator, FormulaGenerator, Platform, ReleaseSource, Slug};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Render a new formula for `slug`.
///
/// The formula goes to `output` when given, to `<name>.rb` under `dir` with
/// `write`, and to `out` otherwise. Returns the path written, if any.
#[instrument(skip_all, fields(slug = %slug))]
pub async fn execute_new(
    source: &dyn ReleaseSource,
    platform: Platform,
    slug: &Slug,
    write: bool,
    output: Option<&Path>,
    dir: &Path,
    out: &mut impl Write,
) -> CliResult<Option<PathBuf>> {
    let data = FormulaCreator::new(source, platform)
        .create(slug)
        .await
        .map_err(|e| CliError::failed(format!("Failed to create formula for {slug}"), e))?;
    let content = FormulaGenerator::generate(&data);

    let target = match output {
        Some(path) => Some(path.to_path_buf()),
        None if write => Some(dir.join(data.file_name())),
        None => None,
    };

    let Some(path) = target else {
        out.write_all(content.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| {
                CliError::failed("Failed to print formula", Error::io("write", "<stdout>", e))
            })?;
        return Ok(None);
    };

    std::fs::write(&path, content).map_err(|e| {
        CliError::failed(
            format!("Failed to create formula for {slug}"),
            Error::io("write", &path, e),
        )
    })?;
    info!(path = %path.display(), version = %data.version, "Wrote new formula");
    Ok(Some(path))
}
