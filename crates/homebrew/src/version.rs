//! Lenient semantic version handling for formula versions and release tags.
//!
//! Release tags are rarely strict semver: `v1.2.3`, `1.2` and `v2` are all
//! common. They are normalized into a [`semver::Version`] before comparison,
//! and the version written back into a formula is always `major.minor.patch`.

use crate::error::{Error, Result};
use semver::{BuildMetadata, Prerelease, Version};
use std::cmp::Ordering;

/// Parse a version string or release tag.
///
/// Accepts an optional leading `v`, one to three numeric components (missing
/// ones default to 0) and an optional pre-release or build suffix.
///
/// # Errors
///
/// Returns [`Error::InvalidVersion`] if the string is not a version.
pub fn parse_version(raw: &str) -> Result<Version> {
    let invalid = || Error::invalid_version(raw);
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

    let split_at = stripped.find(['-', '+']).unwrap_or(stripped.len());
    let (core, suffix) = stripped.split_at(split_at);

    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 3 {
        return Err(invalid());
    }
    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // Zero-padded components (CalVer tags like v2024.01.05) are accepted.
        *slot = part.parse().map_err(|_| invalid())?;
    }

    let mut version = Version::new(numbers[0], numbers[1], numbers[2]);
    let (pre, build) = match suffix.split_once('+') {
        Some((pre, build)) => (pre, Some(build)),
        None => (suffix, None),
    };
    if pre == "-" || build == Some("") {
        return Err(invalid());
    }
    if let Some(pre) = pre.strip_prefix('-') {
        version.pre = Prerelease::new(pre).map_err(|_| invalid())?;
    }
    if let Some(build) = build {
        version.build = BuildMetadata::new(build).map_err(|_| invalid())?;
    }
    Ok(version)
}

/// Render a version as `major.minor.patch`, dropping any suffix.
#[must_use]
pub fn normalize(version: &Version) -> String {
    format!("{}.{}.{}", version.major, version.minor, version.patch)
}

/// Whether `candidate` is strictly newer than `current`.
///
/// Build metadata does not take part in the comparison.
#[must_use]
pub fn is_newer(candidate: &Version, current: &Version) -> bool {
    let mut candidate = candidate.clone();
    let mut current = current.clone();
    candidate.build = BuildMetadata::EMPTY;
    current.build = BuildMetadata::EMPTY;
    candidate.cmp(&current) == Ordering::Greater
}
