//! Error types for formula operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for formula operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, reconciling or generating formulas.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A required assignment was not found in the formula text.
    #[error("no {field} detected in {}", path.display())]
    #[diagnostic(
        code(maltmill::homebrew::missing_field),
        help("The formula must contain an indented `{field} \"...\"` assignment")
    )]
    MissingField {
        /// The assignment that was expected (`version`, `url` or `sha256`)
        field: &'static str,
        /// The formula file
        path: PathBuf,
    },

    /// The download URL does not point at a GitHub repository.
    #[error("invalid url format: {url}")]
    #[diagnostic(
        code(maltmill::homebrew::invalid_url),
        help("Only URLs of the form https://github.com/<owner>/<repo>/... are supported")
    )]
    InvalidUrl {
        /// The URL (or URL template) as written in the formula
        url: String,
    },

    /// A version string or release tag is not a semantic version.
    #[error("invalid version: {version}")]
    #[diagnostic(
        code(maltmill::homebrew::invalid_version),
        help("Versions must look like 1.2.3 or v1.2.3")
    )]
    InvalidVersion {
        /// The rejected version string
        version: String,
    },

    /// A repository slug could not be parsed.
    #[error("invalid slug: {slug}")]
    #[diagnostic(
        code(maltmill::homebrew::invalid_slug),
        help("Use owner/repo or owner/repo@tag")
    )]
    InvalidSlug {
        /// The rejected slug
        slug: String,
    },

    /// No release asset matched the target platform.
    #[error("no assets found for {platform} in release {tag}")]
    #[diagnostic(code(maltmill::homebrew::no_matching_asset))]
    NoMatchingAsset {
        /// The release tag that was searched
        tag: String,
        /// The platform markers that were required
        platform: String,
        /// Help text listing what was available
        #[help]
        help: Option<String>,
    },

    /// Reading or writing a formula file failed.
    #[error("{operation} {} failed", path.display())]
    #[diagnostic(
        code(maltmill::homebrew::io),
        help("Check that the path exists and is writable")
    )]
    Io {
        /// What was being done (`read`, `write`, ...)
        operation: &'static str,
        /// The file involved
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The release source (GitHub API, asset download) failed.
    #[error("{message}")]
    #[diagnostic(code(maltmill::homebrew::release_source))]
    ReleaseSource {
        /// The error message
        message: String,
    },

    /// The release source failed with an underlying diagnostic.
    #[error("{context}")]
    #[diagnostic(code(maltmill::homebrew::upstream))]
    Upstream {
        /// What was being attempted
        context: String,
        /// The release source's own error, help text included
        #[source]
        #[diagnostic_source]
        source: Box<dyn Diagnostic + Send + Sync>,
    },

    /// An operation on a specific formula failed.
    #[error("update formula failed: {}", path.display())]
    #[diagnostic(code(maltmill::homebrew::formula))]
    Formula {
        /// The formula file being processed
        path: PathBuf,
        /// What went wrong
        #[source]
        #[diagnostic_source]
        source: Box<dyn Diagnostic + Send + Sync>,
    },
}

impl Error {
    /// Create a new missing field error.
    #[must_use]
    pub fn missing_field(field: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::MissingField {
            field,
            path: path.into(),
        }
    }

    /// Create a new invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Create a new invalid version error.
    #[must_use]
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create a new invalid slug error.
    #[must_use]
    pub fn invalid_slug(slug: impl Into<String>) -> Self {
        Self::InvalidSlug { slug: slug.into() }
    }

    /// Create a new no matching asset error.
    #[must_use]
    pub fn no_matching_asset(
        tag: impl Into<String>,
        platform: impl Into<String>,
        available: &[&str],
    ) -> Self {
        let help = if available.is_empty() {
            Some("The release has no assets".to_string())
        } else {
            Some(format!("Available assets: {}", available.join(", ")))
        };
        Self::NoMatchingAsset {
            tag: tag.into(),
            platform: platform.into(),
            help,
        }
    }

    /// Create a new I/O error for a file operation.
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Create a new release source error.
    #[must_use]
    pub fn release_source(message: impl Into<String>) -> Self {
        Self::ReleaseSource {
            message: message.into(),
        }
    }

    /// Create a release source error that keeps the underlying diagnostic.
    #[must_use]
    pub fn upstream(
        context: impl Into<String>,
        source: impl Diagnostic + Send + Sync + 'static,
    ) -> Self {
        Self::Upstream {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Wrap this error with the formula file it occurred in.
    #[must_use]
    pub fn in_formula(self, path: impl Into<PathBuf>) -> Self {
        Self::Formula {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
