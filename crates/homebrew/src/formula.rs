//! Formula file parsing and in-place patching.
//!
//! A formula is treated as text: the `version`, `url` and `sha256`
//! assignments are located with regular expressions and rewritten one match
//! at a time, so everything else in the file stays byte-identical.

use crate::error::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Placeholder marking a URL as a template over the formula version.
pub const VERSION_PLACEHOLDER: &str = "#{version}";

const NAME_PLACEHOLDER: &str = "#{name}";

#[allow(clippy::expect_used)]
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s+name\s*=\s*['"](.*)["']"#).expect("name regex is valid")
});

#[allow(clippy::expect_used)]
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(^\s+version\s*['"])(.*)(["'])"#).expect("version regex is valid")
});

#[allow(clippy::expect_used)]
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(^\s+url\s*['"])(.*)(["'])"#).expect("url regex is valid")
});

#[allow(clippy::expect_used)]
static SHA256_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(\s+sha256\s*['"])(.*)(["'])"#).expect("sha256 regex is valid")
});

#[allow(clippy::expect_used)]
static GITHUB_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://[^/]*github.com/([^/]+)/([^/]+)").expect("github url regex is valid")
});

/// A Homebrew formula loaded from disk.
#[derive(Debug, Clone)]
pub struct Formula {
    path: PathBuf,
    content: String,
    name: String,
    version: String,
    url_template: String,
    url: String,
    sha256: String,
    owner: String,
    repo: String,
}

impl Formula {
    /// Read and parse a formula file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a recognizable
    /// formula (see [`Formula::parse`]).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
        Self::parse(path, content)
    }

    /// Parse formula text.
    ///
    /// `name` is optional; `version`, `sha256` and `url` are required. When
    /// the URL contains [`VERSION_PLACEHOLDER`] it is kept as a template and
    /// expanded with the current name and version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] for a missing required assignment and
    /// [`Error::InvalidUrl`] if the URL is not a GitHub repository URL.
    pub fn parse(path: impl Into<PathBuf>, content: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let content = content.into();

        let name = NAME_RE
            .captures(&content)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();

        let version = VERSION_RE
            .captures(&content)
            .map(|caps| caps[2].to_string())
            .ok_or_else(|| Error::missing_field("version", &path))?;

        let sha256 = SHA256_RE
            .captures(&content)
            .map(|caps| caps[2].to_string())
            .ok_or_else(|| Error::missing_field("sha256", &path))?;

        let url_template = URL_RE
            .captures(&content)
            .map(|caps| caps[2].to_string())
            .ok_or_else(|| Error::missing_field("url", &path))?;

        let url = if url_template.contains(VERSION_PLACEHOLDER) {
            expand_url(&url_template, &name, &version)
        } else {
            url_template.clone()
        };

        let caps = GITHUB_URL_RE
            .captures(&url)
            .ok_or_else(|| Error::invalid_url(&url_template))?;
        let owner = caps[1].to_string();
        let repo = caps[2].to_string();

        debug!(
            path = %path.display(),
            %version,
            %owner,
            %repo,
            templated = url_template.contains(VERSION_PLACEHOLDER),
            "Parsed formula"
        );

        Ok(Self {
            path,
            content,
            name,
            version,
            url_template,
            url,
            sha256,
            owner,
            repo,
        })
    }

    /// The file this formula was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The formula text, including any applied patches.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The `name = "..."` value, or an empty string when absent.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current version string as written in the formula.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The concrete download URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The URL exactly as written, possibly containing placeholders.
    #[must_use]
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Whether the URL is derived from the version placeholder.
    #[must_use]
    pub fn is_url_template(&self) -> bool {
        self.url_template.contains(VERSION_PLACEHOLDER)
    }

    /// The current checksum.
    #[must_use]
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Repository owner derived from the URL.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name derived from the URL.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Record a new release and patch the formula text.
    ///
    /// The first `version` and `sha256` assignments are always rewritten.
    /// The `url` assignment is rewritten only when it is a literal URL;
    /// template URLs follow the version on their own.
    pub fn apply(&mut self, version: &str, url: &str, sha256: &str) {
        self.version = version.to_string();
        self.url = url.to_string();
        self.sha256 = sha256.to_string();

        self.content = replace_first(&VERSION_RE, &self.content, &capture_template(version));
        self.content = replace_first(&SHA256_RE, &self.content, &capture_template(sha256));
        if !self.is_url_template() {
            self.content = replace_first(&URL_RE, &self.content, &capture_template(url));
            self.url_template = url.to_string();
        }
    }

    /// Write the formula text back to its file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn write(&self) -> Result<()> {
        std::fs::write(&self.path, &self.content).map_err(|e| Error::io("write", &self.path, e))
    }
}

/// Replace only the first match of `re` in `haystack`.
///
/// `replacement` uses the `regex` expansion syntax (`${1}`, `$$`). All text
/// outside the first match is returned unchanged.
#[must_use]
pub fn replace_first(re: &Regex, haystack: &str, replacement: &str) -> String {
    re.replacen(haystack, 1, replacement).into_owned()
}

/// Expand `#{name}` and `#{version}` in a URL template.
#[must_use]
pub fn expand_url(template: &str, name: &str, version: &str) -> String {
    template
        .replace(NAME_PLACEHOLDER, name)
        .replace(VERSION_PLACEHOLDER, version)
}

/// Extension of the last path segment of a URL, including the dot.
///
/// Returns an empty string when the file name has no extension, in the
/// manner of `path.ext` on URL paths (`foo.tar.gz` yields `.gz`).
#[must_use]
pub fn url_extension(url: &str) -> &str {
    let file_name = url.rsplit('/').next().unwrap_or(url);
    file_name.rfind('.').map_or("", |idx| &file_name[idx..])
}

/// Keep the prefix and closing quote groups, swap the value in between.
fn capture_template(value: &str) -> String {
    format!("${{1}}{}${{3}}", value.replace('$', "$$"))
}
