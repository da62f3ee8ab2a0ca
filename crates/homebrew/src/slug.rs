//! `owner/repo[@tag]` repository slugs.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A hosted repository with an optional release tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug {
    owner: String,
    repo: String,
    tag: Option<String>,
}

impl Slug {
    /// Parse `owner/repo` or `owner/repo@tag`.
    ///
    /// A missing or empty tag means "use the latest release".
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSlug`] unless the slug has exactly one `/`
    /// separating a non-empty owner and repository, and at most one `@`.
    pub fn parse(slug: &str) -> Result<Self> {
        let (owner, rest) = slug
            .split_once('/')
            .ok_or_else(|| Error::invalid_slug(slug))?;
        if rest.contains('/') || rest.matches('@').count() > 1 {
            return Err(Error::invalid_slug(slug));
        }

        let (repo, tag) = match rest.split_once('@') {
            Some((repo, tag)) => (repo, Some(tag)),
            None => (rest, None),
        };
        if owner.is_empty() || repo.is_empty() {
            return Err(Error::invalid_slug(slug));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            tag: tag.filter(|t| !t.is_empty()).map(String::from),
        })
    }

    /// Repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Requested release tag; `None` selects the latest release.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl FromStr for Slug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)?;
        if let Some(tag) = &self.tag {
            write!(f, "@{tag}")?;
        }
        Ok(())
    }
}
