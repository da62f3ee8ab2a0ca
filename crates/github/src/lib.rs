//! GitHub Releases source for maltmill.
//!
//! [`GitHubReleaseSource`] implements [`maltmill_homebrew::ReleaseSource`]
//! over the GitHub REST API:
//!
//! - `GET /repos/{owner}/{repo}/releases/latest`
//! - `GET /repos/{owner}/{repo}/releases/tags/{tag}`
//! - asset downloads streamed through SHA-256 ([`sha256_of_url`])
//!
//! The API base URL is configurable for GitHub Enterprise installations.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

mod checksum;
mod client;
mod config;
mod error;

pub use checksum::sha256_of_url;
pub use client::{GitHubReleaseSource, USER_AGENT};
pub use config::{DEFAULT_API_BASE, GitHubConfig};
pub use error::{Error, Result};
