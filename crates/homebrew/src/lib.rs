//! Homebrew formula maintenance for maltmill.
//!
//! This crate holds everything that does not touch the network:
//!
//! - [`Formula`] parses an existing formula file and patches its `version`,
//!   `url` and `sha256` assignments in place
//! - [`FormulaUpdater`] reconciles a formula against the latest release
//! - [`FormulaCreator`] and [`FormulaGenerator`] scaffold a new formula from
//!   an `owner/repo[@tag]` slug
//!
//! Release metadata and asset checksums come from a [`ReleaseSource`], which
//! the `maltmill-github` crate implements over the GitHub REST API.
//!
//! # Example
//!
//! ```rust,ignore
//! use maltmill_homebrew::{Formula, FormulaUpdater, Platform};
//!
//! let mut formula = Formula::load("Formula/mytool.rb")?;
//! let updater = FormulaUpdater::new(&source, Platform::default());
//! if updater.update(&mut formula).await?.is_updated() {
//!     formula.write()?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

mod creator;
pub mod error;
mod formula;
mod generator;
mod release;
mod slug;
#[cfg(test)]
mod testing;
mod updater;
pub mod version;

pub use creator::FormulaCreator;
pub use error::{Error, Result};
pub use formula::{Formula, VERSION_PLACEHOLDER, expand_url, replace_first, url_extension};
pub use generator::{FormulaData, FormulaGenerator, capitalized_name};
pub use release::{Asset, Platform, Release, ReleaseSource, find_asset};
pub use slug::Slug;
pub use updater::{FormulaUpdater, UpdateOutcome};
