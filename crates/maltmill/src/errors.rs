//! CLI error types, exit codes and rendering
//!
//! Library errors keep their full miette diagnostic chain so that help text
//! from the formula and GitHub layers reaches the user.

use miette::{Diagnostic, Report};
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

/// Successful exit code
pub const EXIT_OK: i32 = 0;
/// Operation failure exit code (network, parse, write)
pub const EXIT_FAILED: i32 = 1;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// CLI or configuration error (exit code 2)
    #[error("CLI/configuration error: {message}")]
    #[diagnostic(code(maltmill::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },

    /// A formula operation failed (exit code 1)
    #[error("{context}")]
    #[diagnostic(code(maltmill::cli::failed))]
    Failed {
        /// What was being attempted
        context: String,
        /// The underlying failure
        #[source]
        #[diagnostic_source]
        source: maltmill_homebrew::Error,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new operation failure
    #[must_use]
    pub fn failed(context: impl Into<String>, source: maltmill_homebrew::Error) -> Self {
        Self::Failed {
            context: context.into(),
            source,
        }
    }
}

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// Get exit code for a CLI error
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Failed { .. } => EXIT_FAILED,
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    status: &'static str,
    code: &'static str,
    message: String,
    causes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<&'a str>,
}

fn envelope(err: &CliError) -> ErrorEnvelope<'_> {
    let mut causes = Vec::new();
    let mut current = std::error::Error::source(err);
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    ErrorEnvelope {
        status: "error",
        code: match err {
            CliError::Config { .. } => "config",
            CliError::Failed { .. } => "failed",
        },
        message: err.to_string(),
        causes,
        help: match err {
            CliError::Config { help, .. } => help.as_deref(),
            CliError::Failed { .. } => None,
        },
    }
}

/// Render error appropriately based on JSON flag
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub fn render_error(err: CliError, json_mode: bool) {
    if json_mode {
        match serde_json::to_string(&envelope(&err)) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("Error serializing error response"),
        }
    } else {
        let report = Report::new(err);
        eprintln!("{report:?}");
        let _ = io::stderr().flush();
    }
}
