//! maltmill: keep Homebrew formulas in sync with GitHub releases.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;
mod errors;
mod tracing;

use crate::cli::Cli;
use crate::commands::Command;
use crate::commands::{new::execute_new, update::execute_update};
use crate::errors::{CliError, CliResult, EXIT_OK, exit_code_for, render_error};
use crate::tracing::{Level, TracingConfig, TracingFormat};
use maltmill_github::GitHubReleaseSource;
use std::io;

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();
    let json_mode = cli.json;

    let tracing_config = TracingConfig {
        format: if json_mode {
            TracingFormat::Json
        } else {
            TracingFormat::Compact
        },
        level: Level::from(cli.level),
    };
    if let Err(e) = crate::tracing::init_tracing(tracing_config) {
        eprintln!("{e:?}");
    }

    let exit_code = match run(cli) {
        Ok(()) => EXIT_OK,
        Err(err) => {
            let code = exit_code_for(&err);
            render_error(err, json_mode);
            code
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> CliResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::config(format!("Failed to start async runtime: {e}")))?;
    runtime.block_on(execute(cli))
}

async fn execute(cli: Cli) -> CliResult<()> {
    let platform = cli.platform.to_platform();
    let config = cli.github.to_config();
    let command = cli.into_command()?;

    let source = GitHubReleaseSource::new(config).map_err(|e| {
        CliError::config_with_help(e.to_string(), "Check --api-url and TLS configuration")
    })?;
    ::tracing::debug!(api_base = %source.config().api_base, %platform, "Using GitHub release source");

    let mut stdout = io::stdout().lock();
    match command {
        Command::Update { files, write } => {
            execute_update(&source, platform, &files, write, &mut stdout).await
        }
        Command::New {
            slug,
            write,
            output,
        } => {
            let cwd = std::env::current_dir().map_err(|e| {
                CliError::config(format!("Cannot determine current directory: {e}"))
            })?;
            execute_new(
                &source,
                platform,
                &slug,
                write,
                output.as_deref(),
                &cwd,
                &mut stdout,
            )
            .await
            .map(|_| ())
        }
    }
}
