use crate::commands::Command;
use crate::errors::{CliError, CliResult};
use crate::tracing::LogLevel;
use clap::{Args, Parser, Subcommand};
use maltmill_github::{DEFAULT_API_BASE, GitHubConfig};
use maltmill_homebrew::{Platform, Slug};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "maltmill")]
#[command(about = "Keep Homebrew formulas in sync with GitHub releases")]
#[command(long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub update: UpdateArgs,

    #[command(flatten)]
    pub github: GitHubArgs,

    #[command(flatten)]
    pub platform: PlatformArgs,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(long, global = true, help = "Output logs and errors in JSON format")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(short = 'w', long, help = "Rewrite formula files in place instead of printing them")]
    pub write: bool,

    #[arg(value_name = "FILE", help = "Formula files to update")]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GitHubArgs {
    #[arg(
        long,
        global = true,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "GitHub API token"
    )]
    pub token: Option<String>,

    #[arg(
        long = "api-url",
        global = true,
        env = "MALTMILL_GITHUB_API",
        default_value = DEFAULT_API_BASE,
        help = "GitHub API base URL"
    )]
    pub api_url: String,
}

#[derive(Args, Debug)]
pub struct PlatformArgs {
    #[arg(long, global = true, default_value = "darwin", help = "OS marker release assets must contain")]
    pub os: String,

    #[arg(long, global = true, default_value = "amd64", help = "Architecture marker release assets must contain")]
    pub arch: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Create a new formula from a GitHub repository")]
    New {
        #[arg(short = 'w', long, help = "Write <name>.rb in the current directory")]
        write: bool,

        #[arg(short = 'o', long, value_name = "PATH", help = "Write the formula to PATH")]
        output: Option<PathBuf>,

        #[arg(value_name = "OWNER/REPO[@TAG]", help = "Repository slug with optional release tag")]
        slug: String,
    },
}

impl Cli {
    /// Convert parsed arguments into the command to run.
    pub fn into_command(self) -> CliResult<Command> {
        match self.command {
            Some(Commands::New {
                write,
                output,
                slug,
            }) => {
                let slug = Slug::parse(&slug).map_err(|e| {
                    CliError::config_with_help(e.to_string(), "Use owner/repo or owner/repo@tag")
                })?;
                Ok(Command::New {
                    slug,
                    write,
                    output,
                })
            }
            None => {
                if self.update.files.is_empty() {
                    return Err(CliError::config_with_help(
                        "No formula files given",
                        "Run 'maltmill <FILE>...' to update formulas or 'maltmill new <OWNER/REPO>' to create one",
                    ));
                }
                Ok(Command::Update {
                    files: self.update.files,
                    write: self.update.write,
                })
            }
        }
    }
}

impl GitHubArgs {
    pub fn to_config(&self) -> GitHubConfig {
        GitHubConfig::new()
            .with_api_base(&self.api_url)
            .with_token(self.token.clone())
    }
}

impl PlatformArgs {
    pub fn to_platform(&self) -> Platform {
        Platform::new(&self.os, &self.arch)
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["maltmill", "tool.rb"]).unwrap();

        assert_eq!(cli.level, LogLevel::Warn);
        assert!(!cli.json);
        assert!(!cli.update.write);
        assert_eq!(cli.update.files, vec![PathBuf::from("tool.rb")]);
        assert_eq!(cli.platform.to_platform(), Platform::default());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_update_multiple_files_with_write() {
        let cli = Cli::try_parse_from(["maltmill", "-w", "a.rb", "b.rb"]).unwrap();
        assert!(cli.update.write);

        let Command::Update { files, write } = cli.into_command().unwrap() else {
            panic!("Expected Update command");
        };
        assert!(write);
        assert_eq!(files, vec![PathBuf::from("a.rb"), PathBuf::from("b.rb")]);
    }

    #[test]
    fn test_no_files_is_config_error() {
        let cli = Cli::try_parse_from(["maltmill"]).unwrap();
        let err = cli.into_command().unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_new_command() {
        let cli =
            Cli::try_parse_from(["maltmill", "new", "-o", "Formula/tool.rb", "acme/tool@v1.0.0"])
                .unwrap();

        let Command::New {
            slug,
            write,
            output,
        } = cli.into_command().unwrap()
        else {
            panic!("Expected New command");
        };
        assert_eq!(slug.owner(), "acme");
        assert_eq!(slug.repo(), "tool");
        assert_eq!(slug.tag(), Some("v1.0.0"));
        assert!(!write);
        assert_eq!(output, Some(PathBuf::from("Formula/tool.rb")));
    }

    #[test]
    fn test_new_command_invalid_slug() {
        let cli = Cli::try_parse_from(["maltmill", "new", "not-a-slug"]).unwrap();
        let err = cli.into_command().unwrap_err();
        assert!(err.to_string().contains("invalid slug"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "maltmill", "new", "acme/tool", "--os", "linux", "--arch", "arm64", "-l", "debug",
        ])
        .unwrap();
        assert_eq!(cli.platform.to_platform(), Platform::new("linux", "arm64"));
        assert_eq!(cli.level, LogLevel::Debug);
    }

    #[test]
    fn test_github_config() {
        let cli = Cli::try_parse_from([
            "maltmill",
            "--api-url",
            "https://ghe.example.com/api/v3/",
            "--token",
            "ghp_x",
            "tool.rb",
        ])
        .unwrap();
        let config = cli.github.to_config();
        assert_eq!(config.api_base, "https://ghe.example.com/api/v3");
        assert_eq!(config.token.as_deref(), Some("ghp_x"));
    }

    #[test]
    fn test_invalid_log_level() {
        let result = Cli::try_parse_from(["maltmill", "--level", "invalid", "tool.rb"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["maltmill", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
