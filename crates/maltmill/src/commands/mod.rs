pub mod new;
pub mod update;

use maltmill_homebrew::Slug;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Command {
    Update {
        files: Vec<PathBuf>,
        write: bool,
    },
    New {
        slug: Slug,
        write: bool,
        output: Option<PathBuf>,
    },
}
