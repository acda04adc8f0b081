//! Configuration management for the sticky-todo pad.
//!
//! Handles:
//! - Command-line argument parsing
//! - Locating the state file

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Directory, next to the executable, that holds the state file
pub const DATA_DIR: &str = "data";
/// State file name
pub const STATE_FILE: &str = "todos.json";

/// Command-line arguments for the sticky-todo pad
#[derive(Debug, Parser)]
#[command(name = "sticky-todo")]
#[command(about = "Floating todo pad with color-coded line statuses")]
#[command(version)]
pub struct Args {
    /// Use this state file instead of data/todos.json next to the executable
    #[arg(long, help = "Path of the JSON state file")]
    pub state_file: Option<PathBuf>,

    /// Log level for diagnostics written to stderr
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the document is loaded from and saved to
    pub state_file: PathBuf,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let state_file = match args.state_file {
            Some(path) => path,
            None => default_state_file()?,
        };

        Ok(Config {
            state_file,
            log_level: args.log_level,
        })
    }

    /// Configuration pointing at an explicit state file
    pub fn with_state_file(path: impl Into<PathBuf>) -> Self {
        Config {
            state_file: path.into(),
            log_level: "warn".to_string(),
        }
    }
}

/// `data/todos.json` beside the executable, falling back to the platform
/// data directory when the executable cannot be located
pub fn default_state_file() -> Result<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    if let Some(dir) = exe_dir {
        return Ok(dir.join(DATA_DIR).join(STATE_FILE));
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        log::debug!("Executable directory unknown, using {}", data_dir.display());
        return Ok(data_dir.join("sticky-todo").join(STATE_FILE));
    }

    Ok(std::env::current_dir()?.join(DATA_DIR).join(STATE_FILE))
}
