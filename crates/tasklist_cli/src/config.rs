//! Command-line and environment configuration.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tasklist_core::{default_data_dir, default_log_level};

#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    about = "Interactive task list: add, list, toggle and delete tasks",
    version
)]
pub struct Cli {
    /// Where tasks are kept between runs
    #[arg(long, value_enum, default_value_t = StoreKind::File, env = "TASKLIST_STORE")]
    pub store: StoreKind,

    /// Directory holding todos.json (default: per-user data directory)
    #[arg(long, env = "TASKLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error or off
    #[arg(long, env = "TASKLIST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files (default: <data-dir>/logs)
    #[arg(long, env = "TASKLIST_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Keep tasks in memory; nothing survives exit
    Memory,
    /// Save tasks to todos.json after every change
    File,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreKind,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Fills defaults and makes every path absolute relative to `cwd`.
    pub fn resolve(cli: Cli, cwd: &Path) -> Result<Self> {
        let data_dir = match cli.data_dir {
            Some(dir) => dir,
            None => default_data_dir()
                .ok_or_else(|| anyhow!("no per-user data directory; pass --data-dir"))?,
        };
        let data_dir = absolutize(data_dir, cwd);
        let log_dir = cli
            .log_dir
            .map(|dir| absolutize(dir, cwd))
            .unwrap_or_else(|| data_dir.join("logs"));

        Ok(Self {
            store: cli.store,
            data_dir,
            log_level: cli
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
        })
    }

    pub fn from_env_and_args() -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot read current directory")?;
        Self::resolve(Cli::parse(), &cwd)
    }
}

fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
