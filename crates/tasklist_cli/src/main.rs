//! `tasklist` interactive entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and pick the store backend.
//! - Hand one explicitly constructed service to the prompt loop.

mod command;
mod config;
mod shell;

use anyhow::Result;
use config::{AppConfig, StoreKind};
use log::info;
use shell::Shell;
use tasklist_core::{FileStore, TaskService, TaskStore, VolatileStore};

fn main() -> Result<()> {
    let config = AppConfig::from_env_and_args()?;

    // The shell stays usable without file logs.
    if let Err(err) = tasklist_core::init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let store: Box<dyn TaskStore> = match config.store {
        StoreKind::Memory => Box::new(VolatileStore::new()),
        StoreKind::File => Box::new(FileStore::in_dir(&config.data_dir)),
    };
    info!(
        "event=cli_start module=cli status=ok core_version={} backend={}",
        tasklist_core::core_version(),
        store.describe()
    );

    let mut service = TaskService::open(store);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(stdin.lock(), stdout.lock(), &mut service).run()?;
    Ok(())
}
