//! Database Command
//!
//! Usage:
//!   churnguard db init [--seed]

use std::fs;

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::storage::{Database, PoolConfig};
use crate::types::Result;

/// Create the schema at the configured path, optionally loading demo data
pub fn init(seed: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let path = &config.database.path;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let db = Database::open_with_config(path, PoolConfig::from(&config.database))?;
    db.initialize()?;

    let out = Output::new();
    out.success(&format!("Initialized database: {}", path.display()));

    if seed {
        db.seed_demo()?;
        out.success("Loaded demo dataset");
    }
    Ok(())
}
