//! Config Command
//!
//! Manage ChurnGuard configuration.
//!
//! Usage:
//!   churnguard config show [-f json]
//!   churnguard config path
//!   churnguard config init [--force]

use crate::cli::ui::Output;
use crate::cli::util::OutputFormat;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged effective configuration
pub fn show(format: OutputFormat) -> Result<()> {
    let config = ConfigLoader::load()?;
    println!(
        "{}",
        ConfigLoader::render(&config, format == OutputFormat::Json)?
    );
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Initialize project configuration
pub fn init(force: bool) -> Result<()> {
    let path = ConfigLoader::init_project(force)?;
    let out = Output::new();
    out.success("Initialized project configuration");
    println!("  Config: {}", path.display());
    Ok(())
}
