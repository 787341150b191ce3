//! Reload and version command implementations.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::shorewall::Shorewall;

/// Reload Shorewall
pub fn reload(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    Shorewall::new(&config)
        .reload()
        .context("Failed to reload Shorewall")?;
    println!("[OK] Shorewall reloaded");
    Ok(())
}

/// Print our own version, then the installed Shorewall version
pub fn version(config_path: &Path) -> Result<()> {
    println!("shorewall-tenant {}", env!("CARGO_PKG_VERSION"));
    let config = Config::load_or_default(config_path)?;
    let version = Shorewall::new(&config)
        .version()
        .context("Failed to query Shorewall version")?;
    println!("shorewall {}", version);
    Ok(())
}
