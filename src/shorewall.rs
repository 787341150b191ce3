//! Thin wrapper around the `shorewall` executable.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::cmd_abstraction::{CommandExecutor, CommandOutput, RealCommandExecutor};
use crate::config::Config;
use crate::error::{Result, TenantError};
use crate::lock::{LockGuard, RELOAD_LOCK};

/// Runs `shorewall <subcommand>` through a [`CommandExecutor`].
pub struct Shorewall<E: CommandExecutor = RealCommandExecutor> {
    bin: PathBuf,
    lock_dir: PathBuf,
    executor: E,
}

impl Shorewall<RealCommandExecutor> {
    pub fn new(config: &Config) -> Self {
        Self::with_executor(config, RealCommandExecutor::new())
    }
}

impl<E: CommandExecutor> Shorewall<E> {
    pub fn with_executor(config: &Config, executor: E) -> Self {
        Self {
            bin: config.shorewall_bin.clone(),
            lock_dir: config.lock_dir.clone(),
            executor,
        }
    }

    fn run(&self, subcommand: &str) -> Result<CommandOutput> {
        debug!("Running {} {}", self.bin.display(), subcommand);

        let output = self
            .executor
            .execute(&self.bin, &[subcommand.to_string()])
            .map_err(|e| TenantError::io("execute", &self.bin, e))?;

        if !output.success() {
            return Err(TenantError::Command {
                command: format!("{} {subcommand}", self.bin.display()),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }

    /// Recompile and apply the current configuration.
    ///
    /// Runs under the shared reload lock, so applications reload one at a
    /// time.
    pub fn reload(&self) -> Result<()> {
        let _lock = LockGuard::acquire_named(&self.lock_dir, RELOAD_LOCK)?;
        self.run("reload")?;
        info!("Shorewall reloaded");
        Ok(())
    }

    /// Installed shorewall version.
    pub fn version(&self) -> Result<String> {
        let output = self.run("version")?;
        Ok(output.stdout.trim().to_string())
    }
}
