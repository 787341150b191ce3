//! CLI command implementations.

pub mod owner;
pub mod records;
pub mod shorewall;

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::Cli;
use crate::config::Config;
use crate::files::ConfigFiles;
use crate::owner::OwnerId;

/// What a record command operates on, resolved from the global flags.
pub struct Session {
    pub config: Config,
    /// `None` when `--global` was given.
    pub owner: Option<OwnerId>,
}

impl Session {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load_or_default(&cli.config)?;
        let owner = if cli.global_scope {
            None
        } else {
            Some(resolve_owner(cli.owner.as_deref(), &cli.owner_file)?)
        };
        Ok(Self { config, owner })
    }

    pub fn files(&self) -> ConfigFiles<'_> {
        match &self.owner {
            Some(owner) => ConfigFiles::owned(&self.config, owner),
            None => ConfigFiles::global(&self.config),
        }
    }
}

/// `--owner` wins; otherwise the identifier persisted in `owner_file`.
fn resolve_owner(explicit: Option<&str>, owner_file: &Path) -> Result<OwnerId> {
    if let Some(id) = explicit {
        return Ok(OwnerId::parse(id)?);
    }
    OwnerId::load(owner_file).with_context(|| {
        format!(
            "No owner identifier in {:?}. Run 'shorewall-tenant owner new' or pass --owner",
            owner_file
        )
    })
}
