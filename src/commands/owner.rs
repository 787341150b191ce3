//! Owner identifier command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::OwnerAction;
use crate::owner::OwnerId;

/// Run the owner command
pub fn run(action: OwnerAction, owner_file: &Path) -> Result<()> {
    match action {
        OwnerAction::New { force } => {
            let id = create(owner_file, force)?;
            println!("{}", id);
            Ok(())
        }
        OwnerAction::Show => {
            let id = OwnerId::load(owner_file)
                .with_context(|| format!("Failed to read owner identifier from {:?}", owner_file))?;
            println!("{}", id);
            Ok(())
        }
    }
}

/// Generate and persist a new identifier.
///
/// Refuses to replace an existing one unless `force` is set, since every
/// region written under the old identifier would become unmanageable.
fn create(owner_file: &Path, force: bool) -> Result<OwnerId> {
    if owner_file.exists() && !force {
        anyhow::bail!(
            "An owner identifier already exists in {:?}.\n\
             Replacing it orphans the regions it owns; use --force to do it anyway.",
            owner_file
        );
    }
    let id = OwnerId::generate();
    id.save(owner_file)
        .with_context(|| format!("Failed to save owner identifier to {:?}", owner_file))?;
    tracing::info!("Saved new owner identifier to {:?}", owner_file);
    Ok(id)
}
