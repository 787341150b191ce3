//! Read-modify-write of an owner's region inside a shared file.
//!
//! The file is read whole, the owner's region is handed to a mutation
//! callback, and the result is written back starting at the region's start
//! offset followed by the untouched tail. Bytes before the region are never
//! rewritten. The caller is expected to hold the category lock for the whole
//! cycle (see [`crate::lock`]).
//!
//! The write is done in place, without a temporary file: if it fails midway
//! the file may be left truncated.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Result, TenantError};
use crate::owner::OwnerId;
use crate::region::{self, Region};

/// Which part of a file an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// The region delimited by this owner's sentinel lines.
    Owner(&'a OwnerId),
    /// The whole file, for single-tenant setups.
    Global,
}

impl Scope<'_> {
    fn locate(&self, path: &Path, buf: &[u8]) -> Result<Region> {
        match self {
            Scope::Owner(owner) => region::locate(owner, buf).map_err(|source| {
                warn!("Refusing to touch {:?}: {}", path, source);
                TenantError::MalformedConfig {
                    path: path.to_path_buf(),
                    source,
                }
            }),
            Scope::Global => Ok(Region::whole(buf.len())),
        }
    }
}

fn read_all(file: &mut File, path: &Path) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|e| TenantError::io("read", path, e))?;
    Ok(buf)
}

/// Return a copy of the scoped region of `path`; empty if the owner has no
/// region yet.
pub fn read(scope: Scope<'_>, path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| TenantError::io("open", path, e))?;
    let buf = read_all(&mut file, path)?;
    let region = scope.locate(path, &buf)?;
    Ok(buf[region.range()].to_vec())
}

/// Replace the scoped region of `path` with the output of `mutate`.
///
/// `mutate` receives the current region bytes (empty if absent). If the
/// owner had no region, the new content is wrapped in sentinel lines and
/// appended at end of file. Any error from `mutate` or from locating the
/// region leaves the file untouched.
pub fn rewrite<F>(scope: Scope<'_>, path: &Path, mutate: F) -> Result<()>
where
    F: FnOnce(&[u8]) -> Result<Vec<u8>>,
{
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| TenantError::io("open", path, e))?;

    let buf = read_all(&mut file, path)?;
    let region = scope.locate(path, &buf)?;

    let mut new_region = mutate(&buf[region.range()])?;
    if let (Scope::Owner(owner), false) = (scope, region.found) {
        debug!("Creating region for {} in {:?}", owner, path);
        let wrapped = region::wrap(owner, &new_region);
        // The start sentinel must begin a line of its own.
        new_region = if buf.is_empty() || buf.ends_with(b"\n") {
            wrapped
        } else {
            [b"\n".as_slice(), wrapped.as_slice()].concat()
        };
    }

    let tail = &buf[region.end..];
    let mut out = Vec::with_capacity(new_region.len() + tail.len());
    out.extend_from_slice(&new_region);
    out.extend_from_slice(tail);

    file.seek(SeekFrom::Start(region.start as u64))
        .map_err(|e| TenantError::io("seek", path, e))?;
    let written = file
        .write(&out)
        .map_err(|e| TenantError::io("write", path, e))?;
    if written < out.len() {
        return Err(TenantError::ShortWrite {
            path: path.to_path_buf(),
            written,
            expected: out.len(),
        });
    }

    let new_len = (region.start + written) as u64;
    file.set_len(new_len)
        .map_err(|e| TenantError::io("truncate", path, e))?;

    debug!(
        "Rewrote {:?}: region {}..{} -> {} bytes, file {} -> {} bytes",
        path,
        region.start,
        region.end,
        new_region.len(),
        buf.len(),
        new_len
    );
    Ok(())
}
