//! Owner identity: the random identifier that scopes an application's
//! region inside every shared configuration file.
//!
//! An identifier is generated once per installation. The owning application
//! must persist it and hand it back on every later run, otherwise it loses
//! track of the regions it created.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, TenantError};

/// A 128-bit random owner identifier, displayed in canonical UUID form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(Uuid);

impl OwnerId {
    /// Generate a fresh identifier from the OS entropy source.
    ///
    /// # Panics
    /// Aborts the caller if the entropy source is unavailable; there is no
    /// meaningful recovery from that.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier previously obtained from [`OwnerId::to_string`].
    pub fn parse(input: &str) -> Result<Self> {
        Uuid::parse_str(input.trim())
            .map(Self)
            .map_err(|source| TenantError::InvalidOwnerId {
                input: input.to_string(),
                source,
            })
    }

    /// Read an identifier persisted with [`OwnerId::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| TenantError::io("read", path, e))?;
        Self::parse(&content)
    }

    /// Persist the identifier atomically (temp file + rename), mode 0600.
    pub fn save(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| TenantError::io("create", parent, e))?;

        let mut temp_file =
            NamedTempFile::new_in(parent).map_err(|e| TenantError::io("create", parent, e))?;
        writeln!(temp_file, "{}", self).map_err(|e| TenantError::io("write", path, e))?;
        temp_file
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(|e| TenantError::io("chmod", path, e))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| TenantError::io("sync", path, e))?;
        temp_file
            .persist(path)
            .map_err(|e| TenantError::io("persist", path, e.error))?;
        Ok(())
    }

    /// Load the identifier stored at `path`, or generate and store a new one
    /// if the file does not exist yet.
    pub fn load_or_generate(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(id) => Ok(id),
            Err(TenantError::FileNotFound { .. }) => {
                let id = Self::generate();
                id.save(path)?;
                debug!("Generated new owner identifier {} at {:?}", id, path);
                Ok(id)
            }
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for OwnerId {
    type Err = TenantError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_generate_is_unique() {
        let a = OwnerId::generate();
        let b = OwnerId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_parse_round_trip() {
        let id = OwnerId::generate();
        let parsed: OwnerId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_canonical_form() {
        let id = OwnerId::parse("11111111-1111-1111-1111-111111111111").unwrap();
        assert_eq!(id.to_string(), "11111111-1111-1111-1111-111111111111");

        let upper = OwnerId::parse("ABCDEF01-2345-6789-ABCD-EF0123456789").unwrap();
        assert_eq!(upper.to_string(), "abcdef01-2345-6789-abcd-ef0123456789");
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "not-a-uuid", "11111111-1111-1111-1111-11111111111"] {
            let err = OwnerId::parse(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "input: {input:?}");
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state/owner-id");
        let id = OwnerId::generate();
        id.save(&path).unwrap();
        assert_eq!(OwnerId::load(&path).unwrap(), id);

        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_or_generate_is_stable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("owner-id");
        let first = OwnerId::load_or_generate(&path).unwrap();
        let second = OwnerId::load_or_generate(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_garbage_is_invalid_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("owner-id");
        std::fs::write(&path, "garbage\n").unwrap();
        let err = OwnerId::load_or_generate(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }
}
