//! Error types for shorewall-tenant.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::category::Category;
use crate::region::MalformedRegion;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, TenantError>;

/// Coarse classification of a [`TenantError`], for callers that branch on the
/// failure class rather than on the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    MalformedConfig,
    InvalidFormat,
    Io,
    Lock,
    ExternalCommand,
}

#[derive(Error, Debug)]
pub enum TenantError {
    #[error("{category}: {what} not found")]
    NotFound { category: Category, what: String },

    #[error("configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("{category}: {what} already exists")]
    AlreadyExists { category: Category, what: String },

    #[error("{category}: {what} cannot be stored as a single line")]
    InvalidRecord { category: Category, what: String },

    #[error("malformed configuration in {}: {source}", path.display())]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: MalformedRegion,
    },

    #[error("invalid owner identifier '{input}': {source}")]
    InvalidOwnerId {
        input: String,
        #[source]
        source: uuid::Error,
    },

    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("short write to {}: wrote {written} of {expected} bytes", path.display())]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },

    #[error("failed to lock {name} ({}): {source}", path.display())]
    Lock {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{command} failed (exit code {code:?}): {stderr}")]
    Command {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl TenantError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::FileNotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::MalformedConfig { .. } => ErrorKind::MalformedConfig,
            Self::InvalidOwnerId { .. } | Self::InvalidRecord { .. } => ErrorKind::InvalidFormat,
            Self::Io { .. } | Self::ShortWrite { .. } => ErrorKind::Io,
            Self::Lock { .. } => ErrorKind::Lock,
            Self::Command { .. } => ErrorKind::ExternalCommand,
        }
    }

    /// Wrap an I/O error with the operation and path it happened on.
    ///
    /// `NotFound` from the OS is surfaced as [`TenantError::FileNotFound`] so
    /// callers can tell a missing file from other I/O trouble.
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            return Self::FileNotFound { path };
        }
        Self::Io { op, path, source }
    }
}
