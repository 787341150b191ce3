//! Configuration for shorewall-tenant.
//!
//! All file locations are carried in a [`Config`] value handed to the
//! components that need them, so tests can point everything at a temporary
//! directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::category::Category;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/shorewall-tenant/config.yaml";
pub const DEFAULT_BASE_DIR: &str = "/etc/shorewall";
pub const DEFAULT_LOCK_DIR: &str = "/run/shorewall-tenant";
pub const DEFAULT_SHOREWALL_BIN: &str = "/usr/sbin/shorewall";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the Shorewall configuration files
    pub base_dir: PathBuf,

    /// Directory holding the per-category lock files
    pub lock_dir: PathBuf,

    /// Path to the shorewall executable (used for reload/version)
    pub shorewall_bin: PathBuf,

    /// File names of each category under `base_dir`
    pub files: CategoryFiles,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            lock_dir: PathBuf::from(DEFAULT_LOCK_DIR),
            shorewall_bin: PathBuf::from(DEFAULT_SHOREWALL_BIN),
            files: CategoryFiles::default(),
        }
    }
}

/// File name for each category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryFiles {
    pub zones: String,
    pub interfaces: String,
    pub policy: String,
    pub rules: String,
    pub snat: String,
}

impl Default for CategoryFiles {
    fn default() -> Self {
        Self {
            zones: Category::Zones.default_file_name().to_string(),
            interfaces: Category::Interfaces.default_file_name().to_string(),
            policy: Category::Policy.default_file_name().to_string(),
            rules: Category::Rules.default_file_name().to_string(),
            snat: Category::Snat.default_file_name().to_string(),
        }
    }
}

impl CategoryFiles {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Zones => &self.zones,
            Category::Interfaces => &self.interfaces,
            Category::Policy => &self.policy,
            Category::Rules => &self.rules,
            Category::Snat => &self.snat,
        }
    }
}

impl Config {
    /// Configuration rooted at `base_dir`, with locks in `lock_dir`.
    pub fn with_dirs(base_dir: impl Into<PathBuf>, lock_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            lock_dir: lock_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the file if it exists, otherwise use defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.base_dir.as_os_str().is_empty() {
            anyhow::bail!("base_dir must not be empty");
        }
        if self.lock_dir.as_os_str().is_empty() {
            anyhow::bail!("lock_dir must not be empty");
        }

        for category in Category::ALL {
            let name = self.files.get(category);
            if name.is_empty() || name.contains('/') || name == "." || name == ".." {
                anyhow::bail!(
                    "Invalid file name '{}' for {}: must be a plain file name",
                    name,
                    category
                );
            }
        }

        Ok(())
    }

    /// Save configuration to YAML file atomically
    ///
    /// Uses tempfile + rename pattern to prevent corruption on crash.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        let parent_dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create config directory: {:?}", parent_dir))?;
        let mut temp_file = NamedTempFile::new_in(parent_dir)
            .context("Failed to create temporary file for config")?;

        temp_file.write_all(content.as_bytes())?;
        temp_file.as_file().sync_all()?;

        temp_file
            .persist(path)
            .with_context(|| format!("Failed to persist config file: {:?}", path))?;

        Ok(())
    }

    /// Full path of the file backing `category`.
    pub fn file_path(&self, category: Category) -> PathBuf {
        self.base_dir.join(self.files.get(category))
    }
}
