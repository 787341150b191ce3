//! One application's handle on the shared Shorewall configuration.
//!
//! Several unrelated applications can manage Shorewall on the same host. Each
//! one is an [`App`] with its own random [`OwnerId`]; every record it adds
//! lands in a region of the shared file that only it touches. The identifier
//! must be saved by the application (see [`App::id`]) and handed back through
//! [`App::from_id`] on later runs.

use std::path::PathBuf;

use crate::category::Category;
use crate::cmd_abstraction::{CommandExecutor, RealCommandExecutor};
use crate::config::Config;
use crate::error::Result;
use crate::files::ConfigFiles;
use crate::owner::OwnerId;
use crate::shorewall::Shorewall;

pub struct App<E: CommandExecutor = RealCommandExecutor> {
    owner: OwnerId,
    config: Config,
    shorewall: Shorewall<E>,
}

impl App<RealCommandExecutor> {
    /// Create an App with a freshly generated identifier.
    ///
    /// Call this once per installation, then persist [`App::id`].
    pub fn new(config: Config) -> Self {
        Self::with_owner(config, OwnerId::generate())
    }

    /// Recreate an App from a previously saved identifier.
    pub fn from_id(config: Config, id: &str) -> Result<Self> {
        Ok(Self::with_owner(config, OwnerId::parse(id)?))
    }

    pub fn with_owner(config: Config, owner: OwnerId) -> Self {
        let shorewall = Shorewall::new(&config);
        Self {
            owner,
            config,
            shorewall,
        }
    }
}

impl<E: CommandExecutor> App<E> {
    pub fn with_executor(config: Config, owner: OwnerId, executor: E) -> Self {
        let shorewall = Shorewall::with_executor(&config, executor);
        Self {
            owner,
            config,
            shorewall,
        }
    }

    /// Canonical string form of the owner identifier.
    pub fn id(&self) -> String {
        self.owner.to_string()
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn file_path(&self, category: Category) -> PathBuf {
        self.config.file_path(category)
    }

    /// This application's view of the category files.
    pub fn files(&self) -> ConfigFiles<'_> {
        ConfigFiles::owned(&self.config, &self.owner)
    }

    /// Reload Shorewall, one application at a time.
    pub fn reload(&self) -> Result<()> {
        self.shorewall.reload()
    }

    pub fn version(&self) -> Result<String> {
        self.shorewall.version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_abstraction::{CommandOutput, MockCommandExecutor};
    use crate::error::ErrorKind;
    use crate::records::Zone;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> Config {
        let base = dir.path().join("etc");
        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(base.join("zones"), "fw firewall\n").unwrap();
        Config::with_dirs(base, dir.path().join("locks"))
    }

    #[test]
    fn test_from_id_keeps_identity() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config(&dir));
        let again = App::from_id(config(&dir), &app.id()).unwrap();
        assert_eq!(again.owner(), app.owner());
    }

    #[test]
    fn test_from_id_invalid() {
        let dir = TempDir::new().unwrap();
        let err = App::from_id(config(&dir), "not-an-id").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_restarted_app_sees_its_records() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config(&dir));
        app.files().add_zone(&Zone::new("dmz", "ipv4")).unwrap();

        let restarted = App::from_id(config(&dir), &app.id()).unwrap();
        assert_eq!(restarted.files().zones().unwrap(), vec![Zone::new("dmz", "ipv4")]);

        let stranger = App::new(config(&dir));
        assert!(stranger.files().zones().unwrap().is_empty());
    }

    #[test]
    fn test_file_path_follows_config() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config(&dir));
        assert_eq!(app.file_path(Category::Zones), dir.path().join("etc/zones"));
    }

    #[test]
    fn test_reload_takes_reload_lock() {
        let dir = TempDir::new().unwrap();
        let mut mock = MockCommandExecutor::new();
        mock.expect_execute()
            .withf(|_, args| args == ["reload".to_string()])
            .times(1)
            .returning(|_, _| {
                Ok(CommandOutput {
                    code: Some(0),
                    ..Default::default()
                })
            });

        let app = App::with_executor(config(&dir), OwnerId::generate(), mock);
        app.reload().unwrap();
        assert!(dir.path().join("locks/reload.lock").exists());
    }

    #[test]
    fn test_version_passthrough() {
        let dir = TempDir::new().unwrap();
        let mut mock = MockCommandExecutor::new();
        mock.expect_execute()
            .withf(|_, args| args == ["version".to_string()])
            .returning(|_, _| {
                Ok(CommandOutput {
                    stdout: "5.2.8\n".to_string(),
                    code: Some(0),
                    ..Default::default()
                })
            });

        let app = App::with_executor(config(&dir), OwnerId::generate(), mock);
        assert_eq!(app.version().unwrap(), "5.2.8");
    }
}
