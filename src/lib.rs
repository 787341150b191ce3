//! # shorewall-tenant - Shared ownership of Shorewall configuration files
//!
//! Lets several independent applications add and remove entries in the same
//! Shorewall configuration files without touching each other's entries or
//! the hand-written parts of those files.
//!
//! ## Features
//!
//! - **Owner Regions** - Each application's entries live between a pair of
//!   sentinel comment lines tagged with its identifier
//! - **Per-Category Locks** - Read-modify-write cycles are serialized with
//!   `flock` on one lock file per category
//! - **Typed Records** - Zones, interfaces, policies, rules and SNAT entries
//!   are parsed and written through one line codec
//! - **Fail Closed** - A file with a broken region is reported and left alone
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     shorewall-tenant                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: owner, zones, interfaces, rules, reload... │
//! ├─────────────────────────────────────────────────────────────┤
//! │  App / ConfigFiles                                          │
//! │    └── list, add, remove per category and owner            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Records (codec)                                            │
//! │    └── Zone, Interface, Policy, Rule, Snat                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Rewriter                                                   │
//! │    ├── Region locator (sentinel lines)                      │
//! │    └── In-place single-write file update                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Lock (fs2 flock)                                           │
//! │    └── One lock file per category, plus reload              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Shorewall (CommandExecutor trait)                          │
//! │    └── reload, version                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use shorewall_tenant::{App, Config, Rule};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("/etc/shorewall-tenant/config.yaml")?;
//!
//!     // First run: generate an identifier and keep it somewhere safe.
//!     let app = App::new(config.clone());
//!     let id = app.id();
//!
//!     // Later runs: come back as the same owner.
//!     let app = App::from_id(config, &id)?;
//!     app.files()
//!         .add_rule(&Rule::new("ACCEPT", "net", "fw").protocol("tcp").dport("443"))?;
//!     app.reload()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`app`] - Per-application handle (identity, files, reload)
//! - [`category`] - The managed configuration files
//! - [`cli`] - Command-line interface definitions
//! - [`cmd_abstraction`] - External command execution behind a trait
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Library error type
//! - [`files`] - Locked list/add/remove on category files
//! - [`lock`] - Per-category advisory file locks
//! - [`owner`] - Owner identifiers
//! - [`records`] - Record types and line codec
//! - [`region`] - Sentinel region locator
//! - [`rewriter`] - Region-scoped in-place file rewrite
//! - [`shorewall`] - Shorewall executable wrapper

pub mod app;
pub mod category;
pub mod cli;
pub mod cmd_abstraction;
pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod lock;
pub mod owner;
pub mod records;
pub mod region;
pub mod rewriter;
pub mod shorewall;

pub use app::App;
pub use category::Category;
pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::{ErrorKind, Result, TenantError};
pub use files::ConfigFiles;
pub use owner::OwnerId;
pub use records::{Interface, Policy, Record, Rule, Snat, Zone};
pub use rewriter::Scope;
