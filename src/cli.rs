//! CLI argument parsing with clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::records::{Interface, Policy, Rule, Snat, Zone};

pub const DEFAULT_OWNER_FILE: &str = "/var/lib/shorewall-tenant/owner-id";

#[derive(Parser)]
#[command(name = "shorewall-tenant")]
#[command(author, version, about = "Share Shorewall configuration files between applications")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Owner identifier (overrides --owner-file)
    #[arg(long, global = true, conflicts_with = "global_scope")]
    pub owner: Option<String>,

    /// File holding the persisted owner identifier
    #[arg(long, default_value = DEFAULT_OWNER_FILE, global = true)]
    pub owner_file: PathBuf,

    /// Operate on whole files instead of an owner region
    #[arg(long = "global", global = true)]
    pub global_scope: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the owner identifier
    Owner {
        #[command(subcommand)]
        action: OwnerAction,
    },

    /// Manage zones
    Zones {
        #[command(subcommand)]
        action: ZoneAction,
    },

    /// Manage interfaces
    Interfaces {
        #[command(subcommand)]
        action: InterfaceAction,
    },

    /// Manage policies
    Policies {
        #[command(subcommand)]
        action: PolicyAction,
    },

    /// Manage rules
    Rules {
        #[command(subcommand)]
        action: RuleAction,
    },

    /// Manage SNAT entries
    Snat {
        #[command(subcommand)]
        action: SnatAction,
    },

    /// Reload Shorewall
    Reload,

    /// Show the Shorewall version
    Version,
}

#[derive(Subcommand, Clone, Copy)]
pub enum OwnerAction {
    /// Generate and persist a new owner identifier
    New {
        /// Replace an existing identifier (its regions become orphaned)
        #[arg(long)]
        force: bool,
    },
    /// Print the persisted owner identifier
    Show,
}

#[derive(Subcommand)]
pub enum ZoneAction {
    /// List this owner's entries
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Add a zone
    Add(ZoneArgs),
    /// Remove a zone
    Remove(ZoneKey),
}

#[derive(Subcommand)]
pub enum InterfaceAction {
    /// List this owner's entries
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Add an interface
    Add(InterfaceArgs),
    /// Remove an interface
    Remove(InterfaceKey),
}

#[derive(Subcommand)]
pub enum PolicyAction {
    /// List this owner's entries
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Add a policy
    Add(PolicyArgs),
    /// Remove a policy
    Remove(PolicyArgs),
}

#[derive(Subcommand)]
pub enum RuleAction {
    /// List this owner's entries
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Add a rule
    Add(RuleArgs),
    /// Remove a rule
    Remove(RuleArgs),
}

#[derive(Subcommand)]
pub enum SnatAction {
    /// List this owner's entries
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Add a SNAT entry
    Add(SnatArgs),
    /// Remove a SNAT entry
    Remove(SnatArgs),
}

#[derive(Args)]
pub struct ZoneArgs {
    pub name: String,
    #[arg(value_name = "TYPE")]
    pub zone_type: String,
}

#[derive(Args)]
pub struct ZoneKey {
    pub name: String,
}

#[derive(Args)]
pub struct InterfaceArgs {
    pub zone: String,
    pub name: String,
}

#[derive(Args)]
pub struct InterfaceKey {
    pub zone: String,
    /// Only remove this device (default: first interface of the zone)
    pub name: Option<String>,
}

#[derive(Args)]
pub struct PolicyArgs {
    pub source: String,
    pub destination: String,
    pub policy: String,
    #[arg(default_value = "")]
    pub log: String,
}

#[derive(Args)]
pub struct RuleArgs {
    pub action: String,
    pub source: String,
    pub destination: String,
    #[arg(long, default_value = "")]
    pub proto: String,
    #[arg(long, default_value = "")]
    pub dport: String,
    #[arg(long, default_value = "")]
    pub sport: String,
    #[arg(long, default_value = "")]
    pub origdest: String,
}

#[derive(Args)]
pub struct SnatArgs {
    pub action: String,
    pub source: String,
    pub destination: String,
}

impl From<&ZoneArgs> for Zone {
    fn from(a: &ZoneArgs) -> Self {
        Zone::new(&a.name, &a.zone_type)
    }
}

impl From<&InterfaceArgs> for Interface {
    fn from(a: &InterfaceArgs) -> Self {
        Interface::new(&a.zone, &a.name)
    }
}

impl From<&PolicyArgs> for Policy {
    fn from(a: &PolicyArgs) -> Self {
        Policy::new(&a.source, &a.destination, &a.policy, &a.log)
    }
}

impl From<&RuleArgs> for Rule {
    fn from(a: &RuleArgs) -> Self {
        Rule::new(&a.action, &a.source, &a.destination)
            .protocol(&a.proto)
            .dport(&a.dport)
            .sport(&a.sport)
            .origdest(&a.origdest)
    }
}

impl From<&SnatArgs> for Snat {
    fn from(a: &SnatArgs) -> Self {
        Snat::new(&a.action, &a.source, &a.destination)
    }
}
