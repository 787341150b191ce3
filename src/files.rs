//! Locked list/add/remove operations on the category files.
//!
//! Each operation takes the category lock, then reads or rewrites the scoped
//! part of the file through [`crate::rewriter`]. The lock is released on
//! every exit path when the guard goes out of scope.

use std::path::PathBuf;
use tracing::info;

use crate::category::Category;
use crate::config::Config;
use crate::error::Result;
use crate::lock::LockGuard;
use crate::owner::OwnerId;
use crate::records::{self, Interface, Policy, Record, Rule, Snat, Zone};
use crate::rewriter::{self, Scope};

/// The category files seen through one [`Scope`].
#[derive(Debug, Clone, Copy)]
pub struct ConfigFiles<'a> {
    config: &'a Config,
    scope: Scope<'a>,
}

impl<'a> ConfigFiles<'a> {
    /// Operate on `owner`'s region of each file.
    pub fn owned(config: &'a Config, owner: &'a OwnerId) -> Self {
        Self {
            config,
            scope: Scope::Owner(owner),
        }
    }

    /// Operate on whole files, ignoring owner regions.
    pub fn global(config: &'a Config) -> Self {
        Self {
            config,
            scope: Scope::Global,
        }
    }

    pub fn path(&self, category: Category) -> PathBuf {
        self.config.file_path(category)
    }

    fn lock(&self, category: Category) -> Result<LockGuard> {
        LockGuard::acquire(&self.config.lock_dir, category)
    }

    /// All records of type `R` in scope, in file order.
    pub fn list<R: Record>(&self) -> Result<Vec<R>> {
        let _lock = self.lock(R::CATEGORY)?;
        let region = rewriter::read(self.scope, &self.path(R::CATEGORY))?;
        Ok(records::decode(&region))
    }

    /// Append `record`, failing with `AlreadyExists` on a duplicate.
    pub fn add<R: Record>(&self, record: &R) -> Result<()> {
        let _lock = self.lock(R::CATEGORY)?;
        rewriter::rewrite(self.scope, &self.path(R::CATEGORY), |region| {
            records::append(region, record)
        })?;
        info!("Added {} to {}", record.describe(), R::CATEGORY);
        Ok(())
    }

    /// Remove the first record matching `pred`, failing with `NotFound` if
    /// there is none. `what` describes the target in the error.
    pub fn remove_where<R, F>(&self, what: &str, pred: F) -> Result<()>
    where
        R: Record,
        F: Fn(&R) -> bool,
    {
        let _lock = self.lock(R::CATEGORY)?;
        rewriter::rewrite(self.scope, &self.path(R::CATEGORY), |region| {
            records::remove_first(region, what, &pred)
        })?;
        info!("Removed {} from {}", what, R::CATEGORY);
        Ok(())
    }

    /// Remove a record equal to `record` (after normalization).
    pub fn remove<R: Record>(&self, record: &R) -> Result<()> {
        let target = records::canonical(record)?;
        self.remove_where(&record.describe(), |r: &R| *r == target)
    }

    pub fn zones(&self) -> Result<Vec<Zone>> {
        self.list()
    }

    pub fn add_zone(&self, zone: &Zone) -> Result<()> {
        self.add(zone)
    }

    /// Remove the zone called `name`.
    pub fn remove_zone(&self, name: &str) -> Result<()> {
        self.remove_where(&format!("zone '{name}'"), |z: &Zone| z.name == name)
    }

    pub fn interfaces(&self) -> Result<Vec<Interface>> {
        self.list()
    }

    pub fn add_interface(&self, iface: &Interface) -> Result<()> {
        self.add(iface)
    }

    /// Remove the first interface bound to `zone`.
    pub fn remove_interface_by_zone(&self, zone: &str) -> Result<()> {
        self.remove_where(&format!("interface in zone '{zone}'"), |i: &Interface| {
            i.zone == zone
        })
    }

    pub fn remove_interface(&self, iface: &Interface) -> Result<()> {
        self.remove(iface)
    }

    pub fn policies(&self) -> Result<Vec<Policy>> {
        self.list()
    }

    pub fn add_policy(&self, policy: &Policy) -> Result<()> {
        self.add(policy)
    }

    /// Remove the policy for the same zone pair and action; the log level
    /// is not compared.
    pub fn remove_policy(&self, policy: &Policy) -> Result<()> {
        self.remove_where(&policy.describe(), |p: &Policy| p.same_policy(policy))
    }

    pub fn rules(&self) -> Result<Vec<Rule>> {
        self.list()
    }

    pub fn add_rule(&self, rule: &Rule) -> Result<()> {
        self.add(rule)
    }

    pub fn remove_rule(&self, rule: &Rule) -> Result<()> {
        self.remove(rule)
    }

    pub fn snats(&self) -> Result<Vec<Snat>> {
        self.list()
    }

    pub fn add_snat(&self, snat: &Snat) -> Result<()> {
        self.add(snat)
    }

    pub fn remove_snat(&self, snat: &Snat) -> Result<()> {
        self.remove(snat)
    }
}
