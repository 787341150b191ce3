use serde::{Deserialize, Serialize};

use super::Record;
use crate::category::Category;

/// A line of the `policy` file: the default action between two zones.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Policy {
    pub source: String,
    pub destination: String,
    pub policy: String,
    #[serde(default)]
    pub log: String,
}

impl Policy {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        policy: impl Into<String>,
        log: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            policy: policy.into(),
            log: log.into(),
        }
    }

    /// Whether both policies govern the same zone pair with the same action.
    /// The log level is not part of a policy's identity.
    pub fn same_policy(&self, other: &Self) -> bool {
        self.source == other.source
            && self.destination == other.destination
            && self.policy == other.policy
    }
}

impl Record for Policy {
    const CATEGORY: Category = Category::Policy;
    const MIN_FIELDS: usize = 3;

    fn from_fields(fields: &[&str]) -> Self {
        Self::new(
            fields[0],
            fields[1],
            fields[2],
            fields.get(3).copied().unwrap_or_default(),
        )
    }

    fn fields(&self) -> Vec<&str> {
        vec![&self.source, &self.destination, &self.policy, &self.log]
    }

    fn conflicts_with(&self, existing: &Self) -> bool {
        self.same_policy(existing)
    }

    fn describe(&self) -> String {
        format!(
            "policy '{} -> {} {}'",
            self.source, self.destination, self.policy
        )
    }
}
