use serde::{Deserialize, Serialize};

use super::Record;
use crate::category::Category;

/// A line of the `interfaces` file: a device bound to a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interface {
    pub zone: String,
    pub name: String,
}

impl Interface {
    pub fn new(zone: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            name: name.into(),
        }
    }
}

impl Record for Interface {
    const CATEGORY: Category = Category::Interfaces;
    const MIN_FIELDS: usize = 2;

    fn from_fields(fields: &[&str]) -> Self {
        Self::new(fields[0], fields[1])
    }

    fn fields(&self) -> Vec<&str> {
        vec![&self.zone, &self.name]
    }

    // A device can only be bound to one zone.
    fn conflicts_with(&self, existing: &Self) -> bool {
        self.name == existing.name
    }

    fn describe(&self) -> String {
        format!("interface '{}' in zone '{}'", self.name, self.zone)
    }
}
