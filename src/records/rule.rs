use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{Record, EMPTY_COLUMN};
use crate::category::Category;

/// A line of the `rules` file.
///
/// Equality and ordering compare the [normalized](Rule::normalized) form, so
/// a rule with an empty destination port and a source port equals the same
/// rule written with `-` in the destination port column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub action: String,
    pub source: String,
    pub destination: String,
    pub protocol: String,
    pub dport: String,
    pub sport: String,
    pub origdest: String,
}

impl Rule {
    pub fn new(
        action: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            source: source.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn dport(mut self, dport: impl Into<String>) -> Self {
        self.dport = dport.into();
        self
    }

    pub fn sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = sport.into();
        self
    }

    pub fn origdest(mut self, origdest: impl Into<String>) -> Self {
        self.origdest = origdest.into();
        self
    }

    fn key(&self) -> [&str; 7] {
        [
            &self.action,
            &self.source,
            &self.destination,
            &self.protocol,
            &self.dport,
            &self.sport,
            &self.origdest,
        ]
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rule {}

impl PartialOrd for Rule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rule {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.normalized();
        let b = other.normalized();
        a.key().cmp(&b.key())
    }
}

impl Record for Rule {
    const CATEGORY: Category = Category::Rules;
    const MIN_FIELDS: usize = 3;

    fn from_fields(fields: &[&str]) -> Self {
        let opt = |i: usize| fields.get(i).copied().unwrap_or_default().to_string();
        Self {
            action: fields[0].to_string(),
            source: fields[1].to_string(),
            destination: fields[2].to_string(),
            protocol: opt(3),
            dport: opt(4),
            sport: opt(5),
            origdest: opt(6),
        }
    }

    fn fields(&self) -> Vec<&str> {
        self.key().to_vec()
    }

    fn normalized(&self) -> Self {
        let mut rule = self.clone();
        if rule.dport.is_empty() && !rule.sport.is_empty() {
            rule.dport = EMPTY_COLUMN.to_string();
        }
        if rule.sport.is_empty() && !rule.origdest.is_empty() {
            rule.sport = EMPTY_COLUMN.to_string();
        }
        rule
    }

    fn describe(&self) -> String {
        let line = self
            .key()
            .iter()
            .filter(|f| !f.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        format!("rule '{line}'")
    }
}
