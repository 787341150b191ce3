use serde::{Deserialize, Serialize};

use super::Record;
use crate::category::Category;

/// A line of the `snat` file (source NAT / masquerade mapping).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Snat {
    pub action: String,
    pub source: String,
    pub destination: String,
}

impl Snat {
    pub fn new(
        action: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl Record for Snat {
    const CATEGORY: Category = Category::Snat;
    const MIN_FIELDS: usize = 3;

    fn from_fields(fields: &[&str]) -> Self {
        Self::new(fields[0], fields[1], fields[2])
    }

    fn fields(&self) -> Vec<&str> {
        vec![&self.action, &self.source, &self.destination]
    }

    fn describe(&self) -> String {
        format!(
            "snat '{} {} {}'",
            self.action, self.source, self.destination
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{append, decode};

    const SNAT: &str = "\
#ACTION         SOURCE          DEST            PROTO   PORT
MASQUERADE      10.0.0.0/8      eth0
SNAT(203.0.113.1) 192.168.0.0/16 eth0          tcp     80
";

    #[test]
    fn test_parse_snat_ignores_extra_columns() {
        let snats: Vec<Snat> = decode(SNAT.as_bytes());
        assert_eq!(snats.len(), 2);
        assert_eq!(snats[1], Snat::new("SNAT(203.0.113.1)", "192.168.0.0/16", "eth0"));
    }

    #[test]
    fn test_add_duplicate_snat() {
        let err = append(SNAT.as_bytes(), &Snat::new("MASQUERADE", "10.0.0.0/8", "eth0"));
        assert!(err.is_err());

        let ok = append(SNAT.as_bytes(), &Snat::new("MASQUERADE", "10.0.0.0/8", "eth1"));
        assert!(ok.is_ok());
    }
}
