use serde::{Deserialize, Serialize};

use super::Record;
use crate::category::Category;

/// A line of the `zones` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: String,
}

impl Zone {
    pub fn new(name: impl Into<String>, zone_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zone_type: zone_type.into(),
        }
    }
}

impl Record for Zone {
    const CATEGORY: Category = Category::Zones;
    const MIN_FIELDS: usize = 2;

    fn from_fields(fields: &[&str]) -> Self {
        Self::new(fields[0], fields[1])
    }

    fn fields(&self) -> Vec<&str> {
        vec![&self.name, &self.zone_type]
    }

    // Zone names are unique within the file regardless of type.
    fn conflicts_with(&self, existing: &Self) -> bool {
        self.name == existing.name
    }

    fn describe(&self) -> String {
        format!("zone '{}'", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::decode;

    const ZONES: &str = "\
#ZONE   TYPE    OPTIONS
fw      firewall
net     ipv4
loc     ipv4
vpn     ipv4    # wireguard peers
";

    #[test]
    fn test_parse_zones_file() {
        let zones: Vec<Zone> = decode(ZONES.as_bytes());
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[0], Zone::new("fw", "firewall"));
        assert_eq!(zones[3], Zone::new("vpn", "ipv4"));
    }

    #[test]
    fn test_same_name_conflicts() {
        assert!(Zone::new("net", "ipv6").conflicts_with(&Zone::new("net", "ipv4")));
        assert!(!Zone::new("dmz", "ipv4").conflicts_with(&Zone::new("net", "ipv4")));
    }

    #[test]
    fn test_ordering_by_name_then_type() {
        let mut zones = vec![
            Zone::new("net", "ipv4"),
            Zone::new("fw", "firewall"),
            Zone::new("net", "bport"),
        ];
        zones.sort();
        assert_eq!(zones[0].name, "fw");
        assert_eq!(zones[1].zone_type, "bport");
    }
}
