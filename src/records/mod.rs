//! Line codec for the records stored in each Shorewall category file.
//!
//! Every category shares the same line format: one record per non-empty,
//! non-comment line, fields separated by runs of whitespace. Decoding never
//! fails; lines with too few fields are skipped. Encoding writes one
//! tab-separated line per record.

mod interface;
mod policy;
mod rule;
mod snat;
mod zone;

use std::fmt::Debug;

pub use interface::Interface;
pub use policy::Policy;
pub use rule::Rule;
pub use snat::Snat;
pub use zone::Zone;

use crate::category::Category;
use crate::error::{Result, TenantError};

/// Placeholder Shorewall accepts for an empty column.
pub const EMPTY_COLUMN: &str = "-";

/// A typed line of a category file.
pub trait Record: Clone + Ord + Debug {
    /// The category file this record lives in.
    const CATEGORY: Category;

    /// Lines with fewer fields than this are skipped on decode.
    const MIN_FIELDS: usize;

    /// Build a record from the whitespace-separated fields of one line.
    /// `fields` holds at least [`Record::MIN_FIELDS`] entries; missing
    /// optional fields are empty, extra fields are ignored.
    fn from_fields(fields: &[&str]) -> Self;

    /// Fields in declaration order.
    fn fields(&self) -> Vec<&str>;

    /// Canonical form used for comparison and storage.
    fn normalized(&self) -> Self {
        self.clone()
    }

    /// Whether adding `self` next to `existing` would duplicate an entry.
    fn conflicts_with(&self, existing: &Self) -> bool {
        self == existing
    }

    /// Short human description used in error messages.
    fn describe(&self) -> String;
}

/// Decode every well-formed record in `bytes`, in file order.
pub fn decode<R: Record>(bytes: &[u8]) -> Vec<R> {
    let text = String::from_utf8_lossy(bytes);
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < R::MIN_FIELDS {
                return None;
            }
            Some(R::from_fields(&fields))
        })
        .collect()
}

/// Format a single record as a line, without the trailing newline.
///
/// Trailing empty optional fields are dropped; other empty fields are
/// written as [`EMPTY_COLUMN`] so the following columns keep their position.
pub fn encode_line<R: Record>(record: &R) -> String {
    let fields = record.fields();
    let used = fields
        .iter()
        .rposition(|f| !f.trim().is_empty())
        .map_or(0, |i| i + 1)
        .max(R::MIN_FIELDS)
        .min(fields.len());

    fields[..used]
        .iter()
        .map(|f| {
            let f = f.trim();
            if f.is_empty() {
                EMPTY_COLUMN
            } else {
                f
            }
        })
        .collect::<Vec<_>>()
        .join("\t")
}

/// Encode records, one newline-terminated line each.
pub fn encode<R: Record>(records: &[R]) -> Vec<u8> {
    let mut out = String::new();
    for record in records {
        out.push_str(&encode_line(record));
        out.push('\n');
    }
    out.into_bytes()
}

/// The record as it reads back from the file once stored.
///
/// Identity for well-formed records; sparse ones get their placeholder
/// columns, so they compare equal to what is already on disk.
///
/// Fails with `InvalidRecord` when the encoded line would not read back as
/// this one record, such as a field holding whitespace, a newline or a `#`.
pub fn canonical<R: Record>(record: &R) -> Result<R> {
    let normalized = record.normalized();
    let line = encode_line(&normalized);
    let invalid = || TenantError::InvalidRecord {
        category: R::CATEGORY,
        what: format!("{:?}", line),
    };

    // Shorewall ends a line at the first '#', wherever it appears.
    if line.contains('#') {
        return Err(invalid());
    }
    let mut decoded: Vec<R> = decode(line.as_bytes());
    match decoded.pop() {
        Some(stored) if decoded.is_empty() && encode_line(&stored) == line => Ok(stored),
        _ => Err(invalid()),
    }
}

/// Append `record` to an encoded region, rejecting duplicates.
///
/// Existing bytes (including comments) are kept as they are.
pub(crate) fn append<R: Record>(region: &[u8], record: &R) -> Result<Vec<u8>> {
    let record = canonical(record)?;
    let existing: Vec<R> = decode(region);
    if existing.iter().any(|e| record.conflicts_with(e)) {
        return Err(TenantError::AlreadyExists {
            category: R::CATEGORY,
            what: record.describe(),
        });
    }

    let line = encode_line(&record);
    let mut out = Vec::with_capacity(region.len() + line.len() + 2);
    out.extend_from_slice(region);
    if !out.is_empty() && !out.ends_with(b"\n") {
        out.push(b'\n');
    }
    out.extend_from_slice(line.as_bytes());
    out.push(b'\n');
    Ok(out)
}

/// Remove the first record matching `pred` and re-encode the rest.
pub(crate) fn remove_first<R, F>(region: &[u8], what: impl Into<String>, pred: F) -> Result<Vec<u8>>
where
    R: Record,
    F: Fn(&R) -> bool,
{
    let mut records: Vec<R> = decode(region);
    let index = records
        .iter()
        .position(pred)
        .ok_or_else(|| TenantError::NotFound {
            category: R::CATEGORY,
            what: what.into(),
        })?;
    records.remove(index);
    Ok(encode(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_decode_skips_comments_blank_and_short_lines() {
        let data = b"#ZONE TYPE\n\n   \nfw firewall\nlonely\n  # indented comment\nnet ipv4\n";
        let zones: Vec<Zone> = decode(data);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].name, "fw");
        assert_eq!(zones[1].zone_type, "ipv4");
    }

    #[test]
    fn test_decode_mixed_whitespace() {
        let zones: Vec<Zone> = decode(b"loc \t \t ipv4   \r\n");
        assert_eq!(zones, vec![Zone::new("loc", "ipv4")]);
    }

    #[test]
    fn test_decode_without_trailing_newline() {
        let zones: Vec<Zone> = decode(b"a ipv4\nb ipv4");
        assert_eq!(zones.len(), 2);
    }

    #[test]
    fn test_encode_line_fills_interior_gaps() {
        let rule = Rule {
            action: "ACCEPT".to_string(),
            source: "net".to_string(),
            destination: "fw".to_string(),
            protocol: String::new(),
            dport: "22".to_string(),
            ..Default::default()
        };
        assert_eq!(encode_line(&rule), "ACCEPT\tnet\tfw\t-\t22");
    }

    #[test]
    fn test_encode_pads_required_fields() {
        assert_eq!(encode_line(&Zone::new("fw", "")), "fw\t-");
    }

    #[test]
    fn test_canonical_matches_stored_form() {
        let rule = Rule::new("ACCEPT", "net", "fw").dport("22");
        let stored: Vec<Rule> = decode(&encode(&[rule.clone()]));
        assert_eq!(stored[0].protocol, "-");
        assert_eq!(canonical(&rule).unwrap().protocol, "-");

        let zone = Zone::new("dmz", "ipv4");
        assert_eq!(canonical(&zone).unwrap(), zone);
    }

    #[test]
    fn test_canonical_rejects_comment_marker() {
        for zone in [Zone::new("#x", "ipv4"), Zone::new("x", "ipv4#note")] {
            let err = canonical(&zone).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        }
    }

    #[test]
    fn test_canonical_rejects_embedded_whitespace() {
        let cases = [
            Zone::new("x\nfw\nz", "ipv4"),
            Zone::new("dmz lan", "ipv4"),
            Zone::new("dmz", "ipv4\tipv6"),
        ];
        for zone in cases {
            let err = canonical(&zone).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "{:?}", zone);
        }
    }

    #[test]
    fn test_append_rejects_unstorable_record_every_time() {
        let zone = Zone::new("#x", "ipv4");
        let region = b"fw firewall\n";
        for _ in 0..2 {
            let err = append(region, &zone).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        }

        let err = append(region, &Zone::new("x\nfw", "ipv4")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_append_sparse_rule_twice_is_duplicate() {
        let rule = Rule::new("ACCEPT", "net", "fw").dport("22");
        let region = append(b"", &rule).unwrap();
        assert!(append(&region, &rule).is_err());
    }

    #[test]
    fn test_encode_drops_trailing_empty_fields() {
        let policy = Policy::new("loc", "net", "ACCEPT", "");
        assert_eq!(encode(&[policy]), b"loc\tnet\tACCEPT\n".to_vec());
    }

    #[test]
    fn test_round_trip_each_kind() {
        let zones = vec![Zone::new("fw", "firewall"), Zone::new("net", "ipv4")];
        assert_eq!(decode::<Zone>(&encode(&zones)), zones);

        let ifaces = vec![Interface::new("net", "eth0"), Interface::new("loc", "eth1.10")];
        assert_eq!(decode::<Interface>(&encode(&ifaces)), ifaces);

        let policies = vec![
            Policy::new("loc", "net", "ACCEPT", "info"),
            Policy::new("all", "all", "REJECT", "info"),
        ];
        assert_eq!(decode::<Policy>(&encode(&policies)), policies);

        let rules = vec![Rule {
            action: "DNAT".to_string(),
            source: "net".to_string(),
            destination: "loc:10.0.0.2".to_string(),
            protocol: "tcp".to_string(),
            dport: "80".to_string(),
            sport: "1024:65535".to_string(),
            origdest: "203.0.113.7".to_string(),
        }];
        assert_eq!(decode::<Rule>(&encode(&rules)), rules);

        let snats = vec![Snat::new("MASQUERADE", "10.0.0.0/8", "eth0")];
        assert_eq!(decode::<Snat>(&encode(&snats)), snats);
    }

    #[test]
    fn test_append_keeps_existing_bytes() {
        let region = b"# my zones\nfw firewall\n";
        let out = append(region, &Zone::new("dmz", "ipv4")).unwrap();
        assert_eq!(out, b"# my zones\nfw firewall\ndmz\tipv4\n".to_vec());
    }

    #[test]
    fn test_append_adds_missing_newline() {
        let out = append(b"fw firewall", &Zone::new("dmz", "ipv4")).unwrap();
        assert_eq!(out, b"fw firewall\ndmz\tipv4\n".to_vec());
    }

    #[test]
    fn test_append_duplicate_rejected() {
        let err = append(b"fw firewall\n", &Zone::new("fw", "firewall")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_remove_first_only_removes_one() {
        let region = b"net eth0\nloc eth1\nloc eth2\n";
        let out = remove_first::<Interface, _>(region, "zone 'loc'", |i| i.zone == "loc").unwrap();
        assert_eq!(out, b"net\teth0\nloc\teth2\n".to_vec());
    }

    #[test]
    fn test_remove_first_missing_is_not_found() {
        let err =
            remove_first::<Zone, _>(b"fw firewall\n", "zone 'dmz'", |z| z.name == "dmz").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "zones: zone 'dmz' not found");
    }
}
