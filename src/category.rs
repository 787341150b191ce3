//! The five shared Shorewall configuration categories.

use std::fmt;

/// A managed configuration file kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Zones,
    Interfaces,
    Policy,
    Rules,
    Snat,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Zones,
        Category::Interfaces,
        Category::Policy,
        Category::Rules,
        Category::Snat,
    ];

    /// Default file name under the Shorewall configuration directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Category::Zones => "zones",
            Category::Interfaces => "interfaces",
            Category::Policy => "policy",
            Category::Rules => "rules",
            Category::Snat => "snat",
        }
    }

    /// Name used for the category's lock file (`<name>.lock`).
    pub fn lock_name(self) -> &'static str {
        match self {
            Category::Zones => "zones",
            Category::Interfaces => "interfaces",
            Category::Policy => "policies",
            Category::Rules => "rules",
            Category::Snat => "snats",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_file_name())
    }
}
