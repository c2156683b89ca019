use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one station on one transit line.
///
/// Equality and hashing are structural over all three fields; the network
/// keys its nodes on the full identity, never on the name or code alone, so
/// same-named stations on different lines stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Station {
    pub line: String,
    pub code: String,
    pub name: String,
}

impl Station {
    pub fn new(
        line: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Station {
            line: line.into(),
            code: code.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.line, self.name)
    }
}
