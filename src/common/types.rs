//! Types shared between the Holdsport client and the service layer

use serde::{Deserialize, Serialize};

/// Holdsport user registered as attending an activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendingUser {
    /// Holdsport user id, becomes the member id
    pub user_id: u64,
    /// Whitespace-collapsed, upper-cased display name
    pub name: String,
}

impl AttendingUser {
    pub fn new(user_id: u64, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }
}

/// Holdsport team reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub team_id: i64,
    pub name: String,
}

/// Collapse runs of whitespace, trim, and upper-case a Holdsport name
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  daniel   Mizsak "), "DANIEL MIZSAK");
        assert_eq!(normalize_name("Åse\tøster"), "ÅSE ØSTER");
        assert_eq!(normalize_name(""), "");
    }
}
