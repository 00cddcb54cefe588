use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier in the fixed `ACC-XXXXX` format: the literal prefix
/// `ACC-` followed by exactly five ASCII alphanumeric characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Parses an identifier, returning `None` unless it matches the format.
    /// The prefix is case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let suffix = s.strip_prefix("ACC-")?;
        if suffix.len() == 5 && suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(AccountId(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_identifiers() {
        for id in ["ACC-12345", "ACC-AAAAA", "ACC-a1B2c"] {
            assert!(AccountId::parse(id).is_some(), "{id} should parse");
        }
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for id in [
            "",
            "ACC-",
            "ACC-1234",
            "ACC-123456",
            "ACC-12 45",
            "ACC-12_45",
            "acc-12345",
            "ACX-12345",
            "ACC-12345 ",
            "ACC-éé345",
        ] {
            assert!(AccountId::parse(id).is_none(), "{id:?} should not parse");
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = AccountId::parse("ACC-AAAAA").unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), "ACC-AAAAA");
    }
}
