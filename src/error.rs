use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Posting / query validation errors
    #[error("Validation failed")]
    ValidationFailed(Vec<Violation>),

    // Lookup errors
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    // System errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A single field-level validation failure, serialized on the wire as
/// `{"field": ..., "message": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: &str, message: &str) -> Self {
        Violation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulates violations so an operation reports every failed rule at once
/// instead of stopping at the first.
#[derive(Debug, Default)]
pub struct Violations {
    entries: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.entries.push(Violation::new(field, message));
    }

    pub fn push(&mut self, violation: Violation) {
        self.entries.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ok when no rule failed, otherwise the complete violation list.
    pub fn into_result(self) -> Result<()> {
        if self.entries.is_empty() {
            Ok(())
        } else {
            Err(Error::ValidationFailed(self.entries))
        }
    }

    pub fn into_error(self) -> Error {
        Error::ValidationFailed(self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_violations_produce_ok() {
        assert!(Violations::new().into_result().is_ok());
    }

    #[test]
    fn violations_are_reported_together() {
        let mut violations = Violations::new();
        violations.add("amount", "Amount must be a positive number");
        violations.add("currency", "Invalid currency code");

        match violations.into_result() {
            Err(Error::ValidationFailed(details)) => {
                assert_eq!(details.len(), 2);
                assert_eq!(details[0].field, "amount");
                assert_eq!(details[1].field, "currency");
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn violation_wire_shape() {
        let violation = Violation::new("amount", "Amount must be a positive number");
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "field": "amount",
                "message": "Amount must be a positive number"
            })
        );
    }
}
