use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id_type!(TransactionId);

impl TransactionId {
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(TransactionId(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = TransactionId::new();
        let b = TransactionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn round_trips_through_display() {
        let id = TransactionId::new();
        assert_eq!(TransactionId::from_string(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(TransactionId::from_string("not-a-uuid").is_err());
    }
}
