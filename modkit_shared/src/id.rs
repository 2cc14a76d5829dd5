//! Object identifiers.
//!
//! Every replicated object is keyed by a globally-unique 128-bit id. The id
//! is the sole value correlating an object across peers; it never changes
//! after creation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Globally-unique identifier for a replicated object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// The all-zero id. Never assigned to a real object.
    pub const NIL: ObjectId = ObjectId(Uuid::nil());

    /// Generates a fresh random id.
    pub fn new_unique() -> Self {
        ObjectId(Uuid::new_v4())
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_nil()
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::NIL
    }
}

impl From<Uuid> for ObjectId {
    fn from(id: Uuid) -> Self {
        ObjectId(id)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ObjectId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(ObjectId)
            .map_err(|_| IdParseError::InvalidFormat)
    }
}

/// Error type for object id parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    InvalidFormat,
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdParseError::InvalidFormat => write!(f, "invalid object id format"),
        }
    }
}

impl std::error::Error for IdParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_differ() {
        let a = ObjectId::new_unique();
        let b = ObjectId::new_unique();
        assert!(a.is_valid());
        assert_ne!(a, b);
    }

    #[test]
    fn display_parse_roundtrip() {
        let id = ObjectId::new_unique();
        let parsed: ObjectId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        let result = "not-a-guid".parse::<ObjectId>();
        assert_eq!(result, Err(IdParseError::InvalidFormat));
    }

    #[test]
    fn nil_is_not_valid() {
        assert!(!ObjectId::NIL.is_valid());
        assert_eq!(ObjectId::default(), ObjectId::NIL);
    }
}
