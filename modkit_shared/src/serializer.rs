//! Object serialization.
//!
//! The host's messaging channel carries text payloads, so objects cross the
//! wire in a textual interchange form. The serializer is a trait to keep the
//! replication engine independent of the concrete format; the shipped
//! implementation is JSON.

use std::fmt;

use crate::object::SharedObject;

/// Converts objects to and from their textual interchange form.
///
/// Implementations must round-trip both simple and tiled objects.
pub trait ObjectSerializer: Send + Sync {
    fn to_text(&self, object: &SharedObject) -> Result<String, CodecError>;
    fn from_text(&self, text: &str) -> Result<SharedObject, CodecError>;
}

/// JSON serializer used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl ObjectSerializer for JsonSerializer {
    fn to_text(&self, object: &SharedObject) -> Result<String, CodecError> {
        serde_json::to_string(object).map_err(|e| CodecError::Encode {
            detail: e.to_string(),
        })
    }

    fn from_text(&self, text: &str) -> Result<SharedObject, CodecError> {
        serde_json::from_str(text).map_err(|e| CodecError::Decode {
            detail: e.to_string(),
        })
    }
}

/// Serialization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    Encode { detail: String },
    Decode { detail: String },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Encode { detail } => write!(f, "encode failed: {detail}"),
            CodecError::Decode { detail } => write!(f, "decode failed: {detail}"),
        }
    }
}

impl std::error::Error for CodecError {}
