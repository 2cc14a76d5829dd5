//! Wire protocol.
//!
//! Four message kinds move an object's canonical representation from the
//! owning peer to a requesting peer. Requests carry the target object id as
//! text; receives carry the serialized object. The kind strings (including
//! the historical `Receieve` misspelling) are kept byte-for-byte so a
//! migrated peer stays interoperable with unmigrated ones.

use modkit_shared::id::{IdParseError, ObjectId};

pub const KIND_REQUEST_OBJECT: &str = "RequestGUIDObject";
pub const KIND_REQUEST_TILED: &str = "RequestGUIDObject_Tile";
pub const KIND_RECEIVE_OBJECT: &str = "ReceieveGUIDObject";
pub const KIND_RECEIVE_TILED: &str = "ReceieveGUIDObject_Tile";

/// A parsed protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolMessage {
    /// Ask whichever peer owns `id` to send the object back.
    RequestObject { id: ObjectId },
    /// A serialized object, sent in response to a request.
    ReceiveObject { payload: String },
    /// Ask for the container object behind the tile registered at `id`.
    RequestTiled { id: ObjectId },
    /// A serialized container object, sent in response to a tiled request.
    ReceiveTiled { payload: String },
}

impl ProtocolMessage {
    /// The wire-level kind string for this message.
    pub fn kind(&self) -> &'static str {
        match self {
            ProtocolMessage::RequestObject { .. } => KIND_REQUEST_OBJECT,
            ProtocolMessage::ReceiveObject { .. } => KIND_RECEIVE_OBJECT,
            ProtocolMessage::RequestTiled { .. } => KIND_REQUEST_TILED,
            ProtocolMessage::ReceiveTiled { .. } => KIND_RECEIVE_TILED,
        }
    }

    /// The wire-level text body for this message.
    pub fn body(&self) -> String {
        match self {
            ProtocolMessage::RequestObject { id } | ProtocolMessage::RequestTiled { id } => {
                id.to_string()
            }
            ProtocolMessage::ReceiveObject { payload }
            | ProtocolMessage::ReceiveTiled { payload } => payload.clone(),
        }
    }

    /// Parses a `(kind, body)` pair from the channel.
    ///
    /// Returns `Ok(None)` for kinds that do not belong to this protocol;
    /// the host channel may deliver other add-ons' traffic.
    pub fn from_wire(kind: &str, body: &str) -> Result<Option<Self>, IdParseError> {
        let msg = match kind {
            KIND_REQUEST_OBJECT => ProtocolMessage::RequestObject { id: body.parse()? },
            KIND_REQUEST_TILED => ProtocolMessage::RequestTiled { id: body.parse()? },
            KIND_RECEIVE_OBJECT => ProtocolMessage::ReceiveObject {
                payload: body.to_string(),
            },
            KIND_RECEIVE_TILED => ProtocolMessage::ReceiveTiled {
                payload: body.to_string(),
            },
            _ => return Ok(None),
        };
        Ok(Some(msg))
    }
}
