//! Replication engine.
//!
//! Routes inbound protocol messages to the right handler and exposes the
//! outbound operations that pull a remote object into the local registry.
//!
//! The flow is fire-and-forget: a request is broadcast because the
//! requester does not know which peer owns the id; whichever peer holds it
//! replies, and the reply lands in the registry via upsert. There is no
//! pending-request state, so there is nothing to time out, retry, or
//! cancel. Duplicate replies simply overwrite each other (last write wins).

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use modkit_shared::id::ObjectId;
use modkit_shared::object::SharedObject;
use modkit_shared::registry::ObjectRegistry;
use modkit_shared::serializer::ObjectSerializer;

use crate::channel::{InboundMessage, MessageChannel, PeerId, Recipients};
use crate::protocol::{ProtocolMessage, KIND_RECEIVE_OBJECT, KIND_RECEIVE_TILED};

/// Everything the engine needs to operate: the local registry, the host's
/// messaging channel, and the object serializer.
///
/// Engines own their context rather than reaching for process-wide state,
/// so multiple independent engines can coexist (one per test, for
/// instance).
pub struct ReplicationContext {
    pub registry: Arc<ObjectRegistry>,
    pub channel: Arc<dyn MessageChannel>,
    pub serializer: Arc<dyn ObjectSerializer>,
}

/// Protocol-level contract violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A tiled request named a registry entry that is not a tile.
    NotTiled { id: ObjectId },
    /// An inbound payload could not be decoded. The message is dropped and
    /// the registry is left unchanged.
    Decode { detail: String },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::NotTiled { id } => {
                write!(f, "tiled request for non-tiled object {id}")
            }
            ProtocolError::Decode { detail } => write!(f, "undecodable payload: {detail}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Per-peer replication engine.
pub struct ReplicationEngine {
    ctx: ReplicationContext,
}

impl ReplicationEngine {
    pub fn new(ctx: ReplicationContext) -> Self {
        Self { ctx }
    }

    /// The local identity registry, for surrounding mod logic.
    pub fn registry(&self) -> &ObjectRegistry {
        &self.ctx.registry
    }

    /// Handles one inbound message from the host's event dispatch.
    ///
    /// Kinds that do not belong to the protocol are ignored. A failure
    /// handling one message never poisons dispatch of the next; callers
    /// should log the error and carry on.
    pub async fn handle_message(&self, msg: &InboundMessage) -> anyhow::Result<()> {
        let parsed = match ProtocolMessage::from_wire(&msg.kind, &msg.body) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => {
                debug!(kind = %msg.kind, sender = %msg.sender, "Ignoring unrelated message kind");
                return Ok(());
            }
            Err(e) => {
                warn!(kind = %msg.kind, sender = %msg.sender, error = %e, "Dropping malformed request");
                anyhow::bail!(ProtocolError::Decode {
                    detail: e.to_string(),
                });
            }
        };

        match parsed {
            ProtocolMessage::RequestObject { id } => {
                debug!(%id, sender = %msg.sender, "Object requested");
                self.send_object(id, msg.sender).await
            }
            ProtocolMessage::RequestTiled { id } => {
                debug!(%id, sender = %msg.sender, "Tiled object requested");
                self.send_tiled_object(id, msg.sender).await
            }
            ProtocolMessage::ReceiveObject { payload } => {
                debug!(sender = %msg.sender, "Object received");
                self.receive_payload(&payload)
            }
            ProtocolMessage::ReceiveTiled { payload } => {
                debug!(sender = %msg.sender, "Tiled container received");
                self.receive_payload(&payload)
            }
        }
    }

    /// Broadcasts a request for the object registered at `id` on some
    /// remote peer. The reply, if any, arrives through `handle_message`.
    pub async fn request_object(&self, id: ObjectId) -> anyhow::Result<()> {
        let msg = ProtocolMessage::RequestObject { id };
        debug!(%id, "Requesting object from peers");
        self.ctx
            .channel
            .send(msg.kind(), &msg.body(), Recipients::Broadcast)
            .await
    }

    /// Broadcasts a request for the container object behind the tile
    /// registered at `id` on some remote peer.
    pub async fn request_tiled_object(&self, id: ObjectId) -> anyhow::Result<()> {
        let msg = ProtocolMessage::RequestTiled { id };
        debug!(%id, "Requesting tiled object from peers");
        self.ctx
            .channel
            .send(msg.kind(), &msg.body(), Recipients::Broadcast)
            .await
    }

    /// Replies to a plain request: serialize the whole registry entry back
    /// to the requester. An unknown id is a silent no-op; the requester
    /// never gets a reply.
    async fn send_object(&self, id: ObjectId, to: PeerId) -> anyhow::Result<()> {
        let Some(object) = self.ctx.registry.get(id) else {
            debug!(%id, "No local entry for requested object");
            return Ok(());
        };

        let payload = self.ctx.serializer.to_text(&object)?;
        debug!(%id, %to, "Sending object");
        self.ctx
            .channel
            .send(KIND_RECEIVE_OBJECT, &payload, Recipients::Peers(vec![to]))
            .await
    }

    /// Replies to a tiled request: serialize only the nested container, not
    /// the tile wrapper. The entry must actually be a tile.
    async fn send_tiled_object(&self, id: ObjectId, to: PeerId) -> anyhow::Result<()> {
        let Some(object) = self.ctx.registry.get(id) else {
            debug!(%id, "No local entry for requested tile");
            return Ok(());
        };

        let Some(container) = object.container() else {
            warn!(%id, "Tiled request for a non-tiled registry entry");
            anyhow::bail!(ProtocolError::NotTiled { id });
        };

        let payload = self.ctx.serializer.to_text(container)?;
        debug!(%id, %to, "Sending tiled container");
        self.ctx
            .channel
            .send(KIND_RECEIVE_TILED, &payload, Recipients::Peers(vec![to]))
            .await
    }

    /// Decodes a received payload and upserts it into the registry. No
    /// acknowledgement is sent.
    fn receive_payload(&self, payload: &str) -> anyhow::Result<()> {
        let object: SharedObject = match self.ctx.serializer.from_text(payload) {
            Ok(object) => object,
            Err(e) => {
                warn!(error = %e, "Dropping undecodable object payload");
                anyhow::bail!(ProtocolError::Decode {
                    detail: e.to_string(),
                });
            }
        };

        let id = object.id();
        self.ctx.registry.upsert(id, object);
        debug!(%id, "Registry entry upserted");
        Ok(())
    }
}
