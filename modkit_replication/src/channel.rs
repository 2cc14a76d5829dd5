//! Messaging channel abstraction.
//!
//! The host game owns the actual transport; the engine only depends on this
//! narrow contract: send a text payload under a message kind to a set of
//! peers, and receive `(kind, sender, body)` envelopes from the host's
//! event dispatch. The in-memory implementation in [`crate::memory`] backs
//! tests and the demo binary.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

static NEXT_PEER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one connected peer (one running mod instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerId(pub u64);

impl PeerId {
    pub fn new_unique() -> Self {
        PeerId(NEXT_PEER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

/// Addressing for an outbound send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    /// All other peers. Used for requests, because no peer maintains a
    /// directory of which peer owns which id.
    Broadcast,
    /// A specific set of peers. Used for replies.
    Peers(Vec<PeerId>),
}

/// An inbound message as delivered by the host's event dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Wire-level message kind, see [`crate::protocol`].
    pub kind: String,
    pub sender: PeerId,
    /// Text payload: an object id for requests, a serialized object for
    /// receives.
    pub body: String,
}

/// Outbound half of the host's messaging channel.
///
/// Sends are fire-and-forget: no reply wait, no timeout, no retry.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    async fn send(&self, kind: &str, body: &str, to: Recipients) -> anyhow::Result<()>;
}
