//! In-memory messaging fabric.
//!
//! Routes envelopes between peers in the same process, standing in for the
//! host game's real transport. Integration tests and the demo binary wire
//! their peers together through a hub; production code implements
//! [`MessageChannel`] against the host instead.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::channel::{InboundMessage, MessageChannel, PeerId, Recipients};

type PeerMap = HashMap<PeerId, mpsc::UnboundedSender<InboundMessage>>;

/// Hub connecting any number of in-process peers.
#[derive(Default, Clone)]
pub struct MemoryHub {
    peers: Arc<Mutex<PeerMap>>,
}

impl MemoryHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins a peer to the hub, returning its outbound channel handle and
    /// the receiver its inbound envelopes arrive on.
    pub fn join(&self, peer: PeerId) -> (MemoryChannel, mpsc::UnboundedReceiver<InboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.peers.lock().expect("hub lock poisoned").insert(peer, tx);
        debug!(%peer, "Peer joined memory hub");

        let channel = MemoryChannel {
            local: peer,
            peers: self.peers.clone(),
        };
        (channel, rx)
    }
}

/// One peer's sending endpoint on a [`MemoryHub`].
pub struct MemoryChannel {
    local: PeerId,
    peers: Arc<Mutex<PeerMap>>,
}

#[async_trait]
impl MessageChannel for MemoryChannel {
    async fn send(&self, kind: &str, body: &str, to: Recipients) -> anyhow::Result<()> {
        let peers = self.peers.lock().expect("hub lock poisoned");

        let targets: Vec<PeerId> = match &to {
            // Broadcast means every peer except the sender.
            Recipients::Broadcast => peers.keys().copied().filter(|p| *p != self.local).collect(),
            Recipients::Peers(list) => list.clone(),
        };

        for target in targets {
            if let Some(tx) = peers.get(&target) {
                // A closed receiver just means the peer went away.
                let _ = tx.send(InboundMessage {
                    kind: kind.to_string(),
                    sender: self.local,
                    body: body.to_string(),
                });
            }
        }
        Ok(())
    }
}
