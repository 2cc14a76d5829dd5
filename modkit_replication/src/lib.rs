//! `modkit_replication`
//!
//! Peer-to-peer object replication for the add-on. Each peer keeps an
//! identity registry of the objects it knows about; the replication engine
//! pulls remote objects into the local registry by broadcasting
//! identity-addressed requests over the host's messaging channel and
//! handling the replies.

pub mod channel;
pub mod engine;
pub mod memory;
pub mod protocol;
