//! Two-peer replication demo.
//!
//! Usage:
//!   cargo run -p modkit_tests --bin peer_sim -- [--objects 4]
//!
//! Simulates a host peer seeding a handful of objects (including one tiled
//! structure) and a guest peer pulling every id over the in-memory hub,
//! then prints both registries.

use std::env;
use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use modkit_replication::channel::{InboundMessage, PeerId};
use modkit_replication::engine::{ReplicationContext, ReplicationEngine};
use modkit_replication::memory::MemoryHub;
use modkit_shared::math::Vec2;
use modkit_shared::object::{SharedObject, SimpleObject, TiledObject};
use modkit_shared::registry::ObjectRegistry;
use modkit_shared::serializer::JsonSerializer;

struct Peer {
    name: &'static str,
    engine: ReplicationEngine,
    rx: UnboundedReceiver<InboundMessage>,
}

fn join_peer(hub: &MemoryHub, name: &'static str) -> Peer {
    let (channel, rx) = hub.join(PeerId::new_unique());
    let engine = ReplicationEngine::new(ReplicationContext {
        registry: Arc::new(ObjectRegistry::new()),
        channel: Arc::new(channel),
        serializer: Arc::new(JsonSerializer),
    });
    Peer { name, engine, rx }
}

async fn pump(peer: &mut Peer) -> anyhow::Result<()> {
    while let Ok(msg) = peer.rx.try_recv() {
        if let Err(e) = peer.engine.handle_message(&msg).await {
            info!(peer = peer.name, error = %e, "Message dropped");
        }
    }
    Ok(())
}

fn parse_object_count() -> usize {
    let args: Vec<String> = env::args().collect();
    let mut count = 4;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--objects" if i + 1 < args.len() => {
                count = args[i + 1].parse().unwrap_or(4);
                i += 2;
            }
            _ => i += 1,
        }
    }
    count
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let object_count = parse_object_count();
    info!(object_count, "Starting peer simulation");

    let hub = MemoryHub::new();
    let mut host = join_peer(&hub, "host");
    let mut guest = join_peer(&hub, "guest");

    // Seed the host with simple objects and one two-tile structure.
    for n in 0..object_count {
        let obj = SharedObject::Simple(SimpleObject::new(
            "modkit.crate",
            json!({ "slot": n }),
        ));
        host.engine.registry().upsert(obj.id(), obj);
    }
    let container = SharedObject::Simple(SimpleObject::new(
        "modkit.workbench",
        json!({ "tiles": 2 }),
    ));
    let tile = SharedObject::Tiled(TiledObject::new(Vec2::new(1.0, 0.0), container));
    let tile_id = tile.id();
    host.engine.registry().upsert(tile_id, tile);

    // The guest pulls every id the host knows about.
    for id in host.engine.registry().ids() {
        if id == tile_id {
            guest.engine.request_tiled_object(id).await?;
        } else {
            guest.engine.request_object(id).await?;
        }
    }

    pump(&mut host).await?;
    pump(&mut guest).await?;

    info!(
        host = host.engine.registry().len(),
        guest = guest.engine.registry().len(),
        "Replication complete"
    );
    for id in guest.engine.registry().ids() {
        info!(%id, "Guest registry entry");
    }

    Ok(())
}
