//! Full two-peer integration tests for the replication protocol over the
//! in-memory hub.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

use modkit_replication::channel::{InboundMessage, PeerId};
use modkit_replication::engine::{ProtocolError, ReplicationContext, ReplicationEngine};
use modkit_replication::memory::MemoryHub;
use modkit_replication::protocol::KIND_RECEIVE_OBJECT;
use modkit_shared::math::Vec2;
use modkit_shared::object::{SharedObject, SimpleObject, TiledObject};
use modkit_shared::registry::ObjectRegistry;
use modkit_shared::serializer::JsonSerializer;

struct Peer {
    engine: ReplicationEngine,
    rx: UnboundedReceiver<InboundMessage>,
}

fn join_peer(hub: &MemoryHub) -> Peer {
    let (channel, rx) = hub.join(PeerId::new_unique());
    let engine = ReplicationEngine::new(ReplicationContext {
        registry: Arc::new(ObjectRegistry::new()),
        channel: Arc::new(channel),
        serializer: Arc::new(JsonSerializer),
    });
    Peer { engine, rx }
}

/// Drains and handles every pending inbound message, collecting handler
/// errors instead of stopping. Dispatch must survive a bad message.
async fn pump(peer: &mut Peer) -> Vec<anyhow::Error> {
    let mut errors = Vec::new();
    while let Ok(msg) = peer.rx.try_recv() {
        if let Err(e) = peer.engine.handle_message(&msg).await {
            errors.push(e);
        }
    }
    errors
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn furnace() -> SharedObject {
    SharedObject::Simple(SimpleObject::new(
        "modkit.furnace",
        json!({ "fuel": 30, "smelting": "copper" }),
    ))
}

#[tokio::test]
async fn broadcast_request_pulls_object_from_owner() -> anyhow::Result<()> {
    init_tracing();
    let hub = MemoryHub::new();
    let mut owner = join_peer(&hub);
    let mut requester = join_peer(&hub);

    let object = furnace();
    let id = object.id();
    owner.engine.registry().upsert(id, object.clone());

    requester.engine.request_object(id).await?;
    assert!(pump(&mut owner).await.is_empty());
    assert!(pump(&mut requester).await.is_empty());

    assert_eq!(requester.engine.registry().get(id), Some(object));
    Ok(())
}

#[tokio::test]
async fn absent_id_mutates_nothing_and_sends_no_reply() -> anyhow::Result<()> {
    init_tracing();
    let hub = MemoryHub::new();
    let mut owner = join_peer(&hub);
    let mut requester = join_peer(&hub);

    let id = modkit_shared::id::ObjectId::new_unique();
    requester.engine.request_object(id).await?;
    assert!(pump(&mut owner).await.is_empty());
    assert!(pump(&mut requester).await.is_empty());

    assert!(owner.engine.registry().is_empty());
    assert!(requester.engine.registry().is_empty());
    // Nothing further arrived at the requester: no reply was emitted.
    assert!(requester.rx.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn duplicate_replies_are_idempotent() -> anyhow::Result<()> {
    init_tracing();
    let hub = MemoryHub::new();
    let mut owner = join_peer(&hub);
    let mut requester = join_peer(&hub);

    let object = furnace();
    let id = object.id();
    owner.engine.registry().upsert(id, object.clone());

    // Two identical requests produce two identical replies.
    requester.engine.request_object(id).await?;
    requester.engine.request_object(id).await?;
    assert!(pump(&mut owner).await.is_empty());
    assert!(pump(&mut requester).await.is_empty());

    assert_eq!(requester.engine.registry().len(), 1);
    assert_eq!(requester.engine.registry().get(id), Some(object));
    Ok(())
}

#[tokio::test]
async fn tiled_request_replies_with_container_only() -> anyhow::Result<()> {
    init_tracing();
    let hub = MemoryHub::new();
    let mut owner = join_peer(&hub);
    let mut requester = join_peer(&hub);

    let container = furnace();
    let container_id = container.id();
    let tile = SharedObject::Tiled(TiledObject::new(Vec2::new(1.0, 0.0), container.clone()));
    let tile_id = tile.id();
    owner.engine.registry().upsert(tile_id, tile);

    requester.engine.request_tiled_object(tile_id).await?;
    assert!(pump(&mut owner).await.is_empty());
    assert!(pump(&mut requester).await.is_empty());

    // The requester reconstructed the nested container, not the tile
    // wrapper it asked through.
    assert_eq!(requester.engine.registry().get(container_id), Some(container));
    assert!(!requester.engine.registry().contains(tile_id));
    Ok(())
}

#[tokio::test]
async fn tiled_request_for_simple_entry_fails_without_breaking_dispatch() -> anyhow::Result<()> {
    init_tracing();
    let hub = MemoryHub::new();
    let mut owner = join_peer(&hub);
    let mut requester = join_peer(&hub);

    let object = furnace();
    let id = object.id();
    owner.engine.registry().upsert(id, object.clone());

    // Violating request first, valid request behind it in the queue.
    requester.engine.request_tiled_object(id).await?;
    requester.engine.request_object(id).await?;

    let errors = pump(&mut owner).await;
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].downcast_ref::<ProtocolError>(),
        Some(&ProtocolError::NotTiled { id })
    );

    // The valid request was still answered.
    assert!(pump(&mut requester).await.is_empty());
    assert_eq!(requester.engine.registry().get(id), Some(object));
    Ok(())
}

#[tokio::test]
async fn malformed_reply_is_dropped_without_registry_mutation() -> anyhow::Result<()> {
    init_tracing();
    let hub = MemoryHub::new();
    let mut victim = join_peer(&hub);

    victim
        .engine
        .handle_message(&InboundMessage {
            kind: KIND_RECEIVE_OBJECT.to_string(),
            sender: PeerId::new_unique(),
            body: "}}} not an object".to_string(),
        })
        .await
        .unwrap_err();

    assert!(victim.engine.registry().is_empty());

    // The peer keeps working afterwards.
    let survivor = furnace();
    let payload = serde_json::to_string(&survivor)?;
    victim
        .engine
        .handle_message(&InboundMessage {
            kind: KIND_RECEIVE_OBJECT.to_string(),
            sender: PeerId::new_unique(),
            body: payload,
        })
        .await?;
    assert_eq!(victim.engine.registry().get(survivor.id()), Some(survivor));
    Ok(())
}

#[tokio::test]
async fn three_peer_broadcast_reaches_the_single_owner() -> anyhow::Result<()> {
    init_tracing();
    let hub = MemoryHub::new();
    let mut owner = join_peer(&hub);
    let mut bystander = join_peer(&hub);
    let mut requester = join_peer(&hub);

    let object = furnace();
    let id = object.id();
    owner.engine.registry().upsert(id, object.clone());

    requester.engine.request_object(id).await?;
    assert!(pump(&mut owner).await.is_empty());
    assert!(pump(&mut bystander).await.is_empty());
    assert!(pump(&mut requester).await.is_empty());

    assert_eq!(requester.engine.registry().get(id), Some(object));
    // The reply was addressed to the requester, not broadcast.
    assert!(bystander.engine.registry().is_empty());
    Ok(())
}
