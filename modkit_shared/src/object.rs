//! Replicated object model.
//!
//! Objects come in two shapes: a plain standalone object, or a tile of a
//! multi-tile structure. A tile does not carry its own gameplay state; it
//! wraps a container object that holds the real payload for the whole
//! structure. The shape is a serde-tagged discriminant, so the kind is
//! resolved at deserialization time and no runtime downcasting is needed.

use serde::{Deserialize, Serialize};

use crate::id::ObjectId;
use crate::math::Vec2;

/// A replicated game object, keyed by its [`ObjectId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SharedObject {
    /// A standalone object.
    Simple(SimpleObject),
    /// One tile of a multi-tile structure.
    Tiled(TiledObject),
}

impl SharedObject {
    /// The identifier this object is registered under.
    pub fn id(&self) -> ObjectId {
        match self {
            SharedObject::Simple(o) => o.id,
            SharedObject::Tiled(o) => o.id,
        }
    }

    pub fn is_tiled(&self) -> bool {
        matches!(self, SharedObject::Tiled(_))
    }

    /// The nested container object, if this is a tile.
    pub fn container(&self) -> Option<&SharedObject> {
        match self {
            SharedObject::Simple(_) => None,
            SharedObject::Tiled(o) => Some(&o.container),
        }
    }
}

/// A standalone replicated object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleObject {
    pub id: ObjectId,
    /// Object class, e.g. `"modkit.furnace"`.
    pub class_name: String,
    /// Arbitrary serializable gameplay state.
    pub state: serde_json::Value,
}

impl SimpleObject {
    pub fn new(class_name: impl Into<String>, state: serde_json::Value) -> Self {
        Self {
            id: ObjectId::new_unique(),
            class_name: class_name.into(),
            state,
        }
    }
}

/// One tile of a multi-tile structure.
///
/// The container carries the authoritative state for the whole structure;
/// the tile itself only records where it sits within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledObject {
    pub id: ObjectId,
    /// Tile offset within the parent structure, in tile units.
    pub offset: Vec2,
    pub container: Box<SharedObject>,
}

impl TiledObject {
    pub fn new(offset: Vec2, container: SharedObject) -> Self {
        Self {
            id: ObjectId::new_unique(),
            offset,
            container: Box::new(container),
        }
    }
}
