//! Identity registry.
//!
//! Per-peer source of truth for "objects this peer knows about". Keys are
//! unique; a re-received id overwrites the existing entry, it never
//! duplicates it. Entries live for the lifetime of the process.
//!
//! The map sits behind a mutex so that message handling stays correct even
//! if the host delivers messages re-entrantly; upsert is an atomic
//! read-modify-write under the lock.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::id::ObjectId;
use crate::object::SharedObject;

/// Mapping of object ids to the objects this peer currently knows about.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    entries: Mutex<HashMap<ObjectId, SharedObject>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the entry at `id`, if any.
    pub fn get(&self, id: ObjectId) -> Option<SharedObject> {
        self.entries.lock().expect("registry lock poisoned").get(&id).cloned()
    }

    /// Inserts or overwrites the entry at `id`. Last writer wins.
    pub fn upsert(&self, id: ObjectId, object: SharedObject) {
        self.entries
            .lock()
            .expect("registry lock poisoned")
            .insert(id, object);
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.lock().expect("registry lock poisoned").contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all known ids, in no particular order.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.entries
            .lock()
            .expect("registry lock poisoned")
            .keys()
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::SimpleObject;
    use serde_json::json;

    fn lamp(lit: bool) -> SharedObject {
        SharedObject::Simple(SimpleObject::new("modkit.lamp", json!({ "lit": lit })))
    }

    #[test]
    fn upsert_and_get() {
        let registry = ObjectRegistry::new();
        let obj = lamp(true);
        let id = obj.id();

        assert!(!registry.contains(id));
        registry.upsert(id, obj.clone());
        assert_eq!(registry.get(id), Some(obj));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn upsert_overwrites_never_duplicates() {
        let registry = ObjectRegistry::new();
        let first = lamp(false);
        let id = first.id();
        registry.upsert(id, first);

        let mut second = lamp(true);
        if let SharedObject::Simple(o) = &mut second {
            o.id = id;
        }
        registry.upsert(id, second.clone());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(id), Some(second));
    }

    #[test]
    fn ids_snapshot() {
        let registry = ObjectRegistry::new();
        let a = lamp(true);
        let b = lamp(false);
        registry.upsert(a.id(), a.clone());
        registry.upsert(b.id(), b.clone());

        let mut ids = registry.ids();
        ids.sort_by_key(|id| id.to_string());
        let mut expected = vec![a.id(), b.id()];
        expected.sort_by_key(|id| id.to_string());
        assert_eq!(ids, expected);
    }
}
