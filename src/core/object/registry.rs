//=========================================================================
// Object Registry
//=========================================================================
//
// Lookup contract between the core and whatever owns the game objects.
//
// `ObjectTable` is a plain ordered implementation; games with their own
// object storage implement `ObjectRegistry` directly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::warn;

//=== Internal Dependencies ===============================================

use super::{InteractiveObject, ObjectId};

//=== ObjectRegistry ======================================================

/// Resolves object ids to live objects.
pub trait ObjectRegistry {
    /// Returns the object with `id`, if it exists.
    fn fetch_object(&mut self, id: ObjectId) -> Option<&mut InteractiveObject>;

    /// Ids of every object that should be serviced this tick, in
    /// servicing order.
    fn live_objects(&self) -> Vec<ObjectId>;
}

//=== ObjectTable =========================================================

/// Id-ordered object storage.
#[derive(Debug, Default)]
pub struct ObjectTable {
    objects: BTreeMap<ObjectId, InteractiveObject>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `object` under its own id, replacing any previous entry.
    pub fn insert(&mut self, object: InteractiveObject) {
        let id = object.id;
        if self.objects.insert(id, object).is_some() {
            warn!("Object {} was already registered and has been replaced", id);
        }
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<InteractiveObject> {
        self.objects.remove(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&InteractiveObject> {
        self.objects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectRegistry for ObjectTable {
    fn fetch_object(&mut self, id: ObjectId) -> Option<&mut InteractiveObject> {
        self.objects.get_mut(&id)
    }

    fn live_objects(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
