//! Per-zone object lists and their recycling pool

use crate::scene::ObjectId;
use crate::zones::ZoneOwner;

/// Objects currently resident in one zone, plus the zone's owner
#[derive(Debug, Default)]
pub struct ZoneObjectList {
    owner: Option<ZoneOwner>,
    objects: Vec<ObjectId>,
}

impl ZoneObjectList {
    /// Owner of the zone; `None` only while the list sits in the pool
    pub fn owner(&self) -> Option<ZoneOwner> {
        self.owner
    }

    /// Objects in the zone
    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    /// Check whether `object` is in the zone
    pub fn contains(&self, object: ObjectId) -> bool {
        self.objects.contains(&object)
    }

    /// Add an object to the zone
    pub fn add(&mut self, object: ObjectId) {
        debug_assert!(!self.contains(object), "ZoneObjectList::add - object already in zone");
        self.objects.push(object);
    }

    /// Remove an object from the zone; false if it was not there
    pub fn remove(&mut self, object: ObjectId) -> bool {
        match self.objects.iter().position(|o| *o == object) {
            Some(index) => {
                self.objects.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Take the object list out, leaving the zone empty
    pub fn take_objects(&mut self) -> Vec<ObjectId> {
        std::mem::take(&mut self.objects)
    }

    /// Number of objects in the zone
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the zone is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Pool of cleared zone lists waiting for reuse
#[derive(Debug, Default)]
pub struct ZoneListPool {
    free: Vec<ZoneObjectList>,
}

impl ZoneListPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    /// Get a list for a new zone, reusing a pooled one when available
    pub fn alloc(&mut self, owner: ZoneOwner) -> ZoneObjectList {
        let mut list = self.free.pop().unwrap_or_default();
        list.owner = Some(owner);
        list
    }

    /// Return a list to the pool, clearing its objects and owner
    pub fn free(&mut self, mut list: ZoneObjectList) {
        list.owner = None;
        list.objects.clear();
        self.free.push(list);
    }

    /// Number of lists available for reuse
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Check if the pool has no spare lists
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}
