//! Object → zone membership table
//!
//! Slot arena mapping a handle to a small bounded set of zone IDs. Each slot
//! keeps its IDs inline; freeing a handle returns the slot for reuse.

use crate::foundation::collections::{SlotMap, ZoneIdList, ZoneListHandle};
use crate::zones::ZoneId;

/// Handle-addressed multi-map from objects to the zones they occupy
#[derive(Debug)]
pub struct MembershipTable {
    lists: SlotMap<ZoneListHandle, ZoneIdList>,
    /// Maximum number of zone IDs per handle
    capacity: usize,
}

impl MembershipTable {
    /// Create a table allowing at most `capacity` zones per handle
    pub fn new(capacity: usize) -> Self {
        Self {
            lists: SlotMap::with_key(),
            capacity,
        }
    }

    /// Maximum number of zones per handle
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Allocate a list holding `zones`
    pub fn alloc_list(&mut self, zones: &[ZoneId]) -> ZoneListHandle {
        debug_assert!(zones.len() <= self.capacity, "MembershipTable::alloc_list - too many zones");
        self.lists.insert(ZoneIdList::from_slice(zones))
    }

    /// Overwrite the contents of an existing list in place
    pub fn realloc_list(&mut self, handle: ZoneListHandle, zones: &[ZoneId]) {
        debug_assert!(zones.len() <= self.capacity, "MembershipTable::realloc_list - too many zones");
        match self.lists.get_mut(handle) {
            Some(list) => {
                list.clear();
                list.extend_from_slice(zones);
            }
            None => debug_assert!(false, "MembershipTable::realloc_list - stale handle"),
        }
    }

    /// Release a list
    pub fn free_list(&mut self, handle: ZoneListHandle) {
        let removed = self.lists.remove(handle);
        debug_assert!(removed.is_some(), "MembershipTable::free_list - stale handle");
    }

    /// Zone IDs held by a handle; empty for stale handles
    pub fn values(&self, handle: ZoneListHandle) -> &[ZoneId] {
        self.lists.get(handle).map_or(&[][..], |list| list.as_slice())
    }

    /// Check whether a handle's set contains `zone`
    pub fn contains(&self, handle: ZoneListHandle, zone: ZoneId) -> bool {
        self.values(handle).contains(&zone)
    }

    /// Replace `old` with `new` in one handle's set
    ///
    /// Compaction calls this once per object found in a relocated zone list,
    /// so only the affected handles are visited.
    pub fn replace_value(&mut self, handle: ZoneListHandle, old: ZoneId, new: ZoneId) -> bool {
        let Some(list) = self.lists.get_mut(handle) else {
            return false;
        };
        match list.iter_mut().find(|zone| **zone == old) {
            Some(zone) => {
                *zone = new;
                true
            }
            None => false,
        }
    }

    /// Remove `zone` from a handle's set, returning how many IDs remain
    pub fn remove_value(&mut self, handle: ZoneListHandle, zone: ZoneId) -> usize {
        let Some(list) = self.lists.get_mut(handle) else {
            return 0;
        };
        if let Some(index) = list.iter().position(|z| *z == zone) {
            list.swap_remove(index);
        }
        list.len()
    }

    /// Check whether a handle is live
    pub fn is_live(&self, handle: ZoneListHandle) -> bool {
        self.lists.contains_key(handle)
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Check if no handles are live
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
