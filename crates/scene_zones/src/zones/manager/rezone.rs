//! Rezoning engine
//!
//! Computes the zones an object belongs to from spatial queries and
//! applies the result to the membership table and zone lists.

use smallvec::SmallVec;

use super::{ObjectKind, ZoneSpaceManager};
use crate::foundation::collections::ZoneIdList;
use crate::scene::{ObjectId, ObjectInfo, ObjectTypes, AABB};
use crate::zones::{ZoneId, ZoneOwner, ZoneSpaceRef, ROOT_ZONE_ID};

/// Zones contributed by one zone space during an insert
struct TempZoneRecord {
    space: ZoneSpaceRef,
    /// Local zone indices, passed to the space's callback
    local: ZoneIdList,
}

impl ZoneSpaceManager {
    /// Rezone every registered object overlapping `area`
    pub(super) fn rezone_objects(&mut self, area: &AABB) {
        // Rezoning runs queries of its own, so work from a copy
        let mut objects = std::mem::take(&mut self.object_query);
        self.container.find_objects(area, ObjectTypes::all(), &mut objects);

        for object in objects.iter().copied() {
            if self.objects.contains_key(&object) {
                self.rezone_object(object);
            } else {
                log::warn!("ZoneSpaceManager: skipping unregistered object {} in area rezone", object);
            }
        }

        objects.clear();
        self.object_query = objects;
    }

    /// Recompute one object's zones if they can have changed
    pub(super) fn rezone_object(&mut self, object: ObjectId) {
        let Some(record) = self.objects.get(&object) else {
            return;
        };

        if record.num_zones == 0 {
            self.zone_insert(object, false);
            return;
        }

        let info = self.object_info_or_outdoor(object);
        if self.num_active == 1 || info.types.is_outdoor_restricted() {
            self.set_clean(object);
            return;
        }

        self.query_zone_spaces(&info.world_box);

        // Nothing zoned around and already outdoors: nothing to do
        if self.space_query.is_empty() && self.object_zones(object) == [ROOT_ZONE_ID] {
            self.set_clean(object);
            return;
        }

        log::trace!("ZoneSpaceManager: rezoning {}", object);
        self.zone_remove(object);
        self.zone_insert(object, true);
    }

    /// Assign zones to an object that currently has none
    ///
    /// With `query_ready` the zone space query for the object's bounds has
    /// already been run into the scratch list.
    pub(super) fn zone_insert(&mut self, object: ObjectId, query_ready: bool) {
        debug_assert_eq!(self.num_object_zones(object), 0, "ZoneSpaceManager::zone_insert - object already zoned");

        let info = self.object_info_or_outdoor(object);
        let outside_only = self.num_active == 1 || info.types.is_outdoor_restricted();

        let capacity = self.membership.capacity();
        let mut global_zones = ZoneIdList::new();
        let mut records: SmallVec<[TempZoneRecord; 4]> = SmallVec::new();
        let mut outside_included = true;

        if !outside_only {
            if !query_ready {
                self.query_zone_spaces(&info.world_box);
            }

            let spaces = std::mem::take(&mut self.space_query);
            for space_id in spaces.iter().copied() {
                // A zone space turns up in its own query
                if space_id == object {
                    continue;
                }
                let Some((space, range)) = self.upgrade_space(space_id) else {
                    continue;
                };

                let overlap = space.borrow().overlapping_object_zones(object, &info.world_box);
                debug_assert!(
                    !overlap.zones.is_empty() || overlap.outside,
                    "ZoneSpaceManager::zone_insert - object must be in some zone or outside"
                );

                // Outdoors only if no space fully contains the object
                outside_included &= overlap.outside;

                let remaining = capacity - global_zones.len();
                let local: ZoneIdList = overlap
                    .zones
                    .iter()
                    .copied()
                    .filter(|zone| *zone < range.count)
                    .take(remaining)
                    .collect();

                if !local.is_empty() {
                    global_zones.extend(local.iter().map(|zone| range.global(*zone)));
                    records.push(TempZoneRecord { space, local });
                }
            }
            self.space_query = spaces;
        }

        if outside_only || (outside_included && global_zones.len() < capacity) {
            global_zones.push(ROOT_ZONE_ID);
        }

        self.set_object_zone_list(object, &global_zones);
        for zone in &global_zones {
            if let Some(Some(list)) = self.zone_lists.get_mut(*zone as usize) {
                list.add(object);
            }
        }

        for record in &records {
            record.space.borrow_mut().on_object_added(object, &record.local);
        }

        log::trace!("ZoneSpaceManager: {} zoned into {:?}", object, global_zones.as_slice());
        self.set_clean(object);
    }

    /// Take an object out of all its zones
    pub(super) fn zone_remove(&mut self, object: ObjectId) {
        let Some(handle) = self.objects.get(&object).and_then(|r| r.zone_list) else {
            return;
        };

        let zones = ZoneIdList::from_slice(self.membership.values(handle));
        let mut owners: SmallVec<[ObjectId; 4]> = SmallVec::new();

        for zone in &zones {
            if let Some(Some(list)) = self.zone_lists.get_mut(*zone as usize) {
                list.remove(object);
                if let Some(ZoneOwner::Space(owner)) = list.owner() {
                    if !owners.contains(&owner) {
                        owners.push(owner);
                    }
                }
            }
        }

        for owner in owners {
            if let Some((space, _)) = self.upgrade_space(owner) {
                space.borrow_mut().on_object_removed(object);
            }
        }

        self.membership.free_list(handle);
        if let Some(record) = self.objects.get_mut(&object) {
            record.zone_list = None;
            record.num_zones = 0;
            record.dirty = false;
        }
        log::trace!("ZoneSpaceManager: {} removed from {:?}", object, zones.as_slice());
    }

    /// Store an object's complete zone set
    pub(super) fn set_object_zone_list(&mut self, object: ObjectId, zones: &[ZoneId]) {
        let Some(record) = self.objects.get_mut(&object) else {
            return;
        };

        if let ObjectKind::ZoneSpace(space) = &record.kind {
            debug_assert!(
                zones.iter().all(|zone| !space.range.contains(*zone)),
                "ZoneSpaceManager::set_object_zone_list - zone space cannot be in its own zones"
            );
        }

        record.zone_list = match (record.zone_list, zones.is_empty()) {
            (None, true) => None,
            (None, false) => Some(self.membership.alloc_list(zones)),
            (Some(handle), true) => {
                self.membership.free_list(handle);
                None
            }
            (Some(handle), false) => {
                self.membership.realloc_list(handle, zones);
                Some(handle)
            }
        };
        record.num_zones = zones.len() as u32;
    }

    /// Empty one zone's object list
    ///
    /// Every object loses its membership in the zone. Objects left without
    /// any zone are queued so they fall back to the root zone on the next
    /// update. The owning space hears about an object once, when it loses
    /// its last zone of that space.
    pub(super) fn clear_zone_list(&mut self, zone: ZoneId) {
        debug_assert!(zone < self.num_total_allocated, "ZoneSpaceManager::clear_zone_list - zone ID out of range");

        let Some(Some(list)) = self.zone_lists.get_mut(zone as usize) else {
            return;
        };
        let owner = list.owner();
        let members = list.take_objects();

        for object in &members {
            let Some(record) = self.objects.get_mut(object) else {
                debug_assert!(false, "ZoneSpaceManager::clear_zone_list - unregistered object in zone list");
                continue;
            };
            debug_assert!(record.num_zones > 0, "ZoneSpaceManager::clear_zone_list - bad reference count");

            record.num_zones = record.num_zones.saturating_sub(1);
            if let Some(handle) = record.zone_list {
                if self.membership.remove_value(handle, zone) == 0 {
                    self.membership.free_list(handle);
                    record.zone_list = None;
                }
            }

            if record.num_zones == 0 {
                self.mark_dirty(*object);
            }
        }

        let Some(ZoneOwner::Space(owner)) = owner else {
            return;
        };
        let Some((space, range)) = self.upgrade_space(owner) else {
            return;
        };

        // Only objects that left the last zone they held in this space
        let mut space = space.borrow_mut();
        for object in &members {
            let still_inside = self
                .objects
                .get(object)
                .and_then(|record| record.zone_list)
                .is_some_and(|handle| self.membership.values(handle).iter().any(|zone| range.contains(*zone)));
            if !still_inside {
                space.on_object_removed(*object);
            }
        }
    }

    fn query_zone_spaces(&mut self, area: &AABB) {
        self.container.find_objects(area, ObjectTypes::ZONE_SPACE, &mut self.space_query);
    }

    fn set_clean(&mut self, object: ObjectId) {
        if let Some(record) = self.objects.get_mut(&object) {
            record.dirty = false;
        }
    }

    /// Container info for an object; objects the container does not hold
    /// are kept outdoors
    fn object_info_or_outdoor(&self, object: ObjectId) -> ObjectInfo {
        self.container.object_info(object).unwrap_or_else(|| {
            log::warn!("ZoneSpaceManager: {} missing from container, keeping it outdoors", object);
            ObjectInfo::new(AABB::global(), ObjectTypes::OUTDOOR_ONLY)
        })
    }
}
