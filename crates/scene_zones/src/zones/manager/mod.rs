//! Zone space manager
//!
//! Owns the zone ID space, the per-zone object lists and the object
//! membership table, and keeps them consistent as objects move and zone
//! spaces come and go. Changes are batched: mutations only queue work and
//! `update_zoning_state` applies it.

mod rezone;
mod verify;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::config::ZoningConfig;
use crate::events::{ZoningEvent, ZoningEventHandler, ZoningEventType, ZoningSignal};
use crate::foundation::collections::ZoneListHandle;
use crate::foundation::math::Vec3;
use crate::scene::{ObjectId, ObjectInfo, ObjectTypes, SceneContainer, AABB};
use crate::zones::{
    DirtyTracker, MembershipTable, ZoneConnectivity, ZoneId, ZoneListPool, ZoneObjectList,
    ZoneOwner, ZoneRange, ZoneSpace, ZoneSpaceRef, ZoningError, ZoningResult, ROOT_ZONE_ID,
    ROOT_ZONE_RANGE,
};

/// Zone space data kept by the manager
#[derive(Debug, Clone)]
pub(crate) struct SpaceRecord {
    space: Weak<RefCell<dyn ZoneSpace>>,
    range: ZoneRange,
}

/// What an object is, decided at registration
#[derive(Debug, Clone)]
pub(crate) enum ObjectKind {
    Plain,
    ZoneSpace(SpaceRecord),
}

/// Zoning state of one registered object
#[derive(Debug, Clone)]
pub(crate) struct ObjectRecord {
    kind: ObjectKind,
    /// Membership table entry; `None` exactly when `num_zones == 0`
    zone_list: Option<ZoneListHandle>,
    num_zones: u32,
    dirty: bool,
}

impl ObjectRecord {
    fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            zone_list: None,
            num_zones: 0,
            dirty: false,
        }
    }

    fn space(&self) -> Option<&SpaceRecord> {
        match &self.kind {
            ObjectKind::ZoneSpace(record) => Some(record),
            ObjectKind::Plain => None,
        }
    }
}

/// Tracks zone ownership and object membership for one scene
///
/// The root (outdoor) zone is created with the manager and holds zone `0`
/// for the manager's whole lifetime.
pub struct ZoneSpaceManager {
    config: ZoningConfig,
    container: Box<dyn SceneContainer>,

    /// Registered zone spaces in registration order; root excluded
    zone_spaces: Vec<ObjectId>,
    objects: HashMap<ObjectId, ObjectRecord>,

    /// Object list per zone ID; `None` marks a hole left by a removed space
    zone_lists: Vec<Option<ZoneObjectList>>,
    list_pool: ZoneListPool,
    membership: MembershipTable,

    num_total_allocated: u32,
    num_active: u32,

    dirty: DirtyTracker,
    connectivity: ZoneConnectivity,
    signal: ZoningSignal,

    /// Scratch results for zone space queries
    space_query: Vec<ObjectId>,
    /// Scratch results for area rescans
    object_query: Vec<ObjectId>,
}

impl ZoneSpaceManager {
    /// Create a manager over `container` with default configuration
    pub fn new(container: Box<dyn SceneContainer>) -> Self {
        Self::build(container, ZoningConfig::default())
    }

    /// Create a manager with a validated configuration
    pub fn with_config(container: Box<dyn SceneContainer>, config: ZoningConfig) -> ZoningResult<Self> {
        config.validate()?;
        Ok(Self::build(container, config))
    }

    fn build(container: Box<dyn SceneContainer>, config: ZoningConfig) -> Self {
        let mut list_pool = ZoneListPool::new();
        let zone_lists = vec![Some(list_pool.alloc(ZoneOwner::Root))];
        let membership = MembershipTable::new(config.max_object_zones);

        log::debug!(
            "ZoneSpaceManager: created with root zone {} (max {} zones per object)",
            ROOT_ZONE_RANGE,
            config.max_object_zones
        );

        Self {
            config,
            container,
            zone_spaces: Vec::new(),
            objects: HashMap::new(),
            zone_lists,
            list_pool,
            membership,
            num_total_allocated: ROOT_ZONE_RANGE.count,
            num_active: ROOT_ZONE_RANGE.count,
            dirty: DirtyTracker::new(),
            connectivity: ZoneConnectivity::new(),
            signal: ZoningSignal::new(),
            space_query: Vec::new(),
            object_query: Vec::new(),
        }
    }

    // ========================================================================
    // Zone space registration
    // ========================================================================

    /// Give `space` a fresh range of `num_zones` zone IDs
    ///
    /// Registers `object` with the manager if it is not known yet and
    /// flags it as a zone space in the container. The space is queued so
    /// the next update pulls objects into its zones.
    pub fn register_zones(&mut self, object: ObjectId, space: &ZoneSpaceRef, num_zones: u32) -> ZoningResult<ZoneRange> {
        if num_zones == 0 {
            return Err(ZoningError::NoZones(object));
        }
        if self.objects.get(&object).is_some_and(|record| record.space().is_some()) {
            return Err(ZoningError::AlreadyRegistered(object));
        }

        self.compact_zones_check();

        let range = ZoneRange::new(self.num_total_allocated, num_zones);
        self.num_total_allocated += num_zones;
        self.num_active += num_zones;

        let owner = ZoneOwner::Space(object);
        for _ in range.ids() {
            let list = self.list_pool.alloc(owner);
            self.zone_lists.push(Some(list));
        }
        self.zone_spaces.push(object);

        // Make sure the container reports the object as a zone space
        let world_box = space.borrow().world_box();
        let types = self
            .container
            .object_info(object)
            .map_or(ObjectTypes::ZONE_SPACE, |info| info.types | ObjectTypes::ZONE_SPACE);
        self.container.insert(object, ObjectInfo::new(world_box, types));

        let record = self
            .objects
            .entry(object)
            .or_insert_with(|| ObjectRecord::new(ObjectKind::Plain));
        record.kind = ObjectKind::ZoneSpace(SpaceRecord {
            space: Rc::downgrade(space),
            range,
        });

        // Requeue on the zone space queue even if it sat on the object queue
        if record.dirty {
            record.dirty = false;
            self.dirty.remove(object);
        }
        self.mark_dirty(object);

        log::debug!("ZoneSpaceManager: range {} allocated to {}", range, object);
        self.signal.fire(&ZoningEvent::ZonesRegistered { space: object, range });

        Ok(range)
    }

    /// Release all zone IDs held by a zone space
    ///
    /// Objects in the released zones lose those memberships and are
    /// queued; the space's area is rescanned on the next update. The
    /// object itself stays registered as a plain object.
    pub fn unregister_zones(&mut self, object: ObjectId) -> ZoningResult<ZoneRange> {
        let record = self.objects.get(&object).ok_or(ZoningError::NotRegistered(object))?;
        let space = record.space().cloned().ok_or(ZoningError::NotAZoneSpace(object))?;
        let range = space.range;

        debug_assert!(
            self.num_active >= range.count,
            "ZoneSpaceManager::unregister_zones - too many zones removed"
        );

        for zone in range.ids() {
            self.clear_zone_list(zone);
            if let Some(list) = self.zone_lists[zone as usize].take() {
                self.list_pool.free(list);
            }
        }

        self.disconnect_zone_space(object);

        self.num_active -= range.count;
        self.zone_spaces.retain(|s| *s != object);

        self.sync_space_bounds(object, &space);
        if let Some(info) = self.container.object_info(object) {
            self.container
                .insert(object, ObjectInfo::new(info.world_box, info.types - ObjectTypes::ZONE_SPACE));
        }

        if let Some(record) = self.objects.get_mut(&object) {
            record.kind = ObjectKind::Plain;
            // Move a pending zone space update over to the object queue
            if record.dirty {
                self.dirty.remove(object);
                self.dirty.push_object(object);
            }
        }

        log::debug!("ZoneSpaceManager: range {} released from {}", range, object);
        self.signal.fire(&ZoningEvent::ZonesUnregistered { space: object, range });

        Ok(range)
    }

    // ========================================================================
    // Object registration and change tracking
    // ========================================================================

    /// Add an object to the container and queue it for zoning
    pub fn register_object(&mut self, object: ObjectId, info: ObjectInfo) -> ZoningResult<()> {
        if self.objects.contains_key(&object) {
            return Err(ZoningError::AlreadyRegistered(object));
        }

        self.container.insert(object, info);
        self.objects.insert(object, ObjectRecord::new(ObjectKind::Plain));
        self.mark_dirty(object);
        Ok(())
    }

    /// Remove an object from zoning and from the container
    ///
    /// Zone spaces release their zone IDs as part of this.
    pub fn unregister_object(&mut self, object: ObjectId) -> ZoningResult<()> {
        let is_space = match self.objects.get(&object) {
            Some(record) => record.space().is_some(),
            None => return Err(ZoningError::NotRegistered(object)),
        };

        self.dirty.remove(object);
        self.zone_remove(object);

        if is_space {
            self.unregister_zones(object)?;
            self.dirty.remove(object);
        }

        self.objects.remove(&object);
        self.container.remove(object);
        Ok(())
    }

    /// Mark an object's zoning as stale
    ///
    /// Does nothing if the object is already queued.
    pub fn notify_object_changed(&mut self, object: ObjectId) -> ZoningResult<()> {
        if !self.objects.contains_key(&object) {
            return Err(ZoningError::NotRegistered(object));
        }
        self.mark_dirty(object);
        Ok(())
    }

    /// Move an object and queue it for rezoning
    ///
    /// For zone spaces pass the space's new world box; the area it used to
    /// cover is rescanned as well.
    pub fn move_object(&mut self, object: ObjectId, world_box: AABB) -> ZoningResult<()> {
        let record = self.objects.get(&object).ok_or(ZoningError::NotRegistered(object))?;

        if record.space().is_some() {
            if let Some(old) = self.container.object_info(object) {
                self.dirty.merge_area(old.world_box);
            }
        }

        self.container.update_bounds(object, world_box);
        self.mark_dirty(object);
        Ok(())
    }

    /// Bring zoning up to date if anything affecting `object` is pending
    pub fn update_object(&mut self, object: ObjectId) -> ZoningResult<()> {
        let record = self.objects.get(&object).ok_or(ZoningError::NotRegistered(object))?;

        if !self.dirty.has_zone_spaces() && !record.dirty {
            return Ok(());
        }

        self.update_zoning_state();
        Ok(())
    }

    fn mark_dirty(&mut self, object: ObjectId) {
        let Some(record) = self.objects.get_mut(&object) else {
            return;
        };
        if record.dirty {
            return;
        }

        match record.kind {
            ObjectKind::ZoneSpace(_) => self.dirty.push_zone_space(object),
            ObjectKind::Plain => self.dirty.push_object(object),
        }
        record.dirty = true;
    }

    // ========================================================================
    // Update pass
    // ========================================================================

    /// Apply all queued zoning work
    ///
    /// Dirty zone spaces are torn down first and their combined area is
    /// rescanned; remaining dirty objects are rezoned afterwards.
    pub fn update_zoning_state(&mut self) {
        if self.dirty.is_clean() {
            return;
        }

        while let Some(object) = self.dirty.pop_zone_space() {
            let Some(space) = self.objects.get(&object).and_then(|r| r.space().cloned()) else {
                if let Some(record) = self.objects.get_mut(&object) {
                    record.dirty = false;
                }
                continue;
            };

            self.zone_remove(object);
            self.disconnect_zone_space(object);

            for zone in space.range.ids() {
                self.clear_zone_list(zone);
            }

            self.sync_space_bounds(object, &space);
        }

        if let Some(area) = self.dirty.take_area() {
            self.rezone_objects(&area);

            if self.config.verify_after_update {
                if let Err(e) = self.verify_state() {
                    log::error!("ZoneSpaceManager: verification failed after update: {}", e);
                    debug_assert!(false, "ZoneSpaceManager::update_zoning_state - {}", e);
                }
            }

            self.signal.fire(&ZoningEvent::ZoningChanged {
                area,
                active_zones: self.num_active,
            });
        }

        while let Some(object) = self.dirty.pop_object() {
            if self.is_dirty(object) {
                self.rezone_object(object);
            }
            debug_assert!(!self.is_dirty(object), "ZoneSpaceManager::update_zoning_state - object still dirty");
        }

        debug_assert!(self.dirty.is_clean(), "ZoneSpaceManager::update_zoning_state - work left over");
    }

    // ========================================================================
    // Compaction
    // ========================================================================

    /// Compact the zone ID space if at most half of it is in use
    fn compact_zones_check(&mut self) {
        if self.num_active > self.num_total_allocated / 2 {
            return;
        }
        self.compact_zones();
    }

    /// Reassign zone IDs so the active ranges are packed behind the root
    ///
    /// Spaces keep their relative order. Objects holding relocated zone
    /// IDs have their membership entries rewritten in place.
    pub fn compact_zones(&mut self) {
        let allocated_before = self.num_total_allocated;
        let mut old_lists = std::mem::take(&mut self.zone_lists);
        let mut new_lists: Vec<Option<ZoneObjectList>> = Vec::with_capacity(self.num_active as usize);
        new_lists.push(old_lists[ROOT_ZONE_ID as usize].take());

        let mut next_zone = ROOT_ZONE_RANGE.end();
        for index in 0..self.zone_spaces.len() {
            let object = self.zone_spaces[index];
            let Some(ObjectKind::ZoneSpace(space)) = self.objects.get_mut(&object).map(|r| &mut r.kind) else {
                debug_assert!(false, "ZoneSpaceManager::compact_zones - zone space without record");
                continue;
            };

            let old_range = space.range;
            let new_range = ZoneRange::new(next_zone, old_range.count);
            space.range = new_range;
            next_zone = new_range.end();

            for n in 0..old_range.count {
                let old_zone = old_range.global(n);
                let new_zone = new_range.global(n);
                let list = old_lists.get_mut(old_zone as usize).and_then(Option::take);

                if old_zone != new_zone {
                    if let Some(list) = &list {
                        for member in list.objects() {
                            let handle = self.objects.get(member).and_then(|r| r.zone_list);
                            if let Some(handle) = handle {
                                self.membership.replace_value(handle, old_zone, new_zone);
                            }
                        }
                    }
                }
                new_lists.push(list);
            }

            if old_range != new_range {
                log::debug!("ZoneSpaceManager: compacted {} from {} to {}", object, old_range, new_range);
            }
        }

        self.zone_lists = new_lists;
        self.num_total_allocated = next_zone;

        debug_assert_eq!(
            self.num_total_allocated, self.num_active,
            "ZoneSpaceManager::compact_zones - mismatch between active and allocated zones"
        );

        if allocated_before != self.num_total_allocated {
            self.signal.fire(&ZoningEvent::ZonesCompacted {
                allocated_before,
                allocated_after: self.num_total_allocated,
            });
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Zone containing `point`, falling back to the root zone
    pub fn find_zone(&self, point: Vec3) -> (ZoneOwner, ZoneId) {
        debug_assert!(self.num_active >= 1, "ZoneSpaceManager::find_zone - root zone missing");

        if self.num_active == 1 {
            return (ZoneOwner::Root, ROOT_ZONE_ID);
        }

        let query_box = AABB::around_point(point, self.config.point_query_extent);
        let mut spaces = Vec::new();
        self.container.find_objects(&query_box, ObjectTypes::ZONE_SPACE, &mut spaces);

        for object in spaces {
            let Some((space, range)) = self.upgrade_space(object) else {
                continue;
            };
            let local = space.borrow().point_zone(point);
            if let Some(local) = local.filter(|zone| *zone < range.count) {
                return (ZoneOwner::Space(object), range.global(local));
            }
        }

        (ZoneOwner::Root, ROOT_ZONE_ID)
    }

    /// All zones overlapping `area`
    ///
    /// The root zone is included when any space lets the area leak outside
    /// its zones or when no zone was found at all.
    pub fn find_zones(&self, area: &AABB) -> Vec<ZoneId> {
        let mut spaces = Vec::new();
        self.container.find_objects(area, ObjectTypes::ZONE_SPACE, &mut spaces);

        let mut zones = Vec::new();
        let mut outside_included = false;

        for object in spaces {
            let Some((space, range)) = self.upgrade_space(object) else {
                continue;
            };
            let overlap = space.borrow().overlapping_zones(area);
            outside_included |= overlap.outside;
            zones.extend(
                overlap
                    .zones
                    .iter()
                    .filter(|local| **local < range.count)
                    .map(|local| range.global(*local)),
            );
        }

        if outside_included || zones.is_empty() {
            zones.push(ROOT_ZONE_ID);
        }
        zones
    }

    // ========================================================================
    // Zone space connectivity
    // ========================================================================

    /// Link two registered zone spaces; false if already linked
    pub fn connect_zone_spaces(&mut self, a: ObjectId, b: ObjectId) -> ZoningResult<bool> {
        self.require_space(a)?;
        self.require_space(b)?;
        Ok(self.connectivity.connect(a, b))
    }

    /// Drop every link of a registered zone space
    pub fn disconnect_all_zone_spaces(&mut self, space: ObjectId) -> ZoningResult<()> {
        self.require_space(space)?;
        self.disconnect_zone_space(space);
        Ok(())
    }

    /// Zone spaces linked to `space`
    pub fn connected_zone_spaces(&self, space: ObjectId) -> Vec<ObjectId> {
        self.connectivity.neighbors(space).collect()
    }

    fn disconnect_zone_space(&mut self, object: ObjectId) {
        let dropped = self.connectivity.disconnect_all(object);
        if !dropped.is_empty() {
            log::trace!("ZoneSpaceManager: disconnected {} from {} space(s)", object, dropped.len());
        }
        if let Some((space, _)) = self.upgrade_space(object) {
            space.borrow_mut().on_disconnected();
        }
    }

    fn require_space(&self, object: ObjectId) -> ZoningResult<&SpaceRecord> {
        self.objects
            .get(&object)
            .ok_or(ZoningError::NotRegistered(object))?
            .space()
            .ok_or(ZoningError::NotAZoneSpace(object))
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Describe every zone space and zone; optionally rezone the whole
    /// world first
    pub fn dump_zone_states(&mut self, update: bool) -> String {
        if update {
            self.rezone_objects(&AABB::global());
        }

        let mut out = format!(
            "zones: {} active / {} allocated, {} zone space(s)",
            self.num_active,
            self.num_total_allocated,
            self.zone_spaces.len()
        );

        for object in &self.zone_spaces {
            let range = self.zone_range(*object).unwrap_or(ZoneRange::new(0, 0));
            let state = match self.upgrade_space(*object) {
                Some((space, _)) => space.borrow().dump_zone_state(),
                None => "<dropped>".to_string(),
            };
            out.push_str(&format!("\n  space {} {}: {}", object, range, state));
        }

        for (zone, list) in self.zone_lists.iter().enumerate() {
            if let Some(list) = list {
                if !list.is_empty() {
                    let members: Vec<String> = list.objects().iter().map(ToString::to_string).collect();
                    out.push_str(&format!("\n  zone {}: {}", zone, members.join(" ")));
                }
            }
        }

        log::info!("ZoneSpaceManager state:\n{}", out);
        out
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Register a handler for one event type
    pub fn register_handler(&mut self, event_type: ZoningEventType, handler: Box<dyn ZoningEventHandler>) {
        self.signal.register_handler(event_type, handler);
    }

    /// Call `handler` whenever an update rezoned an area
    pub fn on_zoning_changed<F>(&mut self, handler: F)
    where
        F: FnMut(&ZoningEvent) -> bool + 'static,
    {
        self.signal.register_handler(ZoningEventType::ZoningChanged, Box::new(handler));
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Manager configuration
    pub fn config(&self) -> &ZoningConfig {
        &self.config
    }

    /// Spatial index the manager queries
    pub fn container(&self) -> &dyn SceneContainer {
        self.container.as_ref()
    }

    /// Mutable access to the spatial index
    ///
    /// Objects changed through this must be passed to
    /// `notify_object_changed` afterwards.
    pub fn container_mut(&mut self) -> &mut dyn SceneContainer {
        self.container.as_mut()
    }

    /// Total zone IDs allocated, holes included
    pub fn num_zones(&self) -> u32 {
        self.num_total_allocated
    }

    /// Zone IDs currently owned by the root or a zone space
    pub fn num_active_zones(&self) -> u32 {
        self.num_active
    }

    /// Number of registered zone spaces, root excluded
    pub fn num_zone_spaces(&self) -> usize {
        self.zone_spaces.len()
    }

    /// Registered zone spaces in registration order
    pub fn zone_spaces(&self) -> &[ObjectId] {
        &self.zone_spaces
    }

    /// Check whether `zone` is allocated and not a hole
    pub fn is_valid_zone_id(&self, zone: ZoneId) -> bool {
        self.zone_list(zone).is_some()
    }

    /// Owner of an allocated zone
    pub fn zone_owner(&self, zone: ZoneId) -> Option<ZoneOwner> {
        self.zone_list(zone).and_then(ZoneObjectList::owner)
    }

    /// Current zone range of a zone space
    pub fn zone_range(&self, space: ObjectId) -> Option<ZoneRange> {
        self.objects.get(&space)?.space().map(|s| s.range)
    }

    /// Shared handle of a registered zone space, if the scene still holds it
    pub fn zone_space(&self, space: ObjectId) -> Option<ZoneSpaceRef> {
        self.upgrade_space(space).map(|(space, _)| space)
    }

    /// Objects currently in `zone`
    pub fn zone_objects(&self, zone: ZoneId) -> &[ObjectId] {
        self.zone_list(zone).map_or(&[][..], ZoneObjectList::objects)
    }

    /// Zones an object currently occupies
    pub fn object_zones(&self, object: ObjectId) -> &[ZoneId] {
        match self.objects.get(&object).and_then(|r| r.zone_list) {
            Some(handle) => self.membership.values(handle),
            None => &[],
        }
    }

    /// Number of zones an object currently occupies
    pub fn num_object_zones(&self, object: ObjectId) -> u32 {
        self.objects.get(&object).map_or(0, |r| r.num_zones)
    }

    /// Check whether `object` is in the object list of `zone`
    pub fn is_in_zone_list(&self, zone: ZoneId, object: ObjectId) -> bool {
        self.zone_list(zone).is_some_and(|list| list.contains(object))
    }

    /// Check whether an object is waiting to be rezoned
    pub fn is_dirty(&self, object: ObjectId) -> bool {
        self.objects.get(&object).is_some_and(|r| r.dirty)
    }

    /// Check whether an object is known to the manager
    pub fn is_registered(&self, object: ObjectId) -> bool {
        self.objects.contains_key(&object)
    }

    /// Check whether an object is a registered zone space
    pub fn is_zone_space(&self, object: ObjectId) -> bool {
        self.objects.get(&object).is_some_and(|r| r.space().is_some())
    }

    /// Pending zoning work
    pub fn dirty_tracker(&self) -> &DirtyTracker {
        &self.dirty
    }

    fn zone_list(&self, zone: ZoneId) -> Option<&ZoneObjectList> {
        self.zone_lists.get(zone as usize)?.as_ref()
    }

    fn upgrade_space(&self, object: ObjectId) -> Option<(ZoneSpaceRef, ZoneRange)> {
        let Some(record) = self.objects.get(&object).and_then(ObjectRecord::space) else {
            log::warn!("ZoneSpaceManager: {} reported as zone space but not registered as one", object);
            return None;
        };
        match record.space.upgrade() {
            Some(space) => Some((space, record.range)),
            None => {
                log::warn!("ZoneSpaceManager: zone space {} was dropped while registered", object);
                None
            }
        }
    }

    /// Mark a zone space's old and current bounds dirty
    ///
    /// The container copy of the bounds is refreshed from the space, so a
    /// reshaped space is found by later queries without a `move_object`.
    fn sync_space_bounds(&mut self, object: ObjectId, record: &SpaceRecord) {
        let old = self.container.object_info(object).map(|info| info.world_box);
        if let Some(old) = old {
            self.dirty.merge_area(old);
        }

        match (record.space.upgrade(), old) {
            (Some(space), _) => {
                let world_box = space.borrow().world_box();
                self.container.update_bounds(object, world_box);
                self.dirty.merge_area(world_box);
            }
            (None, None) => self.dirty.merge_area(AABB::global()),
            (None, Some(_)) => {}
        }
    }
}

impl std::fmt::Debug for ZoneSpaceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneSpaceManager")
            .field("num_zones", &self.num_total_allocated)
            .field("num_active", &self.num_active)
            .field("zone_spaces", &self.zone_spaces)
            .field("objects", &self.objects.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}
