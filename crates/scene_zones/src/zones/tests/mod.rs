//! Scenario tests for the zone space manager
//!
//! Shared scene fixtures live here; the scenarios are split by topic.

mod properties;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::ZoningConfig;
use crate::foundation::math::Vec3;
use crate::scene::{ObjectId, ObjectInfo, ObjectTypes, SimpleListContainer, AABB};
use crate::zones::{BoxZoneSpace, ZoneOverlap, ZoneRange, ZoneSpace, ZoneSpaceManager, ZoneSpaceRef};

/// Box from two corners given as tuples
pub(super) fn aabb(min: (f32, f32, f32), max: (f32, f32, f32)) -> AABB {
    AABB::new(Vec3::new(min.0, min.1, min.2), Vec3::new(max.0, max.1, max.2))
}

/// `count` rooms of 10 units along +X starting at `origin_x`
pub(super) fn row_of_rooms(origin_x: f32, count: u32) -> Vec<AABB> {
    (0..count)
        .map(|i| {
            let x = origin_x + i as f32 * 10.0;
            aabb((x, 0.0, 0.0), (x + 10.0, 10.0, 10.0))
        })
        .collect()
}

/// Zone space answering every query with a fixed result
pub(super) struct ScriptedSpace {
    pub bounds: AABB,
    pub overlap: ZoneOverlap,
    pub added: Vec<(ObjectId, Vec<u32>)>,
    pub removed: Vec<ObjectId>,
}

impl ScriptedSpace {
    pub fn new(bounds: AABB, overlap: ZoneOverlap) -> Self {
        Self {
            bounds,
            overlap,
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl ZoneSpace for ScriptedSpace {
    fn world_box(&self) -> AABB {
        self.bounds
    }

    fn point_zone(&self, point: Vec3) -> Option<u32> {
        self.bounds.contains_point(point).then_some(0)
    }

    fn overlapping_zones(&self, _area: &AABB) -> ZoneOverlap {
        self.overlap.clone()
    }

    fn on_object_added(&mut self, object: ObjectId, zones: &[u32]) {
        self.added.push((object, zones.to_vec()));
    }

    fn on_object_removed(&mut self, object: ObjectId) {
        self.removed.push(object);
    }
}

/// Manager plus the scene-side handles of its box zone spaces
pub(super) struct TestScene {
    pub manager: ZoneSpaceManager,
    pub rooms: HashMap<ObjectId, Rc<RefCell<BoxZoneSpace>>>,
}

impl TestScene {
    pub fn new() -> Self {
        Self::with_config(ZoningConfig::default().with_verification(true))
    }

    pub fn with_config(config: ZoningConfig) -> Self {
        let manager = ZoneSpaceManager::with_config(Box::new(SimpleListContainer::new()), config)
            .expect("test config is valid");
        Self {
            manager,
            rooms: HashMap::new(),
        }
    }

    /// Register a box zone space with one zone per box
    pub fn add_rooms(&mut self, id: u32, zones: Vec<AABB>) -> ZoneRange {
        let object = ObjectId::new(id);
        let count = zones.len() as u32;
        let room = Rc::new(RefCell::new(BoxZoneSpace::new(format!("rooms{}", id), zones)));
        let shared: ZoneSpaceRef = room.clone();
        let range = self
            .manager
            .register_zones(object, &shared, count)
            .expect("zone registration succeeds");
        self.rooms.insert(object, room);
        range
    }

    /// Register a scripted zone space; the caller keeps the handle alive
    pub fn add_scripted(&mut self, id: u32, space: &Rc<RefCell<ScriptedSpace>>, count: u32) -> ZoneRange {
        let shared: ZoneSpaceRef = space.clone();
        self.manager
            .register_zones(ObjectId::new(id), &shared, count)
            .expect("zone registration succeeds")
    }

    /// Register a plain static object as a cube around `center`
    pub fn add_object(&mut self, id: u32, center: (f32, f32, f32), half_size: f32) -> ObjectId {
        self.add_typed_object(id, center, half_size, ObjectTypes::STATIC)
    }

    pub fn add_typed_object(&mut self, id: u32, center: (f32, f32, f32), half_size: f32, types: ObjectTypes) -> ObjectId {
        let object = ObjectId::new(id);
        let bounds = AABB::around_point(Vec3::new(center.0, center.1, center.2), half_size);
        self.manager
            .register_object(object, ObjectInfo::new(bounds, types))
            .expect("object registration succeeds");
        object
    }

    pub fn room(&self, id: u32) -> std::cell::Ref<'_, BoxZoneSpace> {
        self.rooms[&ObjectId::new(id)].borrow()
    }

    /// Run an update and check the full state afterwards
    pub fn update(&mut self) {
        self.manager.update_zoning_state();
        assert!(self.manager.dirty_tracker().is_clean());
        if let Err(e) = self.manager.verify_state() {
            panic!("zoning state invalid after update: {}", e);
        }
    }

    pub fn sorted_zones(&self, object: ObjectId) -> Vec<u32> {
        let mut zones = self.manager.object_zones(object).to_vec();
        zones.sort_unstable();
        zones
    }
}
