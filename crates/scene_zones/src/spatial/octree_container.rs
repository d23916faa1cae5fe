//! Octree-based scene container
//!
//! Wraps `Octree` to provide the `SceneContainer` interface. Objects that
//! do not fit inside the octree bounds, and outdoor-restricted objects such
//! as terrain or sky, are kept in a linear overflow list so their extent
//! never widens octree queries.

use std::collections::HashMap;

use crate::scene::{ObjectId, ObjectInfo, ObjectTypes, SceneContainer, AABB};
use crate::spatial::{Octree, OctreeConfig};

/// Octree-backed implementation of `SceneContainer`
#[derive(Debug)]
pub struct OctreeContainer {
    octree: Octree,
    /// Objects the octree could not hold, in insertion order
    overflow: Vec<ObjectId>,
    /// Cache of object data for lookups and re-insertion
    object_cache: HashMap<ObjectId, ObjectInfo>,
}

impl OctreeContainer {
    /// Create a container covering `world_bounds`
    pub fn new(world_bounds: AABB, config: OctreeConfig) -> Self {
        Self {
            octree: Octree::new(world_bounds, config),
            overflow: Vec::new(),
            object_cache: HashMap::new(),
        }
    }

    /// Get a reference to the underlying octree
    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    /// Number of objects kept outside the octree
    pub fn overflow_count(&self) -> usize {
        self.overflow.len()
    }

    fn place(&mut self, object: ObjectId, info: ObjectInfo) {
        let fits = !info.types.is_outdoor_restricted() && self.octree.bounds().contains(&info.world_box);
        if !fits || !self.octree.insert(object, info) {
            log::trace!("object {} kept out of the octree, stored in overflow list", object);
            self.overflow.push(object);
        }
        self.object_cache.insert(object, info);
    }

    fn unplace(&mut self, object: ObjectId) -> Option<ObjectInfo> {
        let info = self.object_cache.remove(&object)?;
        if self.octree.remove(object).is_none() {
            self.overflow.retain(|o| *o != object);
        }
        Some(info)
    }
}

impl SceneContainer for OctreeContainer {
    fn insert(&mut self, object: ObjectId, info: ObjectInfo) {
        self.unplace(object);
        self.place(object, info);
    }

    fn remove(&mut self, object: ObjectId) {
        self.unplace(object);
    }

    fn update_bounds(&mut self, object: ObjectId, world_box: AABB) {
        // Octree requires remove + re-insert for updates
        if let Some(mut info) = self.unplace(object) {
            info.world_box = world_box;
            self.place(object, info);
        }
    }

    fn find_objects(&self, area: &AABB, filter: ObjectTypes, out: &mut Vec<ObjectId>) {
        out.clear();
        self.octree.query_box(area, filter, out);

        for object in &self.overflow {
            if let Some(info) = self.object_cache.get(object) {
                if info.types.matches_filter(filter) && info.world_box.intersects(area) {
                    out.push(*object);
                }
            }
        }
    }

    fn object_info(&self, object: ObjectId) -> Option<ObjectInfo> {
        self.object_cache.get(&object).copied()
    }

    fn object_count(&self) -> usize {
        self.object_cache.len()
    }

    fn clear(&mut self) {
        self.octree.clear();
        self.overflow.clear();
        self.object_cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn container() -> OctreeContainer {
        let bounds = AABB::new(
            Vec3::new(-50.0, -50.0, -50.0),
            Vec3::new(50.0, 50.0, 50.0),
        );
        let config = OctreeConfig {
            max_entries_per_node: 2,
            max_depth: 5,
            min_node_size: 5.0,
        };
        OctreeContainer::new(bounds, config)
    }

    #[test]
    fn test_container_insert_remove() {
        let mut spatial = container();
        let object = ObjectId::new(1);

        spatial.insert(object, ObjectInfo::new(AABB::around_point(Vec3::zeros(), 5.0), ObjectTypes::DYNAMIC));
        assert_eq!(spatial.object_count(), 1);
        assert_eq!(spatial.octree().entry_count(), 1);

        spatial.remove(object);
        assert_eq!(spatial.object_count(), 0);
        assert_eq!(spatial.octree().entry_count(), 0);
    }

    #[test]
    fn test_global_objects_go_to_overflow() {
        let mut spatial = container();
        let sky = ObjectId::new(9);

        spatial.insert(sky, ObjectInfo::new(AABB::around_point(Vec3::new(1000.0, 0.0, 0.0), 2000.0), ObjectTypes::GLOBAL_BOUNDS));
        assert_eq!(spatial.overflow_count(), 1);

        let mut out = Vec::new();
        spatial.find_objects(&AABB::around_point(Vec3::zeros(), 1.0), ObjectTypes::all(), &mut out);
        assert_eq!(out, vec![sky]);
    }

    #[test]
    fn test_world_spanning_objects_stay_out_of_octree() {
        let mut spatial = container();
        let sky = ObjectId::new(9);
        let bridge = ObjectId::new(10);

        spatial.insert(sky, ObjectInfo::new(AABB::global(), ObjectTypes::GLOBAL_BOUNDS));
        spatial.insert(bridge, ObjectInfo::new(AABB::around_point(Vec3::new(45.0, 0.0, 0.0), 10.0), ObjectTypes::STATIC));
        assert_eq!(spatial.overflow_count(), 2);
        assert_eq!(spatial.octree().entry_count(), 0);

        let mut out = Vec::new();
        spatial.find_objects(&AABB::around_point(Vec3::new(-30.0, 0.0, 0.0), 1.0), ObjectTypes::all(), &mut out);
        assert_eq!(out, vec![sky]);

        spatial.update_bounds(bridge, AABB::around_point(Vec3::new(20.0, 0.0, 0.0), 1.0));
        assert_eq!(spatial.overflow_count(), 1);
        assert_eq!(spatial.octree().entry_count(), 1);
    }

    #[test]
    fn test_update_bounds_moves_object() {
        let mut spatial = container();
        let ship = ObjectId::new(3);
        let mut out = Vec::new();

        for i in 0..6 {
            let filler = ObjectInfo::new(AABB::around_point(Vec3::new(-40.0 + i as f32, 0.0, 0.0), 0.5), ObjectTypes::STATIC);
            spatial.insert(ObjectId::new(100 + i), filler);
        }
        spatial.insert(ship, ObjectInfo::new(AABB::around_point(Vec3::new(30.0, 30.0, 30.0), 1.0), ObjectTypes::DYNAMIC));

        let target_area = AABB::around_point(Vec3::new(-30.0, -30.0, -30.0), 2.0);
        spatial.find_objects(&target_area, ObjectTypes::DYNAMIC, &mut out);
        assert!(out.is_empty());

        spatial.update_bounds(ship, AABB::around_point(Vec3::new(-30.0, -30.0, -30.0), 1.0));
        spatial.find_objects(&target_area, ObjectTypes::DYNAMIC, &mut out);
        assert_eq!(out, vec![ship]);
        assert_eq!(spatial.object_count(), 7);
    }
}
