//! Scene container trait and implementations
//!
//! The container is the spatial index the zone manager queries to find
//! zone spaces and objects overlapping an area. Implementations must be
//! order-stable: the same scene state and query return the same sequence.

use crate::scene::{ObjectId, ObjectInfo, ObjectTypes, AABB};

/// Trait for spatial indices holding scene objects
///
/// Allows pluggable implementations (list, octree, BVH, etc.) behind the
/// zone manager.
pub trait SceneContainer {
    /// Add an object, replacing any previous entry with the same id
    fn insert(&mut self, object: ObjectId, info: ObjectInfo);

    /// Remove an object from the container
    fn remove(&mut self, object: ObjectId);

    /// Update an object's world bounds (after a move)
    fn update_bounds(&mut self, object: ObjectId, world_box: AABB);

    /// Clear `out` and fill it with every object whose bounds overlap
    /// `area` and whose type flags match `filter`
    fn find_objects(&self, area: &AABB, filter: ObjectTypes, out: &mut Vec<ObjectId>);

    /// Current bounds and flags of an object
    fn object_info(&self, object: ObjectId) -> Option<ObjectInfo>;

    /// Get the total number of objects in the container
    fn object_count(&self) -> usize;

    /// Clear all objects from the container
    fn clear(&mut self);
}

/// Simple list-based container (no spatial optimization)
///
/// Performs linear search for all queries. Sufficient for small scenes and
/// tests; results come back in insertion order.
#[derive(Debug, Default)]
pub struct SimpleListContainer {
    /// List of objects with their bounds and flags
    objects: Vec<(ObjectId, ObjectInfo)>,
}

impl SimpleListContainer {
    /// Create a new empty container
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }
}

impl SceneContainer for SimpleListContainer {
    fn insert(&mut self, object: ObjectId, info: ObjectInfo) {
        if let Some(entry) = self.objects.iter_mut().find(|(o, _)| *o == object) {
            entry.1 = info;
        } else {
            self.objects.push((object, info));
        }
    }

    fn remove(&mut self, object: ObjectId) {
        self.objects.retain(|(o, _)| *o != object);
    }

    fn update_bounds(&mut self, object: ObjectId, world_box: AABB) {
        if let Some(entry) = self.objects.iter_mut().find(|(o, _)| *o == object) {
            entry.1.world_box = world_box;
        }
    }

    fn find_objects(&self, area: &AABB, filter: ObjectTypes, out: &mut Vec<ObjectId>) {
        out.clear();
        out.extend(
            self.objects
                .iter()
                .filter(|(_, info)| info.types.matches_filter(filter) && info.world_box.intersects(area))
                .map(|(object, _)| *object),
        );
    }

    fn object_info(&self, object: ObjectId) -> Option<ObjectInfo> {
        self.objects
            .iter()
            .find(|(o, _)| *o == object)
            .map(|(_, info)| *info)
    }

    fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn clear(&mut self) {
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn cube(center: f32, half: f32) -> AABB {
        AABB::around_point(Vec3::new(center, 0.0, 0.0), half)
    }

    #[test]
    fn test_simple_list_container_add_remove() {
        let mut container = SimpleListContainer::new();
        let a = ObjectId::new(1);
        let b = ObjectId::new(2);

        container.insert(a, ObjectInfo::new(cube(0.0, 1.0), ObjectTypes::STATIC));
        container.insert(b, ObjectInfo::new(cube(5.0, 1.0), ObjectTypes::ZONE_SPACE));
        assert_eq!(container.object_count(), 2);

        // Re-inserting replaces the entry
        container.insert(a, ObjectInfo::new(cube(1.0, 1.0), ObjectTypes::STATIC));
        assert_eq!(container.object_count(), 2);

        container.remove(a);
        assert_eq!(container.object_count(), 1);
        assert!(container.object_info(a).is_none());
    }

    #[test]
    fn test_find_objects_filters_by_type_and_area() {
        let mut container = SimpleListContainer::new();
        let plain = ObjectId::new(1);
        let space = ObjectId::new(2);
        let far = ObjectId::new(3);

        container.insert(plain, ObjectInfo::new(cube(0.0, 1.0), ObjectTypes::empty()));
        container.insert(space, ObjectInfo::new(cube(0.0, 4.0), ObjectTypes::ZONE_SPACE));
        container.insert(far, ObjectInfo::new(cube(100.0, 1.0), ObjectTypes::ZONE_SPACE));

        let mut out = vec![far];
        container.find_objects(&cube(0.0, 0.5), ObjectTypes::all(), &mut out);
        assert_eq!(out, vec![plain, space]);

        container.find_objects(&cube(0.0, 0.5), ObjectTypes::ZONE_SPACE, &mut out);
        assert_eq!(out, vec![space]);

        container.update_bounds(far, cube(0.0, 1.0));
        container.find_objects(&cube(0.0, 0.5), ObjectTypes::ZONE_SPACE, &mut out);
        assert_eq!(out, vec![space, far]);
    }
}
