//! Pending zoning work

use crate::scene::{ObjectId, AABB};

/// Queues of objects awaiting rezoning plus the accumulated dirty area
///
/// Both queues are drained last-in first-out. The area starts out absent
/// and grows by union as zone spaces are torn down or moved.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    objects: Vec<ObjectId>,
    zone_spaces: Vec<ObjectId>,
    area: Option<AABB>,
}

impl DirtyTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain object
    pub fn push_object(&mut self, object: ObjectId) {
        self.objects.push(object);
    }

    /// Queue a zone space
    pub fn push_zone_space(&mut self, space: ObjectId) {
        self.zone_spaces.push(space);
    }

    /// Pop the most recently queued plain object
    pub fn pop_object(&mut self) -> Option<ObjectId> {
        self.objects.pop()
    }

    /// Pop the most recently queued zone space
    pub fn pop_zone_space(&mut self) -> Option<ObjectId> {
        self.zone_spaces.pop()
    }

    /// Drop an object from whichever queue holds it
    pub fn remove(&mut self, object: ObjectId) {
        self.objects.retain(|o| *o != object);
        self.zone_spaces.retain(|o| *o != object);
    }

    /// Grow the dirty area to include `area`
    pub fn merge_area(&mut self, area: AABB) {
        self.area = Some(match self.area {
            Some(current) => current.union(&area),
            None => area,
        });
    }

    /// Take the accumulated dirty area, leaving none behind
    pub fn take_area(&mut self) -> Option<AABB> {
        self.area.take()
    }

    /// Currently accumulated dirty area
    pub fn area(&self) -> Option<&AABB> {
        self.area.as_ref()
    }

    /// Check if any zone spaces are queued
    pub fn has_zone_spaces(&self) -> bool {
        !self.zone_spaces.is_empty()
    }

    /// Number of queued plain objects
    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    /// Number of queued zone spaces
    pub fn num_zone_spaces(&self) -> usize {
        self.zone_spaces.len()
    }

    /// True when nothing is queued and there is no dirty area
    pub fn is_clean(&self) -> bool {
        self.objects.is_empty() && self.zone_spaces.is_empty() && self.area.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_queues_are_lifo() {
        let mut dirty = DirtyTracker::new();
        dirty.push_object(ObjectId::new(1));
        dirty.push_object(ObjectId::new(2));
        dirty.push_zone_space(ObjectId::new(3));

        assert_eq!(dirty.pop_object(), Some(ObjectId::new(2)));
        assert_eq!(dirty.pop_object(), Some(ObjectId::new(1)));
        assert_eq!(dirty.pop_object(), None);
        assert_eq!(dirty.pop_zone_space(), Some(ObjectId::new(3)));
        assert!(dirty.is_clean());
    }

    #[test]
    fn test_area_merges_by_union() {
        let mut dirty = DirtyTracker::new();
        assert!(dirty.area().is_none());

        dirty.merge_area(AABB::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)));
        dirty.merge_area(AABB::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(6.0, 6.0, 6.0)));

        let area = dirty.take_area().unwrap();
        assert_eq!(area.min, Vec3::zeros());
        assert_eq!(area.max, Vec3::new(6.0, 6.0, 6.0));
        assert!(dirty.take_area().is_none());
    }

    #[test]
    fn test_remove_from_both_queues() {
        let mut dirty = DirtyTracker::new();
        let object = ObjectId::new(9);
        dirty.push_object(object);
        dirty.push_zone_space(object);

        dirty.remove(object);
        assert_eq!(dirty.num_objects(), 0);
        assert!(!dirty.has_zone_spaces());
    }
}
