//! Axis-aligned bounding boxes

use crate::foundation::math::{self, Vec3};

/// Half-size of the box standing in for "the whole world"
const GLOBAL_EXTENT: f32 = 1.0e8;

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Tight cube around a point
    pub fn around_point(point: Vec3, half_size: f32) -> Self {
        Self::from_center_extents(point, math::splat(half_size))
    }

    /// Box covering the entire world; used for objects with global bounds
    /// and for full-scene rescans
    pub fn global() -> Self {
        Self::around_point(Vec3::zeros(), GLOBAL_EXTENT)
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// True if min <= max on every axis
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if `other` lies entirely inside this AABB
    pub fn contains(&self, other: &AABB) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Smallest AABB enclosing both boxes
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: math::min_components(&self.min, &other.min),
            max: math::max_components(&self.max, &other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_contains_point() {
        let aabb = AABB::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        );

        assert!(aabb.contains_point(Vec3::zeros()));
        assert!(aabb.contains_point(Vec3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_aabb_intersects() {
        let aabb1 = AABB::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        );

        let aabb2 = AABB::new(
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(3.0, 3.0, 3.0),
        );

        let aabb3 = AABB::new(
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(7.0, 7.0, 7.0),
        );

        assert!(aabb1.intersects(&aabb2));
        assert!(!aabb1.intersects(&aabb3));
        assert!(!aabb1.contains(&aabb2));
        assert!(aabb1.contains(&AABB::around_point(Vec3::new(1.0, 1.0, 1.0), 0.5)));
    }

    #[test]
    fn test_aabb_union() {
        let a = AABB::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = AABB::new(Vec3::new(4.0, -2.0, 0.5), Vec3::new(5.0, 0.0, 3.0));
        let merged = a.union(&b);

        assert_eq!(merged.min, Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(merged.max, Vec3::new(5.0, 1.0, 3.0));
        assert!(merged.contains(&a) && merged.contains(&b));
        assert_relative_eq!(merged.center().x, 2.5);
        assert_relative_eq!(merged.extents().z, 1.5);
    }

    #[test]
    fn test_global_box_contains_everything_reasonable() {
        let global = AABB::global();
        assert!(global.is_valid());
        assert!(global.contains(&AABB::around_point(Vec3::new(1.0e6, -1.0e6, 0.0), 10.0)));
    }
}
