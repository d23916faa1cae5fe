//! Zone space trait
//!
//! A zone space is a scene object that defines one or more zones (rooms,
//! interiors, ...). It answers containment questions about its own zones
//! and is told when objects enter or leave them. All zone indices crossing
//! this trait are local to the space (`0..num_zones`); the manager maps
//! them onto global IDs with the space's current range.

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::collections::ZoneIdList;
use crate::foundation::math::Vec3;
use crate::scene::{ObjectId, AABB};

/// Shared handle the scene keeps for each zone space
///
/// The manager stores only `Weak` references derived from it.
pub type ZoneSpaceRef = Rc<RefCell<dyn ZoneSpace>>;

/// Result of an overlap test against a zone space
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneOverlap {
    /// Local indices of the overlapped zones
    pub zones: ZoneIdList,
    /// True if the tested volume also extends outside the space's zones
    pub outside: bool,
}

impl ZoneOverlap {
    /// Overlap result with the given zones
    pub fn new(zones: impl IntoIterator<Item = u32>, outside: bool) -> Self {
        Self {
            zones: zones.into_iter().collect(),
            outside,
        }
    }

    /// Volume touches no zone of the space at all
    pub fn outside_only() -> Self {
        Self::new(std::iter::empty(), true)
    }
}

/// Trait implemented by every zone-owning scene object
pub trait ZoneSpace {
    /// World-space bounds of the whole space
    fn world_box(&self) -> AABB;

    /// Local zone containing `point`, if any
    fn point_zone(&self, point: Vec3) -> Option<u32>;

    /// Local zones overlapped by `area` and whether `area` leaks outside
    fn overlapping_zones(&self, area: &AABB) -> ZoneOverlap;

    /// Local zones overlapped by a specific object
    ///
    /// Spaces with better knowledge of object shapes can override this;
    /// the default tests the object's world box.
    fn overlapping_object_zones(&self, _object: ObjectId, world_box: &AABB) -> ZoneOverlap {
        self.overlapping_zones(world_box)
    }

    /// An object was added to the given local zones of this space
    fn on_object_added(&mut self, _object: ObjectId, _zones: &[u32]) {}

    /// An object left the zones of this space
    fn on_object_removed(&mut self, _object: ObjectId) {}

    /// All connections to other zone spaces were dropped
    fn on_disconnected(&mut self) {}

    /// Human-readable description of the space's internal zoning state
    fn dump_zone_state(&self) -> String {
        String::new()
    }
}
