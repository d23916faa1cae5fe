//! Scene object identity and type flags

use bitflags::bitflags;

use crate::scene::AABB;

/// Identifier of a scene object, assigned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Wrap a raw scene identifier
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw identifier
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Type flags carried by scene objects; also used as query filters
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectTypes: u32 {
        /// Plain object with no special zoning behavior
        const STATIC = 1 << 0;
        /// Moving object
        const DYNAMIC = 1 << 1;
        /// Object that defines zones of its own
        const ZONE_SPACE = 1 << 2;
        /// Object that must only ever live in the outdoor zone (sky, terrain, ...)
        const OUTDOOR_ONLY = 1 << 3;
        /// Object whose bounds span the whole world
        const GLOBAL_BOUNDS = 1 << 4;
    }
}

impl ObjectTypes {
    /// Objects that are always assigned to the outdoor zone only
    pub fn is_outdoor_restricted(self) -> bool {
        self.intersects(Self::OUTDOOR_ONLY | Self::GLOBAL_BOUNDS)
    }
}

/// Current spatial state of an object as known by the scene container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectInfo {
    /// World-space bounds
    pub world_box: AABB,
    /// Type flags
    pub types: ObjectTypes,
}

impl ObjectInfo {
    /// Create object info
    pub fn new(world_box: AABB, types: ObjectTypes) -> Self {
        Self { world_box, types }
    }
}

impl ObjectTypes {
    /// Check an object's flags against a query filter; `ObjectTypes::all()`
    /// matches every object, including ones without any flag set
    pub fn matches_filter(self, filter: ObjectTypes) -> bool {
        filter.is_all() || self.intersects(filter)
    }
}
