//! Zone membership management
//!
//! Partitions a scene into numbered zones owned by zone spaces and tracks
//! which objects currently occupy which zones.
//!
//! ## Architecture
//!
//! ```text
//! scene mutations
//!      ↓
//! DirtyTracker (queued objects, queued zone spaces, dirty area)
//!      ↓  update_zoning_state()
//! Rezoning (spatial queries against the SceneContainer)
//!      ↓
//! MembershipTable (object → zones) + ZoneObjectList (zone → objects)
//!      ↓
//! ZoningEvent::ZoningChanged
//! ```
//!
//! Zone `0` always belongs to the root (outdoor) zone. Every other zone ID
//! belongs to exactly one registered zone space, which holds a contiguous
//! range of IDs. Ranges are compacted when fewer than half of the allocated
//! IDs are still in use.

mod error;
mod zone_space;
mod box_space;
mod membership;
mod zone_list;
mod dirty;
mod connectivity;
mod manager;

#[cfg(test)]
mod tests;

pub use error::{ZoningError, ZoningResult};
pub use zone_space::{ZoneSpace, ZoneSpaceRef, ZoneOverlap};
pub use box_space::BoxZoneSpace;
pub use membership::MembershipTable;
pub use zone_list::{ZoneObjectList, ZoneListPool};
pub use dirty::DirtyTracker;
pub use connectivity::ZoneConnectivity;
pub use manager::ZoneSpaceManager;

use crate::scene::ObjectId;

/// Global zone identifier
pub type ZoneId = u32;

/// The permanent root (outdoor) zone
pub const ROOT_ZONE_ID: ZoneId = 0;

/// Owner of a zone ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneOwner {
    /// The root (outdoor) zone, owned by the manager itself
    Root,
    /// A registered zone space
    Space(ObjectId),
}

impl std::fmt::Display for ZoneOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Space(object) => write!(f, "space {}", object),
        }
    }
}

/// Half-open range `[start, start + count)` of zone IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneRange {
    /// First zone ID in the range
    pub start: ZoneId,
    /// Number of zones
    pub count: u32,
}

impl ZoneRange {
    /// Create a range
    pub const fn new(start: ZoneId, count: u32) -> Self {
        Self { start, count }
    }

    /// One past the last zone ID
    pub const fn end(&self) -> ZoneId {
        self.start + self.count
    }

    /// Check if the range holds `zone`
    pub const fn contains(&self, zone: ZoneId) -> bool {
        zone >= self.start && zone < self.end()
    }

    /// Check if two ranges share any zone ID
    pub const fn overlaps(&self, other: &ZoneRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Iterate the zone IDs in the range
    pub fn ids(&self) -> std::ops::Range<ZoneId> {
        self.start..self.end()
    }

    /// Global zone ID for a zone index local to the owning space
    pub const fn global(&self, local: u32) -> ZoneId {
        self.start + local
    }
}

impl std::fmt::Display for ZoneRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// Range permanently held by the root zone
pub const ROOT_ZONE_RANGE: ZoneRange = ZoneRange::new(ROOT_ZONE_ID, 1);
