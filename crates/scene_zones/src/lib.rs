//! # Scene Zones
//!
//! Zone membership management for 3D scenes. A scene is partitioned into
//! numbered zones owned by zone spaces (rooms, interiors, ...); the manager
//! tracks which objects occupy which zones and keeps that index consistent
//! as objects move and zone spaces are added, removed or reshaped.
//!
//! ## Features
//!
//! - **Compacting zone ID allocator**: contiguous ranges per zone space
//! - **Bidirectional membership index**: object → zones and zone → objects
//! - **Batched updates**: dirty tracking instead of eager rescans
//! - **Pluggable spatial index**: list or octree `SceneContainer`
//! - **Diagnostics**: full-state verification and zone dumps
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use scene_zones::prelude::*;
//!
//! let mut manager = ZoneSpaceManager::new(Box::new(SimpleListContainer::new()));
//!
//! let room: ZoneSpaceRef = Rc::new(RefCell::new(BoxZoneSpace::new(
//!     "room",
//!     vec![AABB::new(Vec3::zeros(), Vec3::new(10.0, 10.0, 10.0))],
//! )));
//! let room_id = ObjectId::new(1);
//! manager.register_zones(room_id, &room, 1).unwrap();
//!
//! let crate_id = ObjectId::new(2);
//! let bounds = AABB::around_point(Vec3::new(5.0, 5.0, 5.0), 0.5);
//! manager.register_object(crate_id, ObjectInfo::new(bounds, ObjectTypes::STATIC)).unwrap();
//!
//! manager.update_zoning_state();
//! assert_eq!(manager.object_zones(crate_id), &[1]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_possible_truncation)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod spatial;
pub mod zones;
pub mod events;

/// Common imports for users of the zone manager
pub mod prelude {
    pub use crate::{
        config::{Config, ZoningConfig},
        events::{ZoningEvent, ZoningEventHandler, ZoningEventType},
        foundation::math::Vec3,
        scene::{ObjectId, ObjectInfo, ObjectTypes, SceneContainer, SimpleListContainer, AABB},
        spatial::{OctreeConfig, OctreeContainer},
        zones::{
            BoxZoneSpace, ZoneId, ZoneOverlap, ZoneOwner, ZoneRange, ZoneSpace, ZoneSpaceManager,
            ZoneSpaceRef, ZoningError, ZoningResult, ROOT_ZONE_ID,
        },
    };
}
