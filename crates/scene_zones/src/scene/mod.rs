//! Scene-side collaborators of the zone manager
//!
//! The zone manager never owns scene objects. It sees them through:
//!
//! ```text
//! ObjectId        opaque identity assigned by the scene
//! SceneContainer  spatial index answering "what overlaps this box"
//! ObjectInfo      current world bounds and type flags of one object
//! ```
//!
//! `SimpleListContainer` is a linear implementation suitable for small
//! scenes and tests; `spatial::OctreeContainer` is the accelerated one.

mod bounds;
mod object;
mod container;

pub use bounds::AABB;
pub use object::{ObjectId, ObjectInfo, ObjectTypes};
pub use container::{SceneContainer, SimpleListContainer};
