//! Spatial partitioning data structures
//!
//! Provides an octree-backed `SceneContainer` for scenes too large for the
//! linear list container.

mod octree;
mod octree_container;

pub use octree::{Octree, OctreeNode, OctreeConfig, OctreeEntry};
pub use octree_container::OctreeContainer;
