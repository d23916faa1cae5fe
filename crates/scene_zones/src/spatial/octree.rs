//! Octree spatial partitioning structure
//!
//! Divides 3D space into hierarchical regions for fast box queries. Each
//! node subdivides into 8 octants when its entry count exceeds a threshold.
//! Entries are routed by the center of their bounds; queries expand node
//! bounds by the largest entry half-diagonal so boxes that straddle octant
//! borders are still found.

use crate::foundation::math::{self, Vec3};
use crate::scene::{ObjectId, ObjectInfo, ObjectTypes, AABB};

/// Configuration for octree behavior
#[derive(Debug, Clone)]
pub struct OctreeConfig {
    /// Maximum entries per node before subdivision
    pub max_entries_per_node: usize,

    /// Maximum subdivision depth
    pub max_depth: u32,

    /// Minimum node size (prevents excessive subdivision)
    pub min_node_size: f32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_entries_per_node: 8,
            max_depth: 8,
            min_node_size: 1.0,
        }
    }
}

/// Object stored in the octree
#[derive(Debug, Clone, Copy)]
pub struct OctreeEntry {
    /// Scene object
    pub id: ObjectId,
    /// Bounds and flags at insertion time
    pub info: ObjectInfo,
}

impl OctreeEntry {
    fn center(&self) -> Vec3 {
        self.info.world_box.center()
    }

    fn radius(&self) -> f32 {
        self.info.world_box.extents().magnitude()
    }
}

/// Single node in the octree hierarchy
#[derive(Debug, Clone)]
pub struct OctreeNode {
    /// World-space bounds of this node
    pub bounds: AABB,

    /// Entries contained in this node
    pub entries: Vec<OctreeEntry>,

    /// Child nodes (8 octants), None if this is a leaf
    pub children: Option<Box<[OctreeNode; 8]>>,

    /// Depth in the tree (0 = root)
    pub depth: u32,
}

impl OctreeNode {
    /// Create a new leaf node
    pub fn new(bounds: AABB, depth: u32) -> Self {
        Self {
            bounds,
            entries: Vec::new(),
            children: None,
            depth,
        }
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Octant index (0-7) for a position within this node's bounds
    ///
    /// Bit 0 is +X, bit 1 is +Y, bit 2 is +Z.
    fn octant_index(&self, position: Vec3) -> usize {
        let center = self.bounds.center();
        let x_bit = usize::from(position.x >= center.x);
        let y_bit = usize::from(position.y >= center.y);
        let z_bit = usize::from(position.z >= center.z);
        (z_bit << 2) | (y_bit << 1) | x_bit
    }

    /// Subdivide this node into 8 children
    fn subdivide(&mut self) {
        if self.children.is_some() {
            return;
        }

        let center = self.bounds.center();
        let quarter_extents = self.bounds.extents() * 0.5;
        let depth = self.depth + 1;

        let children: [OctreeNode; 8] = std::array::from_fn(|octant| {
            let x_sign = if octant & 1 != 0 { 1.0 } else { -1.0 };
            let y_sign = if octant & 2 != 0 { 1.0 } else { -1.0 };
            let z_sign = if octant & 4 != 0 { 1.0 } else { -1.0 };

            let child_center = Vec3::new(
                center.x + quarter_extents.x * x_sign,
                center.y + quarter_extents.y * y_sign,
                center.z + quarter_extents.z * z_sign,
            );

            OctreeNode::new(AABB::from_center_extents(child_center, quarter_extents), depth)
        });
        self.children = Some(Box::new(children));

        // Redistribute existing entries to children
        let entries = std::mem::take(&mut self.entries);
        for entry in entries {
            let octant = self.octant_index(entry.center());
            if let Some(children) = self.children.as_mut() {
                children[octant].entries.push(entry);
            }
        }
    }

    /// Insert an entry into this node; false if its center is outside
    pub fn insert(&mut self, entry: OctreeEntry, config: &OctreeConfig) -> bool {
        if !self.bounds.contains_point(entry.center()) {
            return false;
        }

        if self.is_leaf() {
            let should_subdivide = self.entries.len() >= config.max_entries_per_node
                && self.depth < config.max_depth
                && self.bounds.extents().x > config.min_node_size;

            if !should_subdivide {
                self.entries.push(entry);
                return true;
            }

            self.subdivide();
        }

        let octant = self.octant_index(entry.center());
        match self.children.as_mut() {
            Some(children) => children[octant].insert(entry, config),
            None => false,
        }
    }

    /// Remove an entry from this node or its children
    pub fn remove(&mut self, id: ObjectId) -> Option<OctreeEntry> {
        if let Some(index) = self.entries.iter().position(|e| e.id == id) {
            return Some(self.entries.remove(index));
        }

        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if let Some(entry) = child.remove(id) {
                    return Some(entry);
                }
            }
        }

        None
    }

    /// Collect entries overlapping `area` that match `filter`
    ///
    /// `max_radius` is the largest entry half-diagonal in the tree.
    pub fn query_box(&self, area: &AABB, filter: ObjectTypes, max_radius: f32, results: &mut Vec<ObjectId>) {
        let expanded = AABB::new(
            self.bounds.min - math::splat(max_radius),
            self.bounds.max + math::splat(max_radius),
        );
        if !expanded.intersects(area) {
            return;
        }

        for entry in &self.entries {
            if entry.info.types.matches_filter(filter) && entry.info.world_box.intersects(area) {
                results.push(entry.id);
            }
        }

        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.query_box(area, filter, max_radius, results);
            }
        }
    }

    /// Count total entries in this node and all children
    pub fn count_entries(&self) -> usize {
        let mut count = self.entries.len();

        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                count += child.count_entries();
            }
        }

        count
    }
}

/// Octree spatial partitioning structure
#[derive(Debug, Clone)]
pub struct Octree {
    /// Root node containing the entire world space
    pub root: OctreeNode,

    /// Configuration
    config: OctreeConfig,

    /// Largest entry half-diagonal seen since the last clear
    max_entry_radius: f32,
}

impl Octree {
    /// Create a new octree with given world bounds
    pub fn new(world_bounds: AABB, config: OctreeConfig) -> Self {
        Self {
            root: OctreeNode::new(world_bounds, 0),
            config,
            max_entry_radius: 0.0,
        }
    }

    /// Bounds of the root node
    pub fn bounds(&self) -> &AABB {
        &self.root.bounds
    }

    /// Insert an entry; false if its center lies outside the root bounds
    pub fn insert(&mut self, id: ObjectId, info: ObjectInfo) -> bool {
        let entry = OctreeEntry { id, info };
        let inserted = self.root.insert(entry, &self.config);
        if inserted {
            self.max_entry_radius = self.max_entry_radius.max(entry.radius());
        }
        inserted
    }

    /// Remove an entry from the octree
    pub fn remove(&mut self, id: ObjectId) -> Option<OctreeEntry> {
        self.root.remove(id)
    }

    /// Append every entry overlapping `area` and matching `filter`
    pub fn query_box(&self, area: &AABB, filter: ObjectTypes, results: &mut Vec<ObjectId>) {
        self.root.query_box(area, filter, self.max_entry_radius, results);
    }

    /// Get total entry count
    pub fn entry_count(&self) -> usize {
        self.root.count_entries()
    }

    /// Clear the octree
    pub fn clear(&mut self) {
        self.root = OctreeNode::new(self.root.bounds, 0);
        self.max_entry_radius = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_at(x: f32, half: f32) -> ObjectInfo {
        ObjectInfo::new(AABB::around_point(Vec3::new(x, 0.0, 0.0), half), ObjectTypes::DYNAMIC)
    }

    fn world() -> AABB {
        AABB::new(Vec3::new(-100.0, -100.0, -100.0), Vec3::new(100.0, 100.0, 100.0))
    }

    #[test]
    fn test_octree_basic_insertion() {
        let mut octree = Octree::new(world(), OctreeConfig::default());

        assert!(octree.insert(ObjectId::new(1), info_at(0.0, 1.0)));
        assert!(!octree.insert(ObjectId::new(2), info_at(500.0, 1.0)));
        assert_eq!(octree.entry_count(), 1);
    }

    #[test]
    fn test_octree_subdivision() {
        let config = OctreeConfig {
            max_entries_per_node: 4,
            max_depth: 3,
            min_node_size: 1.0,
        };
        let mut octree = Octree::new(world(), config);

        for i in 0..10 {
            octree.insert(ObjectId::new(i), info_at(0.0, 1.0));
        }

        assert_eq!(octree.entry_count(), 10);
        assert!(octree.root.children.is_some());
    }

    #[test]
    fn test_octree_box_query_finds_straddling_entries() {
        let config = OctreeConfig {
            max_entries_per_node: 1,
            max_depth: 4,
            min_node_size: 1.0,
        };
        let mut octree = Octree::new(world(), config);

        // Center on the -X side but reaching well across the split plane
        octree.insert(ObjectId::new(1), info_at(-2.0, 10.0));
        octree.insert(ObjectId::new(2), info_at(50.0, 1.0));
        octree.insert(ObjectId::new(3), info_at(-60.0, 1.0));

        let mut results = Vec::new();
        octree.query_box(&AABB::around_point(Vec3::new(6.0, 0.0, 0.0), 1.0), ObjectTypes::all(), &mut results);
        assert_eq!(results, vec![ObjectId::new(1)]);
    }

    #[test]
    fn test_octree_remove() {
        let mut octree = Octree::new(world(), OctreeConfig::default());
        octree.insert(ObjectId::new(7), info_at(3.0, 1.0));

        assert!(octree.remove(ObjectId::new(7)).is_some());
        assert!(octree.remove(ObjectId::new(7)).is_none());
        assert_eq!(octree.entry_count(), 0);
    }
}
