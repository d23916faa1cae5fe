//! Zone space adjacency
//!
//! Links between zone spaces (portals, shared walls) kept as an
//! index-based adjacency map instead of intrusive lists. Links are
//! symmetric; disconnecting a space clears its own set and removes it
//! from each neighbor's set.

use std::collections::{BTreeSet, HashMap};

use crate::scene::ObjectId;

/// Symmetric adjacency between zone spaces
#[derive(Debug, Default)]
pub struct ZoneConnectivity {
    links: HashMap<ObjectId, BTreeSet<ObjectId>>,
}

impl ZoneConnectivity {
    /// Create an empty adjacency map
    pub fn new() -> Self {
        Self::default()
    }

    /// Link two spaces; returns false if they were already linked
    pub fn connect(&mut self, a: ObjectId, b: ObjectId) -> bool {
        if a == b {
            return false;
        }
        let added = self.links.entry(a).or_default().insert(b);
        self.links.entry(b).or_default().insert(a);
        added
    }

    /// Drop every link touching `space`, returning its former neighbors
    pub fn disconnect_all(&mut self, space: ObjectId) -> Vec<ObjectId> {
        let Some(neighbors) = self.links.remove(&space) else {
            return Vec::new();
        };
        for neighbor in &neighbors {
            if let Some(set) = self.links.get_mut(neighbor) {
                set.remove(&space);
                if set.is_empty() {
                    self.links.remove(neighbor);
                }
            }
        }
        neighbors.into_iter().collect()
    }

    /// Spaces linked to `space`, in ascending ID order
    pub fn neighbors(&self, space: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        self.links.get(&space).into_iter().flatten().copied()
    }

    /// Check whether two spaces are linked
    pub fn is_connected(&self, a: ObjectId, b: ObjectId) -> bool {
        self.links.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Every space that has at least one link
    pub fn spaces(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.links.keys().copied()
    }
}
