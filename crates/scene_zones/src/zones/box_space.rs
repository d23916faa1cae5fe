//! Zone space made of axis-aligned boxes
//!
//! Each zone is one box. An object counts as "outside" unless a single zone
//! box fully encloses it, which is how rooms without shared portals behave.

use crate::foundation::math::Vec3;
use crate::scene::{ObjectId, AABB};
use crate::zones::{ZoneOverlap, ZoneSpace};

/// Zone space whose zones are axis-aligned boxes
#[derive(Debug, Clone)]
pub struct BoxZoneSpace {
    name: String,
    zones: Vec<AABB>,
    /// Objects currently inside, with the local zones they occupy
    occupants: Vec<(ObjectId, Vec<u32>)>,
    disconnect_count: u32,
}

impl BoxZoneSpace {
    /// Create a space from one box per zone
    pub fn new(name: impl Into<String>, zones: Vec<AABB>) -> Self {
        Self {
            name: name.into(),
            zones,
            occupants: Vec::new(),
            disconnect_count: 0,
        }
    }

    /// Space name, used in dumps
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of zones (boxes) this space defines
    pub fn num_zones(&self) -> u32 {
        self.zones.len() as u32
    }

    /// Box of a local zone
    pub fn zone_box(&self, zone: u32) -> Option<&AABB> {
        self.zones.get(zone as usize)
    }

    /// Reshape one zone; the caller must notify the manager afterwards
    pub fn set_zone_box(&mut self, zone: u32, bounds: AABB) {
        if let Some(slot) = self.zones.get_mut(zone as usize) {
            *slot = bounds;
        }
    }

    /// Objects currently inside this space
    pub fn occupants(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.occupants.iter().map(|(object, _)| *object)
    }

    /// Local zones an object was last added to
    pub fn occupant_zones(&self, object: ObjectId) -> Option<&[u32]> {
        self.occupants
            .iter()
            .find(|(o, _)| *o == object)
            .map(|(_, zones)| zones.as_slice())
    }

    /// How many times the manager dropped this space's connections
    pub fn disconnect_count(&self) -> u32 {
        self.disconnect_count
    }
}

impl ZoneSpace for BoxZoneSpace {
    fn world_box(&self) -> AABB {
        let mut zones = self.zones.iter();
        match zones.next() {
            Some(first) => zones.fold(*first, |acc, zone| acc.union(zone)),
            None => AABB::around_point(Vec3::zeros(), 0.0),
        }
    }

    fn point_zone(&self, point: Vec3) -> Option<u32> {
        self.zones
            .iter()
            .position(|zone| zone.contains_point(point))
            .map(|index| index as u32)
    }

    fn overlapping_zones(&self, area: &AABB) -> ZoneOverlap {
        let zones = self
            .zones
            .iter()
            .enumerate()
            .filter(|(_, zone)| zone.intersects(area))
            .map(|(index, _)| index as u32);
        let enclosed = self.zones.iter().any(|zone| zone.contains(area));

        ZoneOverlap::new(zones, !enclosed)
    }

    fn on_object_added(&mut self, object: ObjectId, zones: &[u32]) {
        match self.occupants.iter_mut().find(|(o, _)| *o == object) {
            Some(entry) => entry.1 = zones.to_vec(),
            None => self.occupants.push((object, zones.to_vec())),
        }
    }

    fn on_object_removed(&mut self, object: ObjectId) {
        self.occupants.retain(|(o, _)| *o != object);
    }

    fn on_disconnected(&mut self) {
        self.disconnect_count += 1;
    }

    fn dump_zone_state(&self) -> String {
        let mut out = format!("{}: {} zone(s), {} occupant(s)", self.name, self.zones.len(), self.occupants.len());
        for (object, zones) in &self.occupants {
            out.push_str(&format!("\n    {} in {:?}", object, zones));
        }
        out
    }
}
