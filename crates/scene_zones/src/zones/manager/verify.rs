//! Full consistency check of the zoning state

use super::{ObjectKind, ZoneSpaceManager};
use crate::scene::ObjectId;
use crate::zones::{ZoneOwner, ZoneRange, ZoningError, ZoningResult, ROOT_ZONE_ID, ROOT_ZONE_RANGE};

fn corrupt(message: String) -> ZoningError {
    ZoningError::Corrupt(message)
}

impl ZoneSpaceManager {
    /// Cross-check every zoning invariant
    ///
    /// Meant for diagnostics and tests; walks all zones and objects.
    pub fn verify_state(&self) -> ZoningResult<()> {
        self.verify_counts()?;
        let ranges = self.verify_zone_spaces()?;
        self.verify_ranges(ranges)?;
        self.verify_zone_lists()?;
        self.verify_objects()?;
        self.verify_connectivity()
    }

    fn verify_counts(&self) -> ZoningResult<()> {
        if self.zone_spaces.len() as u32 > self.num_active {
            return Err(corrupt(format!(
                "{} zone spaces but only {} active zones",
                self.zone_spaces.len(),
                self.num_active
            )));
        }
        if self.num_total_allocated < self.num_active {
            return Err(corrupt(format!(
                "{} allocated zones is fewer than {} active",
                self.num_total_allocated, self.num_active
            )));
        }
        if self.zone_lists.len() != self.num_total_allocated as usize {
            return Err(corrupt(format!(
                "{} zone lists for {} allocated zones",
                self.zone_lists.len(),
                self.num_total_allocated
            )));
        }
        match self.zone_owner(ROOT_ZONE_ID) {
            Some(ZoneOwner::Root) => Ok(()),
            other => Err(corrupt(format!("root zone list owned by {:?}", other))),
        }
    }

    /// Check each zone space and its zone lists; returns the active ranges
    fn verify_zone_spaces(&self) -> ZoningResult<Vec<(ObjectId, ZoneRange)>> {
        let mut ranges = Vec::with_capacity(self.zone_spaces.len());

        for object in &self.zone_spaces {
            let record = self.objects.get(object).ok_or(ZoningError::NotRegistered(*object))?;
            let ObjectKind::ZoneSpace(space) = &record.kind else {
                return Err(ZoningError::NotAZoneSpace(*object));
            };
            if space.space.upgrade().is_none() {
                return Err(ZoningError::ZoneSpaceDropped(*object));
            }

            let range = space.range;
            if range.count == 0 || range.start < ROOT_ZONE_RANGE.end() || range.end() > self.num_total_allocated {
                return Err(corrupt(format!("zone space {} holds invalid range {}", object, range)));
            }

            for zone in range.ids() {
                let list = self.zone_list(zone).ok_or(ZoningError::InvalidZone(zone))?;
                if list.owner() != Some(ZoneOwner::Space(*object)) {
                    return Err(corrupt(format!(
                        "zone {} list refers to {:?} instead of {}",
                        zone,
                        list.owner(),
                        object
                    )));
                }
            }

            ranges.push((*object, range));
        }

        Ok(ranges)
    }

    fn verify_ranges(&self, mut ranges: Vec<(ObjectId, ZoneRange)>) -> ZoningResult<()> {
        let active: u32 = ROOT_ZONE_RANGE.count + ranges.iter().map(|(_, range)| range.count).sum::<u32>();
        if active != self.num_active {
            return Err(corrupt(format!(
                "zone spaces hold {} zones but {} are counted active",
                active, self.num_active
            )));
        }

        ranges.sort_by_key(|(_, range)| range.start);
        for pair in ranges.windows(2) {
            let ((a, range_a), (b, range_b)) = (pair[0], pair[1]);
            if range_a.overlaps(&range_b) {
                return Err(corrupt(format!(
                    "ranges of {} {} and {} {} overlap",
                    a, range_a, b, range_b
                )));
            }
        }

        // Without holes the ranges must tile the whole ID space
        if self.num_total_allocated == self.num_active {
            let mut next = ROOT_ZONE_RANGE.end();
            for (object, range) in &ranges {
                if range.start != next {
                    return Err(corrupt(format!("range {} of {} leaves a gap at {}", range, object, next)));
                }
                next = range.end();
            }
        }

        Ok(())
    }

    /// Every object in a zone list holds that zone in its membership entry
    fn verify_zone_lists(&self) -> ZoningResult<()> {
        let live_lists = self.zone_lists.iter().filter(|list| list.is_some()).count();
        if live_lists != self.num_active as usize {
            return Err(corrupt(format!(
                "{} live zone lists for {} active zones",
                live_lists, self.num_active
            )));
        }

        for (zone, list) in self.zone_lists.iter().enumerate() {
            let Some(list) = list else {
                continue;
            };
            let zone = zone as u32;

            for object in list.objects() {
                let handle = self
                    .objects
                    .get(object)
                    .ok_or(ZoningError::NotRegistered(*object))?
                    .zone_list;
                let holds_zone = handle.is_some_and(|handle| self.membership.contains(handle, zone));
                if !holds_zone {
                    return Err(corrupt(format!("{} is in zone {} list but not in its membership", object, zone)));
                }
            }
        }

        Ok(())
    }

    /// Every membership entry matches the zone lists and the zone count
    fn verify_objects(&self) -> ZoningResult<()> {
        let mut live_handles = 0;

        for (object, record) in &self.objects {
            match record.zone_list {
                None if record.num_zones != 0 => {
                    return Err(corrupt(format!("{} counts {} zones without an entry", object, record.num_zones)));
                }
                None => {}
                Some(handle) => {
                    live_handles += 1;
                    let zones = self.membership.values(handle);

                    if zones.len() != record.num_zones as usize || zones.is_empty() {
                        return Err(corrupt(format!(
                            "{} counts {} zones but its entry holds {}",
                            object,
                            record.num_zones,
                            zones.len()
                        )));
                    }
                    if zones.len() > self.membership.capacity() {
                        return Err(corrupt(format!("{} exceeds the per-object zone capacity", object)));
                    }

                    for zone in zones {
                        if !self.is_in_zone_list(*zone, *object) {
                            return Err(corrupt(format!("{} holds zone {} but is not in its list", object, zone)));
                        }
                        if let ObjectKind::ZoneSpace(space) = &record.kind {
                            if space.range.contains(*zone) {
                                return Err(corrupt(format!("zone space {} is a member of its own zone {}", object, zone)));
                            }
                        }
                    }
                }
            }
        }

        if live_handles != self.membership.len() {
            return Err(corrupt(format!(
                "{} membership entries but {} objects hold one",
                self.membership.len(),
                live_handles
            )));
        }

        Ok(())
    }

    fn verify_connectivity(&self) -> ZoningResult<()> {
        for space in self.connectivity.spaces() {
            if !self.is_zone_space(space) {
                return Err(corrupt(format!("{} has zone links but is not a zone space", space)));
            }
            for neighbor in self.connectivity.neighbors(space) {
                if !self.is_zone_space(neighbor) {
                    return Err(corrupt(format!("{} is linked to {}, which is not a zone space", space, neighbor)));
                }
            }
        }
        Ok(())
    }
}
