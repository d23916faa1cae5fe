//! Zone membership demo
//!
//! Builds a small house (two multi-room zone spaces joined by a corridor),
//! walks a handful of objects through it and logs how their zones change.
//! Pass a `.toml` or `.ron` file to override the demo settings.

use std::cell::RefCell;
use std::rc::Rc;

use scene_zones::config::ConfigError;
use scene_zones::foundation::logging;
use scene_zones::prelude::*;
use serde::{Deserialize, Serialize};

// House layout: rooms are 10 units wide along +X
const ROOM_SIZE: f32 = 10.0;
const WEST_WING_ROOMS: u32 = 3;
const EAST_WING_ROOMS: u32 = 2;
const EAST_WING_OFFSET: f32 = 50.0;

/// Demo errors
#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("zoning error: {0}")]
    Zoning(#[from] ZoningError),
}

/// Demo settings, loadable from TOML or RON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct DemoConfig {
    /// Zone manager tuning
    zoning: ZoningConfig,
    /// Number of objects walking through the house
    walkers: u32,
    /// Simulation steps
    steps: u32,
    /// Distance a walker moves per step
    step_size: f32,
    /// Use the octree container instead of the linear list
    use_octree: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            zoning: ZoningConfig::default().with_verification(true),
            walkers: 4,
            steps: 12,
            step_size: 6.0,
            use_octree: true,
        }
    }
}

impl Config for DemoConfig {}

fn wing(name: &str, origin_x: f32, rooms: u32) -> BoxZoneSpace {
    let zones = (0..rooms)
        .map(|i| {
            let min = Vec3::new(origin_x + i as f32 * ROOM_SIZE, 0.0, 0.0);
            AABB::new(min, min + Vec3::new(ROOM_SIZE, ROOM_SIZE, ROOM_SIZE))
        })
        .collect();
    BoxZoneSpace::new(name, zones)
}

fn build_container(config: &DemoConfig) -> Box<dyn SceneContainer> {
    if config.use_octree {
        let bounds = AABB::around_point(Vec3::zeros(), 200.0);
        Box::new(OctreeContainer::new(bounds, OctreeConfig::default()))
    } else {
        Box::new(SimpleListContainer::new())
    }
}

fn run(config: &DemoConfig) -> Result<(), DemoError> {
    let mut manager = ZoneSpaceManager::with_config(build_container(config), config.zoning.clone())?;

    manager.on_zoning_changed(|event| {
        if let ZoningEvent::ZoningChanged { active_zones, .. } = event {
            log::info!("zoning changed, {} active zones", active_zones);
        }
        false
    });

    let west_id = ObjectId::new(1);
    let east_id = ObjectId::new(2);
    let west: ZoneSpaceRef = Rc::new(RefCell::new(wing("west wing", 0.0, WEST_WING_ROOMS)));
    let east: ZoneSpaceRef = Rc::new(RefCell::new(wing("east wing", EAST_WING_OFFSET, EAST_WING_ROOMS)));

    let west_range = manager.register_zones(west_id, &west, WEST_WING_ROOMS)?;
    let east_range = manager.register_zones(east_id, &east, EAST_WING_ROOMS)?;
    manager.connect_zone_spaces(west_id, east_id)?;
    log::info!("west wing holds zones {}, east wing holds zones {}", west_range, east_range);

    let sky = ObjectId::new(10);
    manager.register_object(sky, ObjectInfo::new(AABB::global(), ObjectTypes::GLOBAL_BOUNDS))?;

    let walkers: Vec<ObjectId> = (0..config.walkers).map(|i| ObjectId::new(100 + i)).collect();
    for (i, walker) in walkers.iter().enumerate() {
        let start = Vec3::new(5.0 + i as f32 * 2.0, 5.0, 5.0);
        manager.register_object(*walker, ObjectInfo::new(AABB::around_point(start, 0.5), ObjectTypes::DYNAMIC))?;
    }
    manager.update_zoning_state();

    for step in 1..=config.steps {
        for (i, walker) in walkers.iter().enumerate() {
            let x = 5.0 + i as f32 * 2.0 + step as f32 * config.step_size;
            manager.move_object(*walker, AABB::around_point(Vec3::new(x, 5.0, 5.0), 0.5))?;
        }
        manager.update_zoning_state();

        for walker in &walkers {
            let center = manager
                .container()
                .object_info(*walker)
                .map_or_else(Vec3::zeros, |info| info.world_box.center());
            let (owner, zone) = manager.find_zone(center);
            log::debug!(
                "step {}: walker {} in zones {:?} (center in zone {} of {})",
                step,
                walker,
                manager.object_zones(*walker),
                zone,
                owner
            );
        }
    }

    // Walkers left in the east wing fall back to the root zone
    manager.unregister_zones(east_id)?;
    manager.update_zoning_state();

    manager.verify_state()?;
    let dump = manager.dump_zone_states(false);
    println!("{}", dump);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load_from_file(&path)?,
        None => DemoConfig::default(),
    };
    logging::init_with_level(&config.zoning.log_level);

    log::info!("Starting zone demo with {:?}", config);
    run(&config)?;
    Ok(())
}
