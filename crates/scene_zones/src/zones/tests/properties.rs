//! Invariants that must hold after any sequence of zoning operations

use super::{row_of_rooms, TestScene};
use crate::foundation::math::Vec3;
use crate::scene::{ObjectId, AABB};
use crate::zones::{ZoneOwner, ZoneRange, ROOT_ZONE_ID};

fn active_ranges(scene: &TestScene) -> Vec<ZoneRange> {
    scene
        .manager
        .zone_spaces()
        .iter()
        .filter_map(|space| scene.manager.zone_range(*space))
        .collect()
}

fn assert_disjoint(ranges: &[ZoneRange]) {
    for (i, a) in ranges.iter().enumerate() {
        assert!(a.start >= 1, "range {} overlaps the root zone", a);
        for b in &ranges[i + 1..] {
            assert!(!a.overlaps(b), "ranges {} and {} overlap", a, b);
        }
    }
}

fn assert_membership_symmetric(scene: &TestScene, objects: &[ObjectId]) {
    for object in objects {
        assert_eq!(
            scene.manager.object_zones(*object).len() as u32,
            scene.manager.num_object_zones(*object)
        );
        for zone in scene.manager.object_zones(*object) {
            assert!(scene.manager.is_in_zone_list(*zone, *object));
        }
    }
    for zone in 0..scene.manager.num_zones() {
        for object in scene.manager.zone_objects(zone) {
            assert!(scene.manager.object_zones(*object).contains(&zone));
        }
    }
}

#[test]
fn test_ranges_stay_disjoint_through_churn() {
    let mut scene = TestScene::new();
    for id in 0..6 {
        scene.add_rooms(10 + id, row_of_rooms(id as f32 * 100.0, 1 + id % 3));
    }
    assert_disjoint(&active_ranges(&scene));
    scene.update();

    for id in [11, 13, 14] {
        scene.manager.unregister_object(ObjectId::new(id)).unwrap();
        assert_disjoint(&active_ranges(&scene));
    }
    scene.update();

    for id in 20..24 {
        scene.add_rooms(id, row_of_rooms(1000.0 + id as f32 * 100.0, 2));
        assert_disjoint(&active_ranges(&scene));
    }
    scene.update();

    scene.manager.compact_zones();
    let mut ranges = active_ranges(&scene);
    ranges.sort_by_key(|range| range.start);
    let mut next = 1;
    for range in &ranges {
        assert_eq!(range.start, next);
        next = range.end();
    }
    assert_eq!(next, scene.manager.num_zones());
    scene.manager.verify_state().unwrap();
}

#[test]
fn test_compaction_is_idempotent() {
    let mut scene = TestScene::new();
    scene.add_rooms(10, row_of_rooms(0.0, 4));
    scene.add_rooms(11, row_of_rooms(100.0, 2));
    scene.add_rooms(12, row_of_rooms(200.0, 3));
    let guard = scene.add_object(1, (215.0, 5.0, 5.0), 1.0);
    scene.update();

    scene.manager.unregister_object(ObjectId::new(10)).unwrap();
    scene.update();

    scene.manager.compact_zones();
    let ranges = active_ranges(&scene);
    let zones = scene.sorted_zones(guard);
    assert_eq!(ranges, vec![ZoneRange::new(1, 2), ZoneRange::new(3, 3)]);
    assert_eq!(zones, vec![4]);

    scene.manager.compact_zones();
    assert_eq!(active_ranges(&scene), ranges);
    assert_eq!(scene.sorted_zones(guard), zones);
    assert_eq!(scene.manager.num_zones(), scene.manager.num_active_zones());
    scene.manager.verify_state().unwrap();
}

#[test]
fn test_compaction_rewrites_memberships() {
    let mut scene = TestScene::new();
    scene.add_rooms(10, row_of_rooms(0.0, 3));
    scene.add_rooms(11, row_of_rooms(100.0, 2));
    let chair = scene.add_object(1, (105.0, 5.0, 5.0), 1.0);
    let table = scene.add_object(2, (110.0, 5.0, 5.0), 2.0);
    scene.update();
    assert_eq!(scene.sorted_zones(chair), vec![4]);
    assert_eq!(scene.sorted_zones(table), vec![ROOT_ZONE_ID, 4, 5]);

    scene.manager.unregister_object(ObjectId::new(10)).unwrap();
    scene.update();
    scene.manager.compact_zones();

    assert_eq!(scene.manager.zone_range(ObjectId::new(11)), Some(ZoneRange::new(1, 2)));
    assert_eq!(scene.sorted_zones(chair), vec![1]);
    assert_eq!(scene.sorted_zones(table), vec![ROOT_ZONE_ID, 1, 2]);
    assert!(scene.manager.is_in_zone_list(1, chair));
    assert_eq!(scene.manager.zone_owner(2), Some(ZoneOwner::Space(ObjectId::new(11))));
    scene.manager.verify_state().unwrap();
}

#[test]
fn test_membership_is_symmetric() {
    let mut scene = TestScene::new();
    scene.add_rooms(10, row_of_rooms(0.0, 4));
    scene.add_rooms(11, row_of_rooms(15.0, 2));

    let mut objects = Vec::new();
    for i in 0..20u32 {
        let x = -5.0 + i as f32 * 2.5;
        let y = if i % 2 == 0 { 5.0 } else { 12.0 };
        objects.push(scene.add_object(100 + i, (x, y, 5.0), 0.5 + (i % 4) as f32));
    }
    scene.update();
    assert_membership_symmetric(&scene, &objects);

    for (i, object) in objects.iter().enumerate().step_by(3) {
        let center = Vec3::new(40.0 - i as f32, 5.0, 5.0);
        scene
            .manager
            .move_object(*object, AABB::around_point(center, 1.0))
            .unwrap();
    }
    scene.update();
    assert_membership_symmetric(&scene, &objects);
}

#[test]
fn test_find_zone_never_returns_invalid_owner() {
    let mut scene = TestScene::new();
    assert_eq!(scene.manager.find_zone(Vec3::new(3.0, 3.0, 3.0)), (ZoneOwner::Root, ROOT_ZONE_ID));

    scene.add_rooms(10, row_of_rooms(0.0, 2));
    scene.update();

    let (owner, zone) = scene.manager.find_zone(Vec3::new(15.0, 5.0, 5.0));
    assert_eq!(owner, ZoneOwner::Space(ObjectId::new(10)));
    assert_eq!(zone, 2);
    assert_eq!(scene.manager.zone_owner(zone), Some(owner));

    for point in [Vec3::new(-50.0, 5.0, 5.0), Vec3::new(5.0, 50.0, 5.0), Vec3::new(1.0e4, 0.0, 0.0)] {
        let (owner, zone) = scene.manager.find_zone(point);
        assert_eq!((owner, zone), (ZoneOwner::Root, ROOT_ZONE_ID));
        assert!(scene.manager.is_valid_zone_id(zone));
    }
}

#[test]
fn test_find_zones_for_areas() {
    let mut scene = TestScene::new();
    scene.add_rooms(10, row_of_rooms(0.0, 2));
    scene.update();

    let inside = AABB::around_point(Vec3::new(5.0, 5.0, 5.0), 1.0);
    assert_eq!(scene.manager.find_zones(&inside), vec![1]);

    let straddling = AABB::around_point(Vec3::new(10.0, 5.0, 5.0), 1.0);
    assert_eq!(scene.manager.find_zones(&straddling), vec![1, 2, ROOT_ZONE_ID]);

    let far = AABB::around_point(Vec3::new(500.0, 5.0, 5.0), 1.0);
    assert_eq!(scene.manager.find_zones(&far), vec![ROOT_ZONE_ID]);
}

#[test]
fn test_insert_then_remove_restores_unzoned_state() {
    let mut scene = TestScene::new();
    scene.add_rooms(10, row_of_rooms(0.0, 2));
    let crate_box = scene.add_object(1, (5.0, 5.0, 5.0), 1.0);
    scene.update();
    assert_eq!(scene.manager.num_object_zones(crate_box), 1);

    scene.manager.unregister_object(crate_box).unwrap();
    assert_eq!(scene.manager.num_object_zones(crate_box), 0);
    assert!(scene.manager.object_zones(crate_box).is_empty());
    assert!(!scene.manager.is_in_zone_list(1, crate_box));
    assert!(!scene.manager.is_registered(crate_box));
    assert!(scene.room(10).occupant_zones(crate_box).is_none());
    scene.manager.verify_state().unwrap();
}
