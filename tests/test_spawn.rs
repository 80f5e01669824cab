use quibble::bitmap::Sprites;
use quibble::collision::wall_hit;
use quibble::config::{GAME_CEILING, MAX_CHEESE, SCREEN_H, SCREEN_W};
use quibble::entity::{Body, Coord, EntityKind};
use quibble::rng::Rng;
use quibble::spawn::*;
use quibble::World;

fn room_one(seed: u32) -> (World, Rng) {
    let mut rng = Rng::new(seed);
    let mut world = World::new(Sprites::prepare());
    world.reset_session(&mut rng);
    (world, rng)
}

fn assert_clear(world: &World, kind: EntityKind, placed: &Body) {
    let r = placed.bounds();
    assert!(r.left >= 0 && r.right < SCREEN_W);
    assert!(r.top >= GAME_CEILING && r.bottom < SCREEN_H);
    for (other, b) in world.bodies() {
        if other == kind && std::ptr::eq(b, placed) {
            continue;
        }
        assert!(!b.bounds().overlaps(&r), "{:?} overlaps {:?}", kind, other);
    }
    for y in r.top..=r.bottom {
        for x in r.left..=r.right {
            assert!(!wall_hit(&world.walls, x, y), "{:?} on a wall at ({}, {})", kind, x, y);
        }
    }
}

// ── placement ─────────────────────────────────────────────────────────────────

#[test]
fn placements_avoid_everything() {
    for seed in 1..50 {
        let (mut world, mut rng) = room_one(seed);
        for t in (0..40).step_by(2) {
            run_spawners(&mut world, &mut rng, t);
        }
        for i in 0..MAX_CHEESE {
            if world.cheese[i].active {
                assert_clear(&world, EntityKind::Cheese, &world.cheese[i]);
            }
        }
        for i in 0..world.traps.len() {
            if world.traps[i].active {
                assert_clear(&world, EntityKind::Trap, &world.traps[i]);
            }
        }
        assert_clear(&world, EntityKind::Milk, &world.milk);
    }
}

#[test]
fn search_gives_up_when_nothing_is_free() {
    let (mut world, mut rng) = room_one(1);
    // stretch the runner over the whole playfield
    world.jerry.mobile.body.pos = Coord::new(0.0, GAME_CEILING as f32);
    world.jerry.mobile.body.width = SCREEN_W;
    world.jerry.mobile.body.height = SCREEN_H - GAME_CEILING;

    assert_eq!(find_clear(&world, &mut rng, 3, 3), None);
    assert!(!process_cheese(&mut world, &mut rng, 10));
    assert_eq!(world.timers.cheese, 0);
    assert_eq!(world.active_cheese(), 0);
}

// ── cadences ──────────────────────────────────────────────────────────────────

#[test]
fn cheese_every_two_seconds() {
    let (mut world, mut rng) = room_one(4);
    assert!(!process_cheese(&mut world, &mut rng, 1));
    assert!(process_cheese(&mut world, &mut rng, 2));
    assert!(!process_cheese(&mut world, &mut rng, 3));
    assert!(process_cheese(&mut world, &mut rng, 4));
    assert_eq!(world.active_cheese(), 2);
}

#[test]
fn cheese_stops_at_capacity() {
    let (mut world, mut rng) = room_one(4);
    for t in 1..=MAX_CHEESE as u32 {
        assert!(process_cheese(&mut world, &mut rng, t * 2));
    }
    assert!(!process_cheese(&mut world, &mut rng, 100));
    assert_eq!(world.active_cheese(), MAX_CHEESE);
}

#[test]
fn traps_every_three_seconds() {
    let (mut world, mut rng) = room_one(8);
    assert!(!process_traps(&mut world, &mut rng, 2));
    assert!(process_traps(&mut world, &mut rng, 3));
    assert!(!process_traps(&mut world, &mut rng, 5));
    assert!(process_traps(&mut world, &mut rng, 6));
}

#[test]
fn milk_moves_every_five_seconds() {
    let (mut world, mut rng) = room_one(8);
    assert!(!process_milk(&mut world, &mut rng, 4));
    assert!(process_milk(&mut world, &mut rng, 5));
    assert!(world.milk.active);
    assert!(!process_milk(&mut world, &mut rng, 9));
    assert!(process_milk(&mut world, &mut rng, 10));
    assert!(world.milk.active);
}

#[test]
fn door_waits_for_five_cheese() {
    let (mut world, mut rng) = room_one(2);
    world.cheese_in_room = 4;
    assert!(!process_door(&mut world, &mut rng));
    world.cheese_in_room = 5;
    assert!(process_door(&mut world, &mut rng));
    assert!(world.door.active);
    assert_clear(&world, EntityKind::Door, &world.door);

    let at = world.door.pos;
    assert!(!process_door(&mut world, &mut rng));
    assert_eq!(world.door.pos, at);
}
