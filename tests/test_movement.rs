use quibble::bitmap::Sprites;
use quibble::config::{GAME_CEILING, SCREEN_H, SCREEN_W};
use quibble::entity::{Coord, Wall};
use quibble::movement::*;
use quibble::rng::Rng;
use quibble::segment::Segment;
use quibble::World;

fn room_one(seed: u32) -> (World, Rng) {
    let mut rng = Rng::new(seed);
    let mut world = World::new(Sprites::prepare());
    world.reset_session(&mut rng);
    (world, rng)
}

fn in_playfield(world: &World) -> bool {
    let b = world.tom.body();
    b.pos.x >= 0.0
        && b.pos.x <= (SCREEN_W - b.width) as f32
        && b.pos.y >= GAME_CEILING as f32
        && b.pos.y <= (SCREEN_H - b.height) as f32
}

// ── chaser ────────────────────────────────────────────────────────────────────

#[test]
fn chaser_bounce_resolves_within_two_attempts() {
    for seed in 1..200 {
        let (mut world, mut rng) = room_one(seed);
        world.tom.mobile.body.pos = Coord::new(
            rng.range(0, SCREEN_W - 5) as f32,
            rng.range(GAME_CEILING, SCREEN_H - 7) as f32,
        );
        for _ in 0..200 {
            let bias = rng.range(0, 254) as u8;
            assert!(move_chaser(&mut world, &mut rng, bias) <= 2);
            assert!(in_playfield(&world));
        }
    }
}

#[test]
fn chaser_bounces_off_the_right_edge() {
    let (mut world, mut rng) = room_one(1);
    world.tom.mobile.body.pos = Coord::new((SCREEN_W - 5) as f32, 20.0);
    world.tom.mobile.motion.velocity = Coord::new(1.0, 0.0);
    let attempts = move_chaser(&mut world, &mut rng, 0);
    assert!((1..=2).contains(&attempts));
    assert!(world.tom.mobile.motion.velocity.x <= 0.0 || attempts == 1);
    assert!(in_playfield(&world));
}

#[test]
fn chaser_at_full_bias_bounces_off_a_wall() {
    let (mut world, mut rng) = room_one(3);
    world.clear_walls();
    world.walls[0] = Wall::new(Segment::new(25, 35, 25, 45));
    world.tom.mobile.body.pos = Coord::new(19.0, 36.0);
    world.tom.mobile.motion.velocity = Coord::new(1.0, 0.0);

    let attempts = move_chaser(&mut world, &mut rng, 254);

    assert!((1..=2).contains(&attempts));
    assert!(world.tom.body().bounds().right < 25);
}

#[test]
fn bounce_speed_stays_between_base_speeds() {
    let mut rng = Rng::new(21);
    let mut motion = quibble::entity::Motion::default();
    for _ in 0..500 {
        random_bounce(&mut motion, &mut rng, true, true);
        assert!((0.8..=1.0).contains(&motion.speed));
    }
}

// ── runner ────────────────────────────────────────────────────────────────────

#[test]
fn wall_blocks_the_runner() {
    let (mut world, _) = room_one(1);
    // just left of the vertical wall at x=25, rows 35..=45
    world.jerry.mobile.body.pos = Coord::new(20.0, 36.0);
    assert!(!move_player(&mut world, Direction::Right, 254));
    assert_eq!(world.jerry.pos(), Coord::new(20.0, 36.0));

    assert!(move_player(&mut world, Direction::Left, 254));
    assert!(world.jerry.pos().x < 20.0);
}

#[test]
fn full_bias_step_stops_short_of_the_wall() {
    let (mut world, _) = room_one(1);
    world.jerry.mobile.body.pos = Coord::new(19.0, 36.0);
    for _ in 0..5 {
        move_player(&mut world, Direction::Right, 254);
        assert!(world.jerry.body().bounds().right < 25);
    }
    assert_eq!(world.jerry.pos(), Coord::new(20.0, 36.0));
}

#[test]
fn super_sprite_stays_on_screen() {
    let (mut world, _) = room_one(1);
    world.jerry.mobile.body.pos = Coord::new(30.0, (SCREEN_H - 6) as f32);
    world.make_super(0);
    assert!(world.jerry.body().bounds().bottom < SCREEN_H);
    assert_eq!(world.jerry.pos().y, (SCREEN_H - 8) as f32);
}

#[test]
fn super_mode_walks_through_walls() {
    let (mut world, _) = room_one(1);
    world.jerry.mobile.body.pos = Coord::new(19.0, 36.0);
    world.make_super(0);
    assert!(move_player(&mut world, Direction::Right, 254));
    assert!((world.jerry.pos().x - 21.1).abs() < 1e-4);
}

#[test]
fn runner_clamped_below_status_bar() {
    let (mut world, _) = room_one(1);
    world.jerry.mobile.body.pos = Coord::new(5.0, GAME_CEILING as f32);
    move_player(&mut world, Direction::Up, 254);
    assert_eq!(world.jerry.pos().y, GAME_CEILING as f32);

    world.jerry.mobile.body.pos = Coord::new(0.0, 30.0);
    move_player(&mut world, Direction::Left, 254);
    assert_eq!(world.jerry.pos().x, 0.0);
}

#[test]
fn analog_bias_scales_steps() {
    let (mut world, _) = room_one(1);
    world.jerry.mobile.body.pos = Coord::new(40.0, 20.0);
    move_player(&mut world, Direction::Down, 0);
    assert!((world.jerry.pos().y - 20.1).abs() < 1e-4);
    move_player(&mut world, Direction::Down, 150);
    assert!((world.jerry.pos().y - 21.2).abs() < 1e-4);
}

// ── fireworks ─────────────────────────────────────────────────────────────────

#[test]
fn fireworks_need_three_cheese() {
    let (mut world, _) = room_one(1);
    assert!(!launch_firework(&mut world));
    world.cheese_total = 3;
    assert!(launch_firework(&mut world));
    assert_eq!(world.active_fireworks(), 1);
}

#[test]
fn firework_homes_on_the_chaser() {
    let (mut world, _) = room_one(1);
    world.clear_walls();
    world.cheese_total = 3;
    world.jerry.mobile.body.pos = Coord::new(10.0, 20.0);
    world.tom.mobile.body.pos = Coord::new(60.0, 22.0);
    launch_firework(&mut world);

    let start = world.fireworks[0].body.pos;
    move_fireworks(&mut world);
    let next = world.fireworks[0].body.pos;
    let step = ((next.x - start.x).powi(2) + (next.y - start.y).powi(2)).sqrt();
    assert!((step - 2.5).abs() < 1e-3);
    assert!(next.x > start.x);
}

#[test]
fn firework_burns_out_on_a_wall() {
    let (mut world, _) = room_one(1);
    world.clear_walls();
    world.walls[0] = Wall::new(Segment::new(30, 10, 30, 47));
    world.cheese_total = 3;
    // fires straight right from (22, 20)
    world.jerry.mobile.body.pos = Coord::new(20.0, 17.0);
    world.tom.mobile.body.pos = Coord::new(60.0, 20.0);
    launch_firework(&mut world);
    for _ in 0..10 {
        move_fireworks(&mut world);
    }
    assert_eq!(world.active_fireworks(), 0);
}

// ── walls ─────────────────────────────────────────────────────────────────────

#[test]
fn horizontal_wall_drifts_up_and_wraps() {
    let mut walls = [Wall::new(Segment::new(45, 10, 60, 10))];
    drift_walls(&mut walls, 1, 0);
    assert_eq!(walls[0].segment, Segment::new(45, 47, 60, 47));
    drift_walls(&mut walls, 1, 0);
    assert_eq!(walls[0].segment, Segment::new(45, 46, 60, 46));
}

#[test]
fn drift_rate_follows_bias() {
    let mut walls = [Wall::new(Segment::new(25, 35, 25, 45))];
    // normal of a downward vertical segment points right
    drift_walls(&mut walls, 1, 200);
    assert_eq!(walls[0].segment, Segment::new(28, 35, 28, 45));
}

#[test]
fn diagonal_drift_carries_fractions() {
    let mut walls = [Wall::new(Segment::new(0, 20, 10, 30))];
    for _ in 0..10 {
        drift_walls(&mut walls, 1, 0);
    }
    // unit normal (0.707, -0.707): ten steps is about 7 px each way
    let s = walls[0].segment;
    assert!((6..=8).contains(&s.x1));
    assert!((12..=14).contains(&s.y1));
}

#[test]
fn inactive_walls_stay_put() {
    let mut walls = [Wall::new(Segment::new(45, 20, 60, 20))];
    walls[0].active = false;
    drift_walls(&mut walls, 5, 254);
    assert_eq!(walls[0].segment, Segment::new(45, 20, 60, 20));
}
