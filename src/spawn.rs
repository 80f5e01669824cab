//! Timed spawners and the clear-placement search they share.

use crate::config::{
    CHEESE_INTERVAL, DOOR_CHEESE_THRESHOLD, GAME_CEILING, MAX_PLACEMENT_ATTEMPTS, MILK_INTERVAL,
    SCREEN_H, SCREEN_W, TRAP_INTERVAL,
};
use crate::entity::{Body, Coord, Rect};
use crate::rng::Rng;
use crate::world::World;

/// Rejection-sample a top-left corner where a `width × height` box touches no
/// active entity and no wall pixel. Gives up after a bounded number of tries.
pub fn find_clear(world: &World, rng: &mut Rng, width: i32, height: i32) -> Option<Coord> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let x = rng.range(0, SCREEN_W).min(SCREEN_W - width);
        let y = rng.range(GAME_CEILING, SCREEN_H).min(SCREEN_H - height);
        let rect = Rect {
            left: x,
            top: y,
            right: x + width - 1,
            bottom: y + height - 1,
        };
        if world.occupant(&rect).is_none() {
            return Some(Coord::new(x as f32, y as f32));
        }
    }
    log::warn!("no clear {}x{} placement after {} attempts", width, height, MAX_PLACEMENT_ATTEMPTS);
    None
}

fn place(world: &World, rng: &mut Rng, body: &mut Body) -> bool {
    body.active = false;
    match find_clear(world, rng, body.width, body.height) {
        Some(pos) => {
            body.pos = pos;
            body.active = true;
            true
        }
        None => false,
    }
}

/// Place one more cheese once the cheese cooldown has run out.
pub fn process_cheese(world: &mut World, rng: &mut Rng, now: u32) -> bool {
    if now.saturating_sub(world.timers.cheese) < CHEESE_INTERVAL {
        return false;
    }
    let Some(i) = world.cheese.iter().position(|b| !b.active) else {
        return false;
    };
    let mut body = world.cheese[i];
    if !place(world, rng, &mut body) {
        return false;
    }
    log::debug!("cheese {} at {},{}", i, body.pos.x, body.pos.y);
    world.cheese[i] = body;
    world.timers.cheese = now;
    true
}

pub fn process_traps(world: &mut World, rng: &mut Rng, now: u32) -> bool {
    if now.saturating_sub(world.timers.trap) < TRAP_INTERVAL {
        return false;
    }
    let Some(i) = world.traps.iter().position(|b| !b.active) else {
        return false;
    };
    let mut body = world.traps[i];
    if !place(world, rng, &mut body) {
        return false;
    }
    log::debug!("trap {} at {},{}", i, body.pos.x, body.pos.y);
    world.traps[i] = body;
    world.timers.trap = now;
    true
}

/// The milk jumps to a new spot every cooldown, whether or not it was taken.
pub fn process_milk(world: &mut World, rng: &mut Rng, now: u32) -> bool {
    if now.saturating_sub(world.timers.milk) < MILK_INTERVAL {
        return false;
    }
    world.milk.active = false;
    let mut body = world.milk;
    if !place(world, rng, &mut body) {
        return false;
    }
    world.milk = body;
    world.timers.milk = now;
    true
}

/// The door opens once enough cheese has been collected in this room.
pub fn process_door(world: &mut World, rng: &mut Rng) -> bool {
    if world.cheese_in_room < DOOR_CHEESE_THRESHOLD || world.door.active {
        return false;
    }
    let mut body = world.door;
    if !place(world, rng, &mut body) {
        return false;
    }
    log::info!("door open at {},{}", body.pos.x, body.pos.y);
    world.door = body;
    true
}

pub fn run_spawners(world: &mut World, rng: &mut Rng, now: u32) {
    process_cheese(world, rng, now);
    process_traps(world, rng, now);
    process_door(world, rng);
    process_milk(world, rng, now);
}
