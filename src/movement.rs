//! Player, chaser, projectile and wall movement.

use libm::{atan2f, cosf, sinf, truncf};

use crate::collision::{Span, wall_hit, wall_span_hit};
use crate::config::{
    ANALOG_STEP, FIREWORK_CHEESE_MIN, FIREWORK_SPEED, GAME_CEILING, JERRY_SPEED, SCREEN_H,
    SCREEN_W, SPEED_NUDGE, TOM_SPEED,
};
use crate::entity::{Body, Coord, Motion, Wall};
use crate::rng::Rng;
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub fn unit(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Whole analog steps; the knob moves speed in coarse notches.
pub fn speed_scale(bias: u8) -> f32 {
    f32::from(bias / ANALOG_STEP)
}

/// Analog-scaled per-tick displacement, nudged so motion never fully stalls.
pub fn scale_velocity(v: f32, bias: u8) -> f32 {
    let nudge = if v > 0.0 {
        SPEED_NUDGE
    } else if v < 0.0 {
        -SPEED_NUDGE
    } else {
        0.0
    };
    v * speed_scale(bias) + nudge
}

/// Pick a fresh heading for the requested axes, at a speed between the
/// chaser's and the runner's base speeds.
pub fn random_bounce(motion: &mut Motion, rng: &mut Rng, x: bool, y: bool) {
    let heading = rng.heading();
    let speed = rng.uniform(TOM_SPEED, JERRY_SPEED);
    if x {
        motion.velocity.x = speed * cosf(heading);
    }
    if y {
        motion.velocity.y = speed * sinf(heading);
    }
    motion.speed = speed;
}

/// The pixels a `w × h` box at `(x, y)` would touch first when moving `dir`.
pub fn leading_edge(x: i32, y: i32, w: i32, h: i32, dir: Direction) -> Span {
    match dir {
        Direction::Up => Span::Row {
            y,
            left: x,
            right: x + w - 1,
        },
        Direction::Down => Span::Row {
            y: y + h - 1,
            left: x,
            right: x + w - 1,
        },
        Direction::Left => Span::Column {
            x,
            top: y,
            bottom: y + h - 1,
        },
        Direction::Right => Span::Column {
            x: x + w - 1,
            top: y,
            bottom: y + h - 1,
        },
    }
}

/// Pull a body back inside the playfield, below the status bar.
pub fn clamp_to_playfield(body: &mut Body) {
    body.pos.x = body.pos.x.clamp(0.0, (SCREEN_W - body.width) as f32);
    body.pos.y = body.pos.y.clamp(GAME_CEILING as f32, (SCREEN_H - body.height) as f32);
}

/// Whole-pixel steps a `w × h` box at `(x, y)` can take in `dir` before its
/// leading edge meets a wall, up to `reach`.
fn clear_steps(
    walls: &[Wall],
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    dir: Direction,
    reach: i32,
) -> i32 {
    let (dx, dy) = dir.unit();
    (1..=reach)
        .find(|&i| wall_span_hit(walls, leading_edge(x + dx * i, y + dy * i, w, h, dir)))
        .map_or(reach, |i| i - 1)
}

/// Step the runner one notch in `dir`. Every pixel row or column the step
/// crosses is checked, and a wall stops the runner just short of it.
/// Super mode walks through walls. Returns whether the runner moved.
pub fn move_player(world: &mut World, dir: Direction, bias: u8) -> bool {
    let World {
        walls,
        jerry,
        super_mode,
        ..
    } = world;
    let speed = jerry.mobile.motion.speed;
    let body = &mut jerry.mobile.body;
    let (x, y) = body.pos.pixel();
    let (dx, dy) = dir.unit();

    let mut target = body.pos;
    if dir.is_horizontal() {
        target.x += scale_velocity(dx as f32 * speed, bias);
    } else {
        target.y += scale_velocity(dy as f32 * speed, bias);
    }

    if !super_mode.active {
        let (tx, ty) = target.pixel();
        let reach = (tx - x).abs().max((ty - y).abs()).max(1);
        let clear = clear_steps(&walls[..], x, y, body.width, body.height, dir, reach);
        if clear == 0 {
            return false;
        }
        if clear < reach {
            target = Coord::new((x + dx * clear) as f32, (y + dy * clear) as f32);
        }
    }

    body.pos = target;
    clamp_to_playfield(body);
    true
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Re-pick one axis of the heading when `blocked`; reflect if the new pick is
/// blocked too. Returns how many attempts it took (0 when not blocked).
fn resolve_axis(
    motion: &mut Motion,
    rng: &mut Rng,
    axis: Axis,
    blocked: impl Fn(&Motion) -> bool,
) -> u8 {
    if !blocked(motion) {
        return 0;
    }
    random_bounce(motion, rng, axis == Axis::X, axis == Axis::Y);
    if !blocked(motion) {
        return 1;
    }
    match axis {
        Axis::X => motion.velocity.x = -motion.velocity.x,
        Axis::Y => motion.velocity.y = -motion.velocity.y,
    }
    2
}

/// Advance the chaser along its heading, bouncing off the playfield edges
/// and off walls on its leading edge. Returns the most attempts any single
/// bounce needed.
pub fn move_chaser(world: &mut World, rng: &mut Rng, bias: u8) -> u8 {
    let World { walls, tom, .. } = world;
    let walls: &[Wall] = &walls[..];
    let body = tom.mobile.body;
    let (w, h) = (body.width, body.height);
    let (x, y) = body.pos.pixel();
    let target = |m: &Motion| (body.pos + m.velocity).pixel();
    let scaled = |m: &Motion| {
        let step = Coord::new(
            scale_velocity(m.velocity.x, bias),
            scale_velocity(m.velocity.y, bias),
        );
        (body.pos + step).pixel()
    };

    let out_x = |m: &Motion| {
        let (nx, _) = target(m);
        nx < 0 || nx > SCREEN_W - w
    };
    let out_y = |m: &Motion| {
        let (_, ny) = target(m);
        ny < GAME_CEILING || ny > SCREEN_H - h
    };
    // Both checks sweep from the current edge out to the further of the
    // base and the knob-scaled step.
    let wall_x = |m: &Motion| {
        let dir = if m.velocity.x > 0.0 {
            Direction::Right
        } else if m.velocity.x < 0.0 {
            Direction::Left
        } else {
            return false;
        };
        let ((nx, ny), (sx, _)) = (target(m), scaled(m));
        let reach = (nx - x).abs().max((sx - x).abs()).max(1);
        clear_steps(walls, x, ny, w, h, dir, reach) < reach
    };
    let wall_y = |m: &Motion| {
        let dir = if m.velocity.y > 0.0 {
            Direction::Down
        } else if m.velocity.y < 0.0 {
            Direction::Up
        } else {
            return false;
        };
        let ((nx, ny), (_, sy)) = (target(m), scaled(m));
        let reach = (ny - y).abs().max((sy - y).abs()).max(1);
        clear_steps(walls, nx, y, w, h, dir, reach) < reach
    };

    let motion = &mut tom.mobile.motion;
    let attempts = [
        resolve_axis(motion, rng, Axis::X, out_x),
        resolve_axis(motion, rng, Axis::Y, out_y),
        resolve_axis(motion, rng, Axis::X, wall_x),
        resolve_axis(motion, rng, Axis::Y, wall_y),
    ];

    let velocity = motion.velocity;
    let body = &mut tom.mobile.body;
    body.pos.x += scale_velocity(velocity.x, bias);
    body.pos.y += scale_velocity(velocity.y, bias);
    clamp_to_playfield(body);

    attempts.into_iter().max().unwrap_or(0)
}

/// Launch a firework from the runner's centre into the first free slot.
pub fn launch_firework(world: &mut World) -> bool {
    if world.cheese_total < FIREWORK_CHEESE_MIN {
        return false;
    }
    let origin = world.jerry.body().center();
    let sprite = world.sprites.firework;
    let Some(slot) = world.fireworks.iter_mut().find(|m| !m.body.active) else {
        return false;
    };
    slot.body = Body::new(sprite, origin);
    slot.body.active = true;
    slot.motion = Motion {
        origin,
        velocity: Coord::ZERO,
        speed: FIREWORK_SPEED,
    };
    true
}

/// Pure pursuit: every firework re-aims at the chaser each tick and burns
/// out on the first wall it touches.
pub fn move_fireworks(world: &mut World) {
    let target = world.tom.pos();
    let walls = &world.walls;
    for fw in world.fireworks.iter_mut().filter(|m| m.body.active) {
        let pos = fw.body.pos;
        let heading = atan2f(target.y - pos.y, target.x - pos.x);
        fw.motion.velocity = Coord::new(cosf(heading), sinf(heading)) * fw.motion.speed;
        fw.body.pos = pos + fw.motion.velocity;
        let (x, y) = fw.body.pos.pixel();
        if wall_hit(walls, x, y) {
            fw.body.active = false;
        }
    }
}

/// Slide every active wall sideways along its own normal, `steps` times.
pub fn drift_walls(walls: &mut [Wall], steps: u8, bias: u8) {
    let rate = 1.0 + speed_scale(bias);
    for wall in walls.iter_mut().filter(|w| w.active) {
        for _ in 0..steps {
            wall.carry = wall.carry + wall.segment.normal() * rate;
            let dx = truncf(wall.carry.x);
            let dy = truncf(wall.carry.y);
            wall.carry = Coord::new(wall.carry.x - dx, wall.carry.y - dy);
            wall.segment.translate(dx as i32, dy as i32);
            wall.segment.wrap_into_view();
        }
    }
}
