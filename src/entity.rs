//! Plain entity records. Behaviour lives in `movement`, `spawn` and `game`.

use core::ops::{Add, Mul};

use libm::roundf;

use crate::bitmap::{DirectBitmap, Sprite};
use crate::segment::Segment;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Coord {
    pub x: f32,
    pub y: f32,
}

impl Coord {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Screen pixel this coordinate is drawn at.
    pub fn pixel(self) -> (i32, i32) {
        (roundf(self.x) as i32, roundf(self.y) as i32)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Coord {
    type Output = Coord;

    fn mul(self, rhs: f32) -> Coord {
        Coord::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned pixel rectangle with inclusive edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.bottom < other.top
            || self.top > other.bottom
            || self.left > other.right
            || self.right < other.left)
    }
}

/// Anything with a place in the world and a bitmap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub active: bool,
    pub pos: Coord,
    pub width: i32,
    pub height: i32,
    pub bitmap: DirectBitmap,
}

impl Body {
    pub const EMPTY: Self = Self {
        active: false,
        pos: Coord::ZERO,
        width: 0,
        height: 0,
        bitmap: DirectBitmap::EMPTY,
    };

    pub fn new(sprite: Sprite, pos: Coord) -> Self {
        Self {
            active: false,
            pos,
            width: sprite.width,
            height: sprite.height,
            bitmap: sprite.bitmap,
        }
    }

    pub fn set_sprite(&mut self, sprite: Sprite) {
        self.width = sprite.width;
        self.height = sprite.height;
        self.bitmap = sprite.bitmap;
    }

    pub fn bounds(&self) -> Rect {
        let (x, y) = self.pos.pixel();
        Rect {
            left: x,
            top: y,
            right: x + self.width - 1,
            bottom: y + self.height - 1,
        }
    }

    pub fn center(&self) -> Coord {
        Coord::new(
            self.pos.x + (self.width / 2) as f32,
            self.pos.y + (self.height / 2) as f32,
        )
    }
}

/// Velocity and respawn point for anything that moves on its own.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Motion {
    pub origin: Coord,
    pub velocity: Coord,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mobile {
    pub body: Body,
    pub motion: Motion,
}

impl Mobile {
    pub const EMPTY: Self = Self {
        body: Body::EMPTY,
        motion: Motion {
            origin: Coord::ZERO,
            velocity: Coord::ZERO,
            speed: 0.0,
        },
    };

    pub fn reset_to_origin(&mut self) {
        self.body.pos = self.motion.origin;
    }
}

/// A drifting line segment. `carry` accumulates sub-pixel drift.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Wall {
    pub active: bool,
    pub segment: Segment,
    pub carry: Coord,
}

impl Wall {
    pub const fn new(segment: Segment) -> Self {
        Self {
            active: true,
            segment,
            carry: Coord::ZERO,
        }
    }
}

/// The runner (Jerry) and the chaser (Tom).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Character {
    pub mobile: Mobile,
    pub lives: u32,
    pub score: u32,
}

impl Character {
    pub fn new(sprite: Sprite, origin: Coord, speed: f32, lives: u32) -> Self {
        let mut body = Body::new(sprite, origin);
        body.active = true;
        Self {
            mobile: Mobile {
                body,
                motion: Motion {
                    origin,
                    velocity: Coord::ZERO,
                    speed,
                },
            },
            lives,
            score: 0,
        }
    }

    pub fn body(&self) -> &Body {
        &self.mobile.body
    }

    pub fn pos(&self) -> Coord {
        self.mobile.body.pos
    }

    pub fn reset_to_origin(&mut self) {
        self.mobile.reset_to_origin();
    }
}

/// Closed set of entity kinds; used by placement and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntityKind {
    Wall,
    Cheese,
    Trap,
    Milk,
    Door,
    Firework,
    Jerry,
    Tom,
}
