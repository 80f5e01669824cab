//! The simulation context: every entity plus the per-session counters.

use crate::bitmap::Sprites;
use crate::collision::wall_hit;
use crate::config::{
    FIRST_ROOM, JERRY_ORIGIN, JERRY_SPEED, MAX_CHEESE, MAX_FIREWORKS, MAX_TRAPS, MAX_WALLS,
    START_LIVES, SUPER_DURATION, TOM_ORIGIN, TOM_SPEED,
};
use crate::entity::{Body, Character, Coord, EntityKind, Mobile, Rect, Wall};
use crate::movement::{clamp_to_playfield, random_bounce};
use crate::rng::Rng;
use crate::segment::Segment;

const ROOM_ONE_WALLS: [Segment; 4] = [
    Segment::new(18, 15, 13, 25),
    Segment::new(25, 35, 25, 45),
    Segment::new(45, 10, 60, 10),
    Segment::new(58, 25, 72, 30),
];

/// Game-clock seconds at which each spawner last fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnTimers {
    pub cheese: u32,
    pub trap: u32,
    pub milk: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SuperMode {
    pub active: bool,
    pub started_at: u32,
}

impl SuperMode {
    /// Whole seconds spent in super mode so far.
    pub fn elapsed(&self, now: u32) -> u32 {
        if self.active {
            now.saturating_sub(self.started_at)
        } else {
            0
        }
    }

    pub fn expired(&self, now: u32) -> bool {
        self.active && now >= self.started_at + SUPER_DURATION
    }
}

#[derive(Clone, Debug)]
pub struct World {
    pub walls: [Wall; MAX_WALLS],
    pub cheese: [Body; MAX_CHEESE],
    pub traps: [Body; MAX_TRAPS],
    pub fireworks: [Mobile; MAX_FIREWORKS],
    pub milk: Body,
    pub door: Body,
    pub jerry: Character,
    pub tom: Character,
    pub level: u8,
    pub cheese_total: u32,
    pub cheese_in_room: u32,
    pub timers: SpawnTimers,
    pub super_mode: SuperMode,
    pub sprites: Sprites,
}

impl World {
    pub fn new(sprites: Sprites) -> Self {
        let jerry_origin = Coord::new(JERRY_ORIGIN.0, JERRY_ORIGIN.1);
        let tom_origin = Coord::new(TOM_ORIGIN.0, TOM_ORIGIN.1);
        Self {
            walls: [Wall::default(); MAX_WALLS],
            cheese: [Body::new(sprites.cheese, Coord::ZERO); MAX_CHEESE],
            traps: [Body::new(sprites.trap, Coord::ZERO); MAX_TRAPS],
            fireworks: [Mobile::EMPTY; MAX_FIREWORKS],
            milk: Body::new(sprites.milk, Coord::ZERO),
            door: Body::new(sprites.door, Coord::ZERO),
            jerry: Character::new(sprites.jerry, jerry_origin, JERRY_SPEED, START_LIVES),
            tom: Character::new(sprites.tom, tom_origin, TOM_SPEED, START_LIVES),
            level: FIRST_ROOM,
            cheese_total: 0,
            cheese_in_room: 0,
            timers: SpawnTimers::default(),
            super_mode: SuperMode::default(),
            sprites,
        }
    }

    /// Fresh session: characters, room one walls and every counter.
    pub fn reset_session(&mut self, rng: &mut Rng) {
        let jerry_origin = Coord::new(JERRY_ORIGIN.0, JERRY_ORIGIN.1);
        let tom_origin = Coord::new(TOM_ORIGIN.0, TOM_ORIGIN.1);
        self.jerry = Character::new(self.sprites.jerry, jerry_origin, JERRY_SPEED, START_LIVES);
        self.tom = Character::new(self.sprites.tom, tom_origin, TOM_SPEED, START_LIVES);
        random_bounce(&mut self.tom.mobile.motion, rng, true, true);

        self.walls = [Wall::default(); MAX_WALLS];
        for (wall, segment) in self.walls.iter_mut().zip(ROOM_ONE_WALLS) {
            *wall = Wall::new(segment);
        }

        self.level = FIRST_ROOM;
        self.cheese_total = 0;
        self.timers = SpawnTimers::default();
        self.super_mode = SuperMode::default();
        self.reset_objects();
    }

    /// Clear every pickup, hazard and projectile for a new room.
    pub fn reset_objects(&mut self) {
        for c in self.cheese.iter_mut() {
            c.active = false;
        }
        for t in self.traps.iter_mut() {
            t.active = false;
        }
        for f in self.fireworks.iter_mut() {
            f.body.active = false;
        }
        self.door.active = false;
        self.milk.active = false;
        self.cheese_in_room = 0;
    }

    pub fn clear_walls(&mut self) {
        for w in self.walls.iter_mut() {
            w.active = false;
        }
    }

    pub fn make_super(&mut self, now: u32) {
        self.super_mode = SuperMode {
            active: true,
            started_at: now,
        };
        self.jerry.mobile.body.set_sprite(self.sprites.super_jerry);
        // the super sprite is taller; keep it on screen
        clamp_to_playfield(&mut self.jerry.mobile.body);
    }

    pub fn clear_super(&mut self) {
        self.super_mode.active = false;
        self.jerry.mobile.body.set_sprite(self.sprites.jerry);
    }

    /// Every active body in the world, tagged with its kind.
    pub fn bodies(&self) -> impl Iterator<Item = (EntityKind, &Body)> {
        let cheese = self.cheese.iter().map(|b| (EntityKind::Cheese, b));
        let traps = self.traps.iter().map(|b| (EntityKind::Trap, b));
        let fireworks = self.fireworks.iter().map(|m| (EntityKind::Firework, &m.body));
        let singles = [
            (EntityKind::Milk, &self.milk),
            (EntityKind::Door, &self.door),
            (EntityKind::Jerry, self.jerry.body()),
            (EntityKind::Tom, self.tom.body()),
        ];
        cheese
            .chain(traps)
            .chain(fireworks)
            .chain(singles)
            .filter(|(_, b)| b.active)
    }

    /// First thing (if any) already occupying part of `rect`.
    pub fn occupant(&self, rect: &Rect) -> Option<EntityKind> {
        if let Some((kind, _)) = self.bodies().find(|(_, b)| b.bounds().overlaps(rect)) {
            return Some(kind);
        }
        for y in rect.top..=rect.bottom {
            for x in rect.left..=rect.right {
                if wall_hit(&self.walls, x, y) {
                    return Some(EntityKind::Wall);
                }
            }
        }
        None
    }

    pub fn active_cheese(&self) -> usize {
        self.cheese.iter().filter(|b| b.active).count()
    }

    pub fn active_traps(&self) -> usize {
        self.traps.iter().filter(|b| b.active).count()
    }

    pub fn active_fireworks(&self) -> usize {
        self.fireworks.iter().filter(|m| m.body.active).count()
    }

    pub fn active_walls(&self) -> usize {
        self.walls.iter().filter(|w| w.active).count()
    }
}
