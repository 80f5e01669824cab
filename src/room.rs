//! Room-load exchange over the serial link.
//!
//! Each command is one byte followed by a newline-terminated text payload,
//! which is echoed back as the acknowledgement:
//!
//! - `T<x> <y>`: chaser spawn point
//! - `J<x> <y>`: runner spawn point
//! - `W<x1> <y1> <x2> <y2>`: append a wall
//!
//! Spawn points are clamped into the playfield. Non-finite numbers and wall
//! endpoints more than a screen off the display are rejected as malformed.
//! The exchange ends as soon as the link has nothing more to read.

use core::fmt;
use core::str::FromStr;

use heapless::Vec;

use crate::config::{SCREEN_H, SCREEN_W};
use crate::entity::{Character, Coord, Wall};
use crate::movement::clamp_to_playfield;
use crate::segment::Segment;
use crate::world::World;

pub const TOO_MANY_WALLS: &str = "Error: Too many walls";
const LINE_CAPACITY: usize = 64;

/// Byte-oriented, non-blocking serial transport.
pub trait Link {
    /// Next received byte, or `None` when nothing is waiting.
    fn read_byte(&mut self) -> Option<u8>;

    fn write(&mut self, bytes: &[u8]);

    fn write_str(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    /// Drop anything still buffered.
    fn flush_input(&mut self) {
        while self.read_byte().is_some() {}
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoomError {
    /// Wall table already full; the wall was refused.
    TooManyWalls,
    /// Payload for the given command could not be parsed.
    Malformed(u8),
}

impl fmt::Display for RoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomError::TooManyWalls => f.write_str(TOO_MANY_WALLS),
            RoomError::Malformed(cmd) => write!(f, "malformed payload for '{}'", *cmd as char),
        }
    }
}

/// What a finished exchange changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoomLoad {
    pub walls: usize,
    pub tom_placed: bool,
    pub jerry_placed: bool,
    pub refused: usize,
    pub malformed: usize,
}

/// Read one payload line (up to and including `\n`), dropping anything past capacity.
fn read_line(link: &mut impl Link) -> Vec<u8, LINE_CAPACITY> {
    let mut line = Vec::new();
    while let Some(b) = link.read_byte() {
        let _ = line.push(b);
        if b == b'\n' {
            break;
        }
    }
    line
}

fn parse_fields<T, const N: usize>(cmd: u8, line: &[u8]) -> Result<[T; N], RoomError>
where
    T: FromStr + Copy + Default,
{
    let text = core::str::from_utf8(line).map_err(|_| RoomError::Malformed(cmd))?;
    let mut fields = text.split_ascii_whitespace();
    let mut out = [T::default(); N];
    for slot in out.iter_mut() {
        *slot = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or(RoomError::Malformed(cmd))?;
    }
    Ok(out)
}

/// Spawn points must be finite; they are then pulled into the playfield.
fn place_character(character: &mut Character, cmd: u8, line: &[u8]) -> Result<(), RoomError> {
    let [x, y] = parse_fields::<f32, 2>(cmd, line)?;
    if !x.is_finite() || !y.is_finite() {
        return Err(RoomError::Malformed(cmd));
    }
    let body = &mut character.mobile.body;
    body.pos = Coord::new(x, y);
    clamp_to_playfield(body);
    character.mobile.motion.origin = body.pos;
    Ok(())
}

/// Wall endpoints may sit up to one screen off either edge; drift wraps
/// them back into view.
fn in_wall_range(x: i32, y: i32) -> bool {
    (-SCREEN_W..=2 * SCREEN_W).contains(&x) && (-SCREEN_H..=2 * SCREEN_H).contains(&y)
}

fn add_wall(world: &mut World, line: &[u8]) -> Result<(), RoomError> {
    let Some(slot) = world.walls.iter().position(|w| !w.active) else {
        return Err(RoomError::TooManyWalls);
    };
    let [x1, y1, x2, y2] = parse_fields::<i32, 4>(b'W', line)?;
    if !in_wall_range(x1, y1) || !in_wall_range(x2, y2) {
        return Err(RoomError::Malformed(b'W'));
    }
    world.walls[slot] = Wall::new(Segment::new(x1, y1, x2, y2));
    Ok(())
}

/// Replace the room's walls and spawn points with whatever the link sends.
pub fn load_room(world: &mut World, link: &mut impl Link) -> RoomLoad {
    world.clear_walls();
    let mut report = RoomLoad::default();

    while let Some(cmd) = link.read_byte() {
        let result = match cmd {
            b'T' | b'J' | b'W' => {
                let line = read_line(link);
                link.write(&line);
                match cmd {
                    b'T' => place_character(&mut world.tom, cmd, &line).map(|_| report.tom_placed = true),
                    b'J' => place_character(&mut world.jerry, cmd, &line).map(|_| report.jerry_placed = true),
                    _ => add_wall(world, &line).map(|_| report.walls += 1),
                }
            }
            _ => Ok(()),
        };

        match result {
            Ok(()) => {}
            Err(RoomError::TooManyWalls) => {
                log::warn!("{}", RoomError::TooManyWalls);
                link.write_str(TOO_MANY_WALLS);
                report.refused += 1;
            }
            Err(e) => {
                log::warn!("room load: {}", e);
                report.malformed += 1;
            }
        }
    }

    log::info!(
        "room loaded: {} walls, tom {}, jerry {}",
        report.walls,
        report.tom_placed,
        report.jerry_placed
    );
    report
}
