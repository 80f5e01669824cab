//! Text produced for the outside world: the per-frame telemetry block sent
//! over the link, and the status bar drawn above the playfield.

use core::fmt::Write;

use heapless::String;

use crate::config::ANALOG_MAX;
use crate::room::Link;
use crate::scheduler::GameTime;
use crate::world::World;

const LINE_CAPACITY: usize = 32;

pub type Line = String<LINE_CAPACITY>;

/// Everything one telemetry frame reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub time: GameTime,
    pub level: u8,
    pub score: u32,
    pub fireworks: usize,
    pub cheese: usize,
    pub traps: usize,
    pub cheese_in_room: u32,
    pub super_mode: bool,
    pub paused: bool,
}

impl Frame {
    pub fn capture(world: &World, time: GameTime, paused: bool) -> Self {
        Self {
            time,
            level: world.level,
            score: world.jerry.score,
            fireworks: world.active_fireworks(),
            cheese: world.active_cheese(),
            traps: world.active_traps(),
            cheese_in_room: world.cheese_in_room,
            super_mode: world.super_mode.active,
            paused,
        }
    }

    /// Write the block, one `\n`-terminated line per field.
    pub fn send(&self, link: &mut impl Link) {
        let mut line = Line::new();
        let mut emit = |args: core::fmt::Arguments<'_>| {
            line.clear();
            if line.write_fmt(args).is_ok() {
                link.write(line.as_bytes());
            }
        };
        emit(format_args!("Time: {:02}:{:02}\n", self.time.minutes, self.time.seconds));
        emit(format_args!("Level: {}\n", self.level));
        emit(format_args!("Score: {}\n", self.score));
        emit(format_args!("Fireworks: {}\n", self.fireworks));
        emit(format_args!("Cheese: {}\n", self.cheese));
        emit(format_args!("Traps: {}\n", self.traps));
        emit(format_args!("Cheese cur room: {}\n", self.cheese_in_room));
        emit(format_args!("Super mode: {}\n", u8::from(self.super_mode)));
        emit(format_args!("Paused: {}\n", u8::from(self.paused)));
    }
}

/// `L<level> h<lives> s<score> T<MM>:<SS>`
pub fn status_line(level: u8, lives: u32, score: u32, time: GameTime) -> Line {
    let mut line = Line::new();
    let _ = write!(
        line,
        "L{} h{} s{} T{:02}:{:02}",
        level, lives, score, time.minutes, time.seconds
    );
    line
}

/// Linear rescale of a raw converter reading onto `0..=ANALOG_MAX`.
pub fn scale_analog(raw: u16, full_scale: u16) -> u8 {
    if full_scale == 0 {
        return 0;
    }
    let raw = u32::from(raw.min(full_scale));
    (raw * u32::from(ANALOG_MAX) / u32::from(full_scale)) as u8
}
