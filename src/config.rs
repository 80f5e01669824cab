//! Compile-time tuning for the simulation and its periodic tasks.

// --- Screen ---
pub const SCREEN_W: i32 = 84;
pub const SCREEN_H: i32 = 48;
/// First playfield row; everything above belongs to the status bar.
pub const GAME_CEILING: i32 = 10;

// --- Capacities ---
pub const MAX_WALLS: usize = 6;
pub const MAX_CHEESE: usize = 5;
pub const MAX_TRAPS: usize = 5;
pub const MAX_FIREWORKS: usize = 20;

// --- Characters ---
pub const START_LIVES: u32 = 5;
pub const JERRY_SPEED: f32 = 1.0;
pub const TOM_SPEED: f32 = 0.8;
pub const JERRY_ORIGIN: (f32, f32) = (0.0, 10.0);
pub const TOM_ORIGIN: (f32, f32) = ((SCREEN_W - 6) as f32, (SCREEN_H - 9) as f32);
/// Added on top of the analog-scaled step so a character never stalls.
pub const SPEED_NUDGE: f32 = 0.1;

// --- Projectiles ---
pub const FIREWORK_SPEED: f32 = 2.5;
/// Total cheese needed before fireworks can be launched.
pub const FIREWORK_CHEESE_MIN: u32 = 3;

// --- Spawn cadences (seconds of game clock) ---
pub const CHEESE_INTERVAL: u32 = 2;
pub const TRAP_INTERVAL: u32 = 3;
pub const MILK_INTERVAL: u32 = 5;
pub const DOOR_CHEESE_THRESHOLD: u32 = 5;
pub const SUPER_DURATION: u32 = 10;
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

// --- Rooms ---
pub const FIRST_ROOM: u8 = 1;
pub const FINAL_ROOM: u8 = 2;

// --- Debounce ---
/// Consecutive samples that must agree; the mask holds one bit per sample.
pub const DEBOUNCE_SAMPLES: u32 = 2;
pub const DEBOUNCE_MASK: u8 = ((1u16 << DEBOUNCE_SAMPLES) - 1) as u8;

// --- Periodic tasks ---
pub const FAST_TICK_US: u64 = 33_333;
pub const MEDIUM_TICK_US: u64 = 65_536;
/// Wall drift fires on the medium tick after this many have elapsed.
pub const WALL_DRIFT_TICKS: u32 = 10;
/// Indicator stays lit while the fast counter is below this many ticks per super second.
pub const INDICATOR_TICKS_PER_SEC: u32 = 3;

// --- Game clock ---
pub const CLOCK_FREQ: u32 = 1_000_000;
pub const CLOCK_PRESCALE: u32 = 15_625;
/// Counter wraps (and the overflow count increments) at this value.
pub const CLOCK_COUNTER_TOP: u32 = 256;

// --- Analog ---
pub const ANALOG_MAX: u8 = 254;
/// Analog values are consumed in whole steps of this size.
pub const ANALOG_STEP: u8 = 100;

// --- Frame ---
pub const FRAME_MS: u64 = 50;
