//! Shift-register switch debouncing.
//!
//! Every medium tick each switch history is shifted left, masked to
//! [`DEBOUNCE_SAMPLES`](crate::config::DEBOUNCE_SAMPLES) bits and the raw
//! level is OR'ed into bit 0. A switch
//! turns on once the whole mask reads asserted and turns off once it reads
//! all deasserted; anything in between keeps the previous state.

use crate::config::DEBOUNCE_MASK;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Switch {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    Center = 4,
    ButtonLeft = 5,
    ButtonRight = 6,
}

impl Switch {
    pub const ALL: [Switch; 7] = [
        Switch::Up,
        Switch::Down,
        Switch::Left,
        Switch::Right,
        Switch::Center,
        Switch::ButtonLeft,
        Switch::ButtonRight,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// One bit per [`Switch`]; used for raw samples and debounced state alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Switches(pub u8);

impl Switches {
    pub const NONE: Self = Self(0);

    pub fn from_levels(levels: [bool; 7]) -> Self {
        let mut s = Self::NONE;
        for (switch, level) in Switch::ALL.iter().zip(levels) {
            s.set(*switch, level);
        }
        s
    }

    pub fn with(mut self, switch: Switch) -> Self {
        self.set(switch, true);
        self
    }

    pub fn is_on(self, switch: Switch) -> bool {
        self.0 & switch.bit() != 0
    }

    pub fn set(&mut self, switch: Switch, on: bool) {
        if on {
            self.0 |= switch.bit();
        } else {
            self.0 &= !switch.bit();
        }
    }

    /// Switches that are on now but were off in `prev`.
    pub fn pressed_since(self, prev: Switches) -> Switches {
        Switches(self.0 & !prev.0)
    }

    /// Switches whose state differs from `prev`, either way.
    pub fn changed_since(self, prev: Switches) -> Switches {
        Switches(self.0 ^ prev.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Debouncer {
    history: u8,
    state: bool,
}

impl Debouncer {
    pub fn sample(&mut self, raw: bool) -> bool {
        self.history = ((self.history << 1) & DEBOUNCE_MASK) | u8::from(raw);
        if self.history == DEBOUNCE_MASK {
            self.state = true;
        } else if self.history == 0 {
            self.state = false;
        }
        self.state
    }

    pub fn history(&self) -> u8 {
        self.history
    }

    pub fn state(&self) -> bool {
        self.state
    }
}

/// Debouncers for every switch; owned by the medium task.
#[derive(Clone, Debug, Default)]
pub struct DebounceBank {
    switches: [Debouncer; 7],
}

impl DebounceBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, raw: Switches) -> Switches {
        let mut out = Switches::NONE;
        for (switch, debouncer) in Switch::ALL.iter().zip(self.switches.iter_mut()) {
            out.set(*switch, debouncer.sample(raw.is_on(*switch)));
        }
        out
    }
}
