//! Turns debounced switch state and injected serial keys into per-frame commands.

use crate::debounce::{Switch, Switches};
use crate::movement::Direction;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Commands {
    pub direction: Option<Direction>,
    pub fire: bool,
    pub skip_room: bool,
    pub toggle_pause: bool,
    pub confirm: bool,
}

/// Edge detector over the debounced switches. A direction counts on the
/// frame it changes, press or release; the buttons count on press only.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    prev: Switches,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, switches: Switches, key: Option<u8>) -> Commands {
        let pressed = switches.pressed_since(self.prev);
        let changed = switches.changed_since(self.prev);
        self.prev = switches;
        let key = key.map(|k| k.to_ascii_lowercase());
        let hit = |switch: Switch, ch: u8| pressed.is_on(switch) || key == Some(ch);
        let moved = |switch: Switch, ch: u8| changed.is_on(switch) || key == Some(ch);

        let direction = if moved(Switch::Up, b'w') {
            Some(Direction::Up)
        } else if moved(Switch::Down, b's') {
            Some(Direction::Down)
        } else if moved(Switch::Left, b'a') {
            Some(Direction::Left)
        } else if moved(Switch::Right, b'd') {
            Some(Direction::Right)
        } else {
            None
        };

        Commands {
            direction,
            fire: hit(Switch::Center, b'f'),
            skip_room: hit(Switch::ButtonLeft, b'l'),
            toggle_pause: hit(Switch::ButtonRight, b'p'),
            confirm: pressed.is_on(Switch::ButtonRight),
        }
    }
}
