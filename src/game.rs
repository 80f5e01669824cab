//! Game state machine and the per-frame simulation step.

use crate::bitmap::Sprites;
use crate::collision::obj_collided;
use crate::config::FINAL_ROOM;
use crate::debounce::Switches;
use crate::input::Controls;
use crate::movement::{drift_walls, launch_firework, move_chaser, move_fireworks, move_player};
use crate::rng::Rng;
use crate::room::{self, Link, RoomLoad};
use crate::scheduler::{SharedState, Snapshot};
use crate::spawn::run_spawners;
use crate::telemetry::Frame;
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    Welcome,
    Running,
    Pause,
    GameOver,
}

/// Both analog channels, already scaled to `0..=ANALOG_MAX`.
/// `left` biases character speed, `right` biases wall drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Analog {
    pub left: u8,
    pub right: u8,
}

/// What happened during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A room change is waiting on [`Game::load_room`].
    pub room_load: bool,
    pub lives_lost: u32,
    pub points: u32,
    /// Most attempts any chaser bounce needed this frame.
    pub bounce_attempts: u8,
}

pub struct Game {
    pub world: World,
    pub rng: Rng,
    controls: Controls,
    state: GameState,
    room_load_pending: bool,
}

impl Game {
    pub fn new(rng: Rng) -> Self {
        Self {
            world: World::new(Sprites::prepare()),
            rng,
            controls: Controls::new(),
            state: GameState::Welcome,
            room_load_pending: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn room_load_pending(&self) -> bool {
        self.room_load_pending
    }

    /// Feed the switches while a screen is up. True on a confirm press.
    pub fn poll_confirm(&mut self, switches: Switches) -> bool {
        let cmds = self.controls.update(switches, None);
        matches!(self.state, GameState::Welcome | GameState::GameOver) && cmds.confirm
    }

    /// Start a fresh session from the welcome or game-over screen.
    pub fn confirm(&mut self, shared: &SharedState) {
        self.world.reset_session(&mut self.rng);
        shared.reset_clock();
        shared.set_paused(false);
        shared.publish_super(false, 0);
        self.room_load_pending = false;
        self.state = GameState::Running;
        log::info!("game start");
    }

    /// Run the room-load exchange for the pending room change.
    pub fn load_room(&mut self, link: &mut impl Link) -> RoomLoad {
        let report = room::load_room(&mut self.world, link);
        self.room_load_pending = false;
        report
    }

    pub fn tick(
        &mut self,
        snap: &Snapshot,
        analog: Analog,
        shared: &SharedState,
        link: &mut impl Link,
    ) -> TickReport {
        let mut report = TickReport::default();
        if !matches!(self.state, GameState::Running | GameState::Pause) || self.room_load_pending {
            report.room_load = self.room_load_pending;
            return report;
        }

        let now = snap.time.total_seconds();
        if self.world.super_mode.expired(now) {
            self.world.clear_super();
            log::debug!("super mode over at {}s", now);
        }

        let key = if self.world.level == FINAL_ROOM {
            let key = link.read_byte();
            if key.is_some() {
                link.flush_input();
            }
            key
        } else {
            None
        };
        let cmds = self.controls.update(snap.switches, key);

        if cmds.toggle_pause {
            self.state = match self.state {
                GameState::Running => GameState::Pause,
                _ => GameState::Running,
            };
            shared.set_paused(self.state == GameState::Pause);
            log::info!("{:?}", self.state);
        }
        if cmds.skip_room {
            self.advance_room();
        }

        if self.state == GameState::Running && !self.room_load_pending {
            let world = &mut self.world;
            drift_walls(&mut world.walls, snap.drift_steps, analog.right);
            if let Some(dir) = cmds.direction {
                move_player(world, dir, analog.left);
            }
            if cmds.fire {
                launch_firework(world);
            }
            report.bounce_attempts = move_chaser(world, &mut self.rng, analog.left);
            move_fireworks(world);

            if self.resolve_collisions(now, &mut report) {
                self.advance_room();
            }
            if self.state == GameState::Running && !self.room_load_pending {
                run_spawners(&mut self.world, &mut self.rng, now);
            }
        }

        if self.world.jerry.lives == 0 && self.state != GameState::GameOver {
            self.state = GameState::GameOver;
            self.room_load_pending = false;
            log::info!("out of lives, score {}", self.world.jerry.score);
        }

        let sup = self.world.super_mode;
        shared.publish_super(sup.active, sup.elapsed(now));

        if self.world.level == FINAL_ROOM
            && matches!(self.state, GameState::Running | GameState::Pause)
        {
            Frame::capture(&self.world, snap.time, self.state == GameState::Pause).send(link);
        }

        report.room_load = self.room_load_pending;
        report
    }

    /// Door or skip: on to the next room, or game over from the last one.
    fn advance_room(&mut self) {
        if self.world.level >= FINAL_ROOM {
            self.state = GameState::GameOver;
            log::info!("final room done, score {}", self.world.jerry.score);
            return;
        }
        self.world.level += 1;
        self.world.reset_objects();
        self.room_load_pending = true;
        log::info!("entering room {}", self.world.level);
    }

    /// Apply every contact for this frame. Returns true when the runner reached the door.
    fn resolve_collisions(&mut self, now: u32, report: &mut TickReport) -> bool {
        let w = &mut self.world;

        if obj_collided(w.jerry.body(), w.tom.body()) {
            if w.super_mode.active {
                w.jerry.score += 1;
                report.points += 1;
            } else {
                w.jerry.lives = w.jerry.lives.saturating_sub(1);
                w.jerry.reset_to_origin();
                report.lives_lost += 1;
            }
            w.tom.reset_to_origin();
            log::debug!("tom contact: lives {} score {}", w.jerry.lives, w.jerry.score);
        }

        for i in 0..w.cheese.len() {
            if obj_collided(w.jerry.body(), &w.cheese[i]) {
                w.cheese[i].active = false;
                w.jerry.score += 1;
                w.cheese_total += 1;
                w.cheese_in_room += 1;
                w.timers.cheese = now;
                report.points += 1;
                log::debug!("cheese {} taken, {} this room", i, w.cheese_in_room);
            }
        }

        if !w.super_mode.active {
            for i in 0..w.traps.len() {
                if obj_collided(w.jerry.body(), &w.traps[i]) {
                    w.traps[i].active = false;
                    w.jerry.lives = w.jerry.lives.saturating_sub(1);
                    w.timers.trap = now;
                    report.lives_lost += 1;
                    log::debug!("trap {} sprung, lives {}", i, w.jerry.lives);
                }
            }
        }

        let at_door = obj_collided(w.jerry.body(), &w.door);

        if obj_collided(w.jerry.body(), &w.milk) {
            w.milk.active = false;
            w.make_super(now);
            log::debug!("super mode from {}s", now);
        }

        let tom = *w.tom.body();
        if w.fireworks.iter().any(|f| obj_collided(&tom, &f.body)) {
            w.jerry.score += 1;
            report.points += 1;
            w.tom.reset_to_origin();
            for f in w.fireworks.iter_mut() {
                f.body.active = false;
            }
            log::debug!("firework hit, score {}", w.jerry.score);
        }

        at_door
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Coord;

    struct Silent;

    impl Link for Silent {
        fn read_byte(&mut self) -> Option<u8> {
            None
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    fn running() -> (Game, SharedState) {
        let shared = SharedState::new();
        let mut game = Game::new(Rng::new(7));
        game.confirm(&shared);
        (game, shared)
    }

    #[test]
    fn pause_freezes_chaser() {
        let (mut game, shared) = running();
        let mut snap = Snapshot::default();
        game.tick(&snap, Analog::default(), &shared, &mut Silent);

        snap.switches = Switches::NONE.with(crate::debounce::Switch::ButtonRight);
        game.tick(&snap, Analog::default(), &shared, &mut Silent);
        assert_eq!(game.state(), GameState::Pause);
        assert!(shared.is_paused());

        let before = game.world.tom.pos();
        game.tick(&snap, Analog::default(), &shared, &mut Silent);
        assert_eq!(game.world.tom.pos(), before);
    }

    #[test]
    fn door_in_last_room_ends_game() {
        let (mut game, shared) = running();
        game.world.level = FINAL_ROOM;
        game.world.door.active = true;
        game.world.door.pos = game.world.jerry.pos();
        game.world.tom.mobile.body.pos = Coord::new(70.0, 30.0);
        game.world.tom.mobile.motion.origin = Coord::new(70.0, 30.0);
        game.tick(&Snapshot::default(), Analog::default(), &shared, &mut Silent);
        assert_eq!(game.state(), GameState::GameOver);
    }
}
