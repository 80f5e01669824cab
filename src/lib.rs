//! Quibble: a cat-and-mouse arcade game for an 84×48 monochrome display.
//!
//! The runner (Jerry) collects cheese, dodges traps and the chaser (Tom), and
//! leaves each room through a door that opens once enough cheese is taken.
//! Room one is built in; room two arrives over the serial link.
//!
//! The crate holds the whole simulation and builds for the host as well as
//! the target. The firmware binary (`firmware` feature) wires it to the
//! RP2040: embassy tasks for the periodic timers, GPIO and ADC for input, an
//! ST7789 panel for output and UART for the room-load exchange.

#![cfg_attr(not(test), no_std)]

pub mod bitmap;
pub mod collision;
pub mod config;
pub mod debounce;
pub mod entity;
pub mod game;
pub mod input;
pub mod movement;
pub mod render;
pub mod rng;
pub mod room;
pub mod scheduler;
pub mod segment;
pub mod spawn;
pub mod telemetry;
pub mod world;

pub use game::{Analog, Game, GameState, TickReport};
pub use room::{Link, RoomError, RoomLoad};
pub use scheduler::{FastTask, GameTime, MediumTask, Scheduler, SharedState, Snapshot};
pub use world::World;
