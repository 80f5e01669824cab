//! Monochrome frame rendering onto any embedded-graphics target.
//!
//! Everything is drawn in the 84×48 logical resolution; the firmware scales
//! it up to the panel.

use core::fmt::Write as _;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;

use crate::config::{GAME_CEILING, SCREEN_H, SCREEN_W};
use crate::entity::Body;
use crate::scheduler::GameTime;
use crate::telemetry::status_line;
use crate::world::World;

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_4X6, BinaryColor::On)
}

fn centred<D>(display: &mut D, y: i32, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let layout = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(text, Point::new(SCREEN_W / 2, y), text_style(), layout).draw(display)?;
    Ok(())
}

/// Light every set pixel of a body's direct bitmap.
pub fn draw_body<D>(display: &mut D, body: &Body) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if !body.active {
        return Ok(());
    }
    let (x, y) = body.pos.pixel();
    let bitmap = body.bitmap;
    let pixels = (0..body.width)
        .flat_map(|col| (0..body.height).map(move |row| (col, row)))
        .filter(|&(col, row)| bitmap.is_set(col, row))
        .map(|(col, row)| Pixel(Point::new(x + col, y + row), BinaryColor::On));
    display.draw_iter(pixels)
}

pub fn draw_walls<D>(display: &mut D, world: &World) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for wall in world.walls.iter().filter(|w| w.active) {
        let pixels = wall
            .segment
            .pixels()
            .map(|(x, y)| Pixel(Point::new(x, y), BinaryColor::On));
        display.draw_iter(pixels)?;
    }
    Ok(())
}

/// Status text plus the separator row just above the playfield.
pub fn draw_status_bar<D>(display: &mut D, world: &World, time: GameTime) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let line = status_line(world.level, world.jerry.lives, world.jerry.score, time);
    Text::with_baseline(&line, Point::new(0, 1), text_style(), Baseline::Top).draw(display)?;
    Line::new(
        Point::new(0, GAME_CEILING - 1),
        Point::new(SCREEN_W - 1, GAME_CEILING - 1),
    )
    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
    .draw(display)?;
    Ok(())
}

/// One full playfield frame.
pub fn draw_frame<D>(display: &mut D, world: &World, time: GameTime) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off)?;
    draw_walls(display, world)?;
    for body in world.cheese.iter().chain(world.traps.iter()) {
        draw_body(display, body)?;
    }
    draw_body(display, &world.door)?;
    for fw in world.fireworks.iter() {
        draw_body(display, &fw.body)?;
    }
    draw_body(display, &world.milk)?;
    draw_body(display, world.tom.body())?;
    draw_body(display, world.jerry.body())?;
    draw_status_bar(display, world, time)
}

pub fn draw_welcome<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off)?;
    centred(display, 3, "T&J's Quibble")?;
    centred(display, SCREEN_H / 4 * 3 + 2, "Cont: R")
}

pub fn draw_game_over<D>(display: &mut D, score: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off)?;
    centred(display, 3, "GAME OVER")?;
    let mut buf = String::<16>::new();
    core::write!(buf, "Score: {}", score).ok();
    centred(display, SCREEN_H / 4 + 2, &buf)?;
    centred(display, SCREEN_H / 4 * 3 + 2, "Restart: R")
}
