//! Wall line segments and the rasterizer shared by drawing and hit-testing.

use libm::{fabsf, sqrtf};

use crate::config::{GAME_CEILING, SCREEN_H, SCREEN_W};
use crate::entity::Coord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Segment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Segment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Every pixel the renderer lights for this segment, in draw order.
    /// Diagonal runs may repeat a pixel.
    pub fn pixels(&self) -> Pixels {
        if self.x1 == self.x2 || self.y1 == self.y2 {
            let steps = (self.x2 - self.x1).abs().max((self.y2 - self.y1).abs()) as u32 + 1;
            return Pixels::Straight {
                x: self.x1,
                y: self.y1,
                step_x: (self.x2 - self.x1).signum(),
                step_y: (self.y2 - self.y1).signum(),
                remaining: steps,
            };
        }

        // walk left to right regardless of endpoint order
        let (x1, y1, x2, y2) = if self.x1 > self.x2 {
            (self.x2, self.y2, self.x1, self.y1)
        } else {
            (self.x1, self.y1, self.x2, self.y2)
        };
        let dx = (x2 - x1) as f32;
        let dy = (y2 - y1) as f32;
        Pixels::Diagonal {
            x: x1,
            x_end: x2,
            y: y1,
            y_end: y2,
            y_step: (y2 - y1).signum(),
            err: 0.0,
            derr: fabsf(dy / dx),
            phase: Phase::Head,
        }
    }

    pub fn covers(&self, x: i32, y: i32) -> bool {
        self.pixels().any(|p| p == (x, y))
    }

    /// Unit vector perpendicular to the segment direction, or zero for a point.
    pub fn normal(&self) -> Coord {
        let dx = (self.x2 - self.x1) as f32;
        let dy = (self.y2 - self.y1) as f32;
        let len = sqrtf(dx * dx + dy * dy);
        if len == 0.0 {
            return Coord::ZERO;
        }
        Coord::new(dy / len, -dx / len)
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x1 += dx;
        self.x2 += dx;
        self.y1 += dy;
        self.y2 += dy;
    }

    /// Bring a segment that has fully left the playfield back in on the far side.
    pub fn wrap_into_view(&mut self) {
        let width = SCREEN_W;
        let height = SCREEN_H - GAME_CEILING;
        if self.x1 >= SCREEN_W && self.x2 >= SCREEN_W {
            self.translate(-width, 0);
        } else if self.x1 < 0 && self.x2 < 0 {
            self.translate(width, 0);
        }
        if self.y1 >= SCREEN_H && self.y2 >= SCREEN_H {
            self.translate(0, -height);
        } else if self.y1 < GAME_CEILING && self.y2 < GAME_CEILING {
            self.translate(0, height);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Head,
    Run,
}

/// Pixel iterator over a [`Segment`].
#[derive(Clone, Debug)]
pub enum Pixels {
    Straight {
        x: i32,
        y: i32,
        step_x: i32,
        step_y: i32,
        remaining: u32,
    },
    Diagonal {
        x: i32,
        x_end: i32,
        y: i32,
        y_end: i32,
        y_step: i32,
        err: f32,
        derr: f32,
        phase: Phase,
    },
}

impl Iterator for Pixels {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Pixels::Straight {
                x,
                y,
                step_x,
                step_y,
                remaining,
            } => {
                if *remaining == 0 {
                    return None;
                }
                let p = (*x, *y);
                *x += *step_x;
                *y += *step_y;
                *remaining -= 1;
                Some(p)
            }
            Pixels::Diagonal {
                x,
                x_end,
                y,
                y_end,
                y_step,
                err,
                derr,
                phase,
            } => loop {
                match phase {
                    Phase::Head => {
                        if *x > *x_end {
                            return None;
                        }
                        *err += *derr;
                        *phase = Phase::Run;
                        return Some((*x, *y));
                    }
                    Phase::Run => {
                        let in_range = if *y_step > 0 { *y <= *y_end } else { *y >= *y_end };
                        if *err >= 0.5 && in_range {
                            let p = (*x, *y);
                            *y += *y_step;
                            *err -= 1.0;
                            return Some(p);
                        }
                        *x += 1;
                        *phase = Phase::Head;
                    }
                }
            },
        }
    }
}
