#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use quibble::Link;
use quibble::config::{SCREEN_H, SCREEN_W};

/// Serial link fed from a fixed script; everything written is captured.
#[derive(Default)]
pub struct ScriptLink {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
}

impl ScriptLink {
    pub fn new(script: &str) -> Self {
        Self {
            input: script.bytes().collect(),
            output: Vec::new(),
        }
    }

    pub fn sent(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Link for ScriptLink {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }
}

/// 84×48 monochrome framebuffer.
pub struct FrameBuffer {
    pub px: [[bool; SCREEN_W as usize]; SCREEN_H as usize],
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            px: [[false; SCREEN_W as usize]; SCREEN_H as usize],
        }
    }

    pub fn lit(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= SCREEN_W || y >= SCREEN_H {
            return false;
        }
        self.px[y as usize][x as usize]
    }

    pub fn count(&self) -> usize {
        self.px.iter().flatten().filter(|p| **p).count()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_W as u32, SCREEN_H as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if p.x >= 0 && p.y >= 0 && p.x < SCREEN_W && p.y < SCREEN_H {
                self.px[p.y as usize][p.x as usize] = c.is_on();
            }
        }
        Ok(())
    }
}
