//! Rendering module
//!
//! The simulation never draws. `draw_world` walks a `World` and hands
//! primitive shapes to any `Canvas`; the terminal canvas is one such surface.

pub mod shapes;
pub mod terminal;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use shapes::draw_world;
pub use terminal::TerminalCanvas;

/// Straight (non-premultiplied) color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity, 0-1
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha-blend `self` over an opaque `base`
    pub fn over(self, base: [u8; 3]) -> [u8; 3] {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| (top as f32 * a + bottom as f32 * (1.0 - a)).round() as u8;
        [mix(self.r, base[0]), mix(self.g, base[1]), mix(self.b, base[2])]
    }
}

/// A primitive in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    /// Axis radii before rotation (radians)
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
    },
}

/// A "draw this shape" surface
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Rgba);
    fn draw(&mut self, shape: &Shape);
}
