//! Terminal canvas
//!
//! Rasterizes shapes into a pixel grid two pixels tall per character cell,
//! then prints each cell as an upper half block with the top pixel as the
//! foreground and the bottom pixel as the background.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;

use super::{Canvas, Rgba, Shape};
use crate::sim::Arena;
use crate::ui::HudSnapshot;

const HUD_FG: Color = Color::White;
const HUD_DIM: Color = Color::DarkGrey;
const HUD_XP: Color = Color::Cyan;
const XP_BAR_WIDTH: usize = 20;

/// Rows reserved above the arena for the HUD
pub const HUD_ROWS: u16 = 1;

/// A canvas backed by terminal character cells
pub struct TerminalCanvas {
    cols: u16,
    /// Character rows used by the arena (excluding the HUD)
    rows: u16,
    /// Pixels per world unit
    scale: Vec2,
    pixels: Vec<[u8; 3]>,
}

impl TerminalCanvas {
    /// Fit `arena` into a `cols` × `rows` terminal, leaving room for the HUD
    pub fn new(cols: u16, rows: u16, arena: &Arena) -> Self {
        let arena_rows = rows.saturating_sub(HUD_ROWS).max(1);
        let cols = cols.max(1);
        let scale = Vec2::new(
            cols as f32 / arena.width,
            (arena_rows as f32 * 2.0) / arena.height,
        );
        Self {
            cols,
            rows: arena_rows,
            scale,
            pixels: vec![[0; 3]; cols as usize * arena_rows as usize * 2],
        }
    }

    pub fn pixel_width(&self) -> usize {
        self.cols as usize
    }

    pub fn pixel_height(&self) -> usize {
        self.rows as usize * 2
    }

    /// Color of the pixel at (`px`, `py`)
    pub fn pixel(&self, px: usize, py: usize) -> [u8; 3] {
        self.pixels[py * self.pixel_width() + px]
    }

    /// World position of a pixel's center
    fn pixel_center(&self, px: usize, py: usize) -> Vec2 {
        Vec2::new((px as f32 + 0.5) / self.scale.x, (py as f32 + 0.5) / self.scale.y)
    }

    /// Pixel ranges covering a world-space bounding box
    fn pixel_bounds(&self, min: Vec2, max: Vec2) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let to_range = |lo: f32, hi: f32, limit: usize| {
            let start = lo.floor().max(0.0) as usize;
            let end = (hi.ceil().max(0.0) as usize + 1).min(limit);
            start.min(end)..end
        };
        (
            to_range(min.x * self.scale.x, max.x * self.scale.x, self.pixel_width()),
            to_range(min.y * self.scale.y, max.y * self.scale.y, self.pixel_height()),
        )
    }

    /// Blend `color` over every pixel whose center passes `inside`
    fn fill(&mut self, min: Vec2, max: Vec2, color: Rgba, inside: impl Fn(Vec2) -> bool) {
        let (xs, ys) = self.pixel_bounds(min, max);
        let width = self.pixel_width();
        for py in ys {
            for px in xs.clone() {
                if inside(self.pixel_center(px, py)) {
                    let idx = py * width + px;
                    self.pixels[idx] = color.over(self.pixels[idx]);
                }
            }
        }
    }

    fn plot_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        let from_px = from * self.scale;
        let to_px = to * self.scale;
        let steps = (to_px - from_px).abs().max_element().ceil().max(1.0) as usize;
        let (w, h) = (self.pixel_width() as f32, self.pixel_height() as f32);
        let mut last = None;
        for i in 0..=steps {
            let p = from_px.lerp(to_px, i as f32 / steps as f32);
            if p.x < 0.0 || p.y < 0.0 || p.x >= w || p.y >= h {
                continue;
            }
            let cell = (p.x as usize, p.y as usize);
            if last == Some(cell) {
                continue;
            }
            last = Some(cell);
            let idx = cell.1 * self.pixel_width() + cell.0;
            self.pixels[idx] = color.over(self.pixels[idx]);
        }
    }

    /// Darken the whole arena, as behind an overlay
    pub fn dim(&mut self, alpha: f32) {
        let shade = Rgba::rgba(0, 0, 0, alpha);
        for px in &mut self.pixels {
            *px = shade.over(*px);
        }
    }

    /// Print the HUD row and the arena, plus the game-over banner if given
    pub fn present<W: Write>(
        &self,
        out: &mut W,
        hud: &HudSnapshot,
        game_over: Option<&str>,
    ) -> std::io::Result<()> {
        draw_hud(out, hud, self.cols)?;

        for row in 0..self.rows as usize {
            out.queue(cursor::MoveTo(0, row as u16 + HUD_ROWS))?;
            for col in 0..self.cols as usize {
                let [tr, tg, tb] = self.pixel(col, row * 2);
                let [br, bg, bb] = self.pixel(col, row * 2 + 1);
                out.queue(style::SetForegroundColor(Color::Rgb { r: tr, g: tg, b: tb }))?;
                out.queue(style::SetBackgroundColor(Color::Rgb { r: br, g: bg, b: bb }))?;
                out.queue(Print('▀'))?;
            }
        }
        out.queue(style::ResetColor)?;

        if let Some(lines) = game_over {
            draw_banner(out, lines, self.cols, self.rows)?;
        }

        out.queue(cursor::MoveTo(0, 0))?;
        out.flush()
    }
}

impl Canvas for TerminalCanvas {
    fn clear(&mut self, color: Rgba) {
        let base = color.over([0, 0, 0]);
        self.pixels.fill(base);
    }

    fn draw(&mut self, shape: &Shape) {
        match *shape {
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                let r = Vec2::splat(radius);
                self.fill(center - r, center + r, color, |p| {
                    p.distance_squared(center) <= radius * radius
                });
            }
            Shape::Ellipse {
                center,
                radii,
                rotation,
                color,
            } => {
                if radii.x <= 0.0 || radii.y <= 0.0 {
                    return;
                }
                let reach = Vec2::splat(radii.max_element());
                let unrotate = Vec2::from_angle(-rotation);
                self.fill(center - reach, center + reach, color, |p| {
                    let local = unrotate.rotate(p - center) / radii;
                    local.length_squared() <= 1.0
                });
            }
            Shape::Line { from, to, color } => self.plot_line(from, to, color),
        }
    }
}

fn draw_hud<W: Write>(out: &mut W, hud: &HudSnapshot, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(style::SetForegroundColor(HUD_FG))?;
    out.queue(Print(format!(
        " Lv {}  HP {:>3}  {} ",
        hud.level, hud.health, hud.time
    )))?;

    let filled = ((hud.xp_percent / 100.0) * XP_BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(XP_BAR_WIDTH);
    out.queue(style::SetForegroundColor(HUD_XP))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(style::SetForegroundColor(HUD_DIM))?;
    out.queue(Print("░".repeat(XP_BAR_WIDTH - filled)))?;

    let hint = "WASD/arrows move  SPACE fire  Q quit";
    if cols as usize > 60 + hint.len() {
        out.queue(cursor::MoveTo(cols - hint.len() as u16 - 1, 0))?;
        out.queue(Print(hint))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_banner<W: Write>(out: &mut W, text: &str, cols: u16, rows: u16) -> std::io::Result<()> {
    let lines: Vec<&str> = text.lines().collect();
    let top = (rows / 2 + HUD_ROWS).saturating_sub(lines.len() as u16 / 2);
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(style::SetBackgroundColor(Color::Black))?;
    for (i, line) in lines.iter().enumerate() {
        let x = (cols / 2).saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(x, top + i as u16))?;
        out.queue(Print(line))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    fn canvas() -> TerminalCanvas {
        // 1 pixel per world unit: 100 cols, 50 arena rows = 100 pixel rows
        TerminalCanvas::new(100, 51, &Arena::new(100.0, 100.0))
    }

    #[test]
    fn test_dimensions() {
        let c = canvas();
        assert_eq!(c.pixel_width(), 100);
        assert_eq!(c.pixel_height(), 100);
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut c = canvas();
        c.clear(Rgba::rgb(1, 2, 3));
        assert_eq!(c.pixel(0, 0), [1, 2, 3]);
        assert_eq!(c.pixel(99, 99), [1, 2, 3]);
    }

    #[test]
    fn test_circle_rasterizes_inside_only() {
        let mut c = canvas();
        c.clear(Rgba::rgb(0, 0, 0));
        c.draw(&Shape::Circle {
            center: Vec2::new(50.0, 50.0),
            radius: 10.0,
            color: RED,
        });
        assert_eq!(c.pixel(50, 50), [255, 0, 0]);
        assert_eq!(c.pixel(58, 50), [255, 0, 0]);
        assert_eq!(c.pixel(62, 50), [0, 0, 0]);
        assert_eq!(c.pixel(57, 57), [0, 0, 0]);
    }

    #[test]
    fn test_offscreen_shapes_are_clipped() {
        let mut c = canvas();
        c.clear(Rgba::rgb(0, 0, 0));
        c.draw(&Shape::Circle {
            center: Vec2::new(-40.0, -40.0),
            radius: 10.0,
            color: RED,
        });
        c.draw(&Shape::Circle {
            center: Vec2::new(0.0, 0.0),
            radius: 3.0,
            color: RED,
        });
        assert_eq!(c.pixel(0, 0), [255, 0, 0]);
        assert_eq!(c.pixel(5, 5), [0, 0, 0]);
    }

    #[test]
    fn test_rotated_ellipse() {
        let mut c = canvas();
        c.clear(Rgba::rgb(0, 0, 0));
        // Long axis along y after a quarter turn
        c.draw(&Shape::Ellipse {
            center: Vec2::new(50.0, 50.0),
            radii: Vec2::new(20.0, 4.0),
            rotation: std::f32::consts::FRAC_PI_2,
            color: RED,
        });
        assert_eq!(c.pixel(50, 65), [255, 0, 0]);
        assert_eq!(c.pixel(65, 50), [0, 0, 0]);
    }

    #[test]
    fn test_alpha_blending_line() {
        let mut c = canvas();
        c.clear(Rgba::rgb(0, 0, 0));
        c.draw(&Shape::Line {
            from: Vec2::new(0.0, 10.5),
            to: Vec2::new(99.0, 10.5),
            color: Rgba::rgba(200, 200, 200, 0.5),
        });
        assert_eq!(c.pixel(40, 10), [100, 100, 100]);
        assert_eq!(c.pixel(40, 11), [0, 0, 0]);
    }

    #[test]
    fn test_dim_darkens() {
        let mut c = canvas();
        c.clear(Rgba::rgb(200, 100, 50));
        c.dim(0.6);
        assert_eq!(c.pixel(10, 10), [80, 40, 20]);
    }

    #[test]
    fn test_present_writes_frame() {
        let c = canvas();
        let hud = HudSnapshot {
            level: 3,
            health: 77,
            time: "1:02".to_string(),
            xp_percent: 50.0,
        };
        let mut out = Vec::new();
        c.present(&mut out, &hud, Some("Game over")).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Lv 3"));
        assert!(text.contains("HP  77"));
        assert!(text.contains("1:02"));
        assert!(text.contains("Game over"));
        assert!(text.contains('▀'));
    }
}
