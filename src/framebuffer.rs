//! Local mirror of the device's pixel grid
//!
//! Drawing primitives accumulate into this in-memory grid; nothing touches
//! the network until the grid is serialized with [`Framebuffer::to_command`]
//! and pushed. Pushing does not clear the grid: the device retains its
//! last frame, and the mirror stays in sync by retaining it too.
//!
//! Coordinates are plain `i32`s and may land outside the grid; the grid is
//! the clip region, so out-of-grid cells are simply not written. Whether a
//! push happens after every primitive or only on request is the caller's
//! policy, not this type's.

use image::RgbImage;

use crate::font;
use crate::types::{Color, Command, GridSize};

/// In-memory `N x N` pixel grid with drawing primitives.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    size: u32,
    cells: Vec<Color>,
}

impl Framebuffer {
    /// Create an all-black grid for one of the native sizes.
    pub fn new(size: GridSize) -> Self {
        let size = size.pixels();
        Self { size, cells: vec![Color::BLACK; (size * size) as usize] }
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Read one cell; `None` outside the grid.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Overwrite one cell. Out-of-grid coordinates are clipped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = color;
        }
    }

    /// Rasterize a line between two points, inclusive of both endpoints.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        // Bresenham, integer-only form.
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.set_pixel(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw an axis-aligned rectangle outline between two corners.
    ///
    /// The corners may be given in any order.
    pub fn draw_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let (left, right) = (x1.min(x2), x1.max(x2));
        let (top, bottom) = (y1.min(y2), y1.max(y2));

        self.draw_line(left, top, right, top, color);
        self.draw_line(left, bottom, right, bottom, color);
        self.draw_line(left, top, left, bottom, color);
        self.draw_line(right, top, right, bottom, color);
    }

    /// Set every cell to the same color, discarding prior contents.
    pub fn fill(&mut self, color: Color) {
        self.cells.fill(color);
    }

    /// Render a single character at the given origin using the built-in
    /// 3x5 font. Characters the font does not cover draw nothing.
    pub fn draw_glyph(&mut self, c: char, x: i32, y: i32, color: Color) {
        let Some(bits) = font::glyph(c) else { return };
        for gy in 0..font::GLYPH_HEIGHT {
            for gx in 0..font::GLYPH_WIDTH {
                if font::pixel_set(bits, gx, gy) {
                    self.set_pixel(x + gx as i32, y + gy as i32, color);
                }
            }
        }
    }

    /// Render a string left-to-right, advancing a fixed pitch per character.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        for (i, c) in text.chars().enumerate() {
            self.draw_glyph(c, x + i as i32 * font::GLYPH_PITCH, y, color);
        }
    }

    /// Blit a decoded RGB image with its top-left corner at `(x, y)`.
    pub fn draw_image(&mut self, img: &RgbImage, x: i32, y: i32) {
        for (ix, iy, px) in img.enumerate_pixels() {
            self.set_pixel(x + ix as i32, y + iy as i32, Color::from(*px));
        }
    }

    /// Serialize the full grid, row-major, into a static draw command.
    ///
    /// The grid itself is left untouched; subsequent primitives accumulate
    /// on top of the pushed state.
    pub fn to_command(&self) -> Command {
        let mut data = Vec::with_capacity(self.cells.len() * 3);
        for cell in &self.cells {
            data.extend_from_slice(&[cell.r, cell.g, cell.b]);
        }
        Command::DrawStatic { dimension: self.size, data }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let size = self.size as i32;
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some((y * size + x) as usize)
    }
}
