//! Minimal pixel canvas for the PNG outputs.
//!
//! Charts here are rectangles and short labels; a full 2D graphics stack
//! would be the heaviest dependency in the binary for the least work. So
//! this is the whole rasterizer: an RGBA buffer, filled rectangles, and
//! scaled text from the embedded 5×7 font. Output goes through the `image`
//! crate's PNG encoder.

use super::font;
use super::{Rgb, RenderError};
use image::{Rgba, RgbaImage};
use std::path::Path;

pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let img = RgbaImage::from_pixel(width, height, pixel(background));
        Self { img }
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let px = pixel(color);
        let x1 = (x + w).min(self.img.width());
        let y1 = (y + h).min(self.img.height());
        for yy in y.min(y1)..y1 {
            for xx in x.min(x1)..x1 {
                self.img.put_pixel(xx, yy, px);
            }
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`, each font pixel
    /// scaled to a `scale`×`scale` block.
    pub fn draw_text(&mut self, x: u32, y: u32, text: &str, scale: u32, color: Rgb) {
        let mut cursor = x;
        for c in text.chars() {
            let rows = font::glyph(c);
            for (row_idx, row) in rows.iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH {
                    if row & (1 << (font::GLYPH_WIDTH - 1 - col)) != 0 {
                        self.fill_rect(
                            cursor + col * scale,
                            y + row_idx as u32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            cursor += font::ADVANCE * scale;
        }
    }

    /// Pixel width of `text` at `scale`.
    pub fn text_width(text: &str, scale: u32) -> u32 {
        font::text_width(text) * scale
    }

    /// Pixel height of one text line at `scale`.
    pub fn text_height(scale: u32) -> u32 {
        font::GLYPH_HEIGHT * scale
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.img.save(path)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn pixel_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let p = self.img.get_pixel(x, y);
        (p[0], p[1], p[2])
    }
}

fn pixel(color: Rgb) -> Rgba<u8> {
    Rgba([color.0, color.1, color.2, 255])
}
