//! Glyph page packing
//!
//! A page is the RGBA texture image holding every glyph rasterized for one
//! character size. Glyphs are packed into shelf rows; the page doubles in
//! size when it runs out of room.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use super::font::Glyph;
use crate::foundation::math::IntRect;

/// Transparent white, so glyph coverage can live in the alpha channel alone
const CLEAR: Rgba<u8> = Rgba([255, 255, 255, 0]);
const OPAQUE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Rows accept glyphs between 70% and 100% of their height
const MIN_ROW_FILL: f32 = 0.7;

/// Identifies one rendition of a glyph inside a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct GlyphKey {
    code_point: u32,
    bold: bool,
    outline_bits: u32,
}

impl GlyphKey {
    pub(crate) fn new(code_point: u32, bold: bool, outline_thickness: f32) -> Self {
        Self {
            code_point,
            bold,
            outline_bits: outline_thickness.to_bits(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    top: u32,
    width: u32,
    height: u32,
}

/// Glyph cache and texture image for one character size
#[derive(Clone)]
pub(crate) struct GlyphPage {
    image: RgbaImage,
    rows: Vec<Row>,
    next_row: u32,
    glyphs: HashMap<GlyphKey, Glyph>,
}

impl GlyphPage {
    pub(crate) fn new(size: u32) -> Self {
        let size = size.max(4);
        let mut image = RgbaImage::from_pixel(size, size, CLEAR);

        // 2x2 opaque block at the origin, sampled for underlines
        for y in 0..2 {
            for x in 0..2 {
                image.put_pixel(x, y, OPAQUE);
            }
        }

        Self {
            image,
            rows: Vec::new(),
            next_row: 3,
            glyphs: HashMap::new(),
        }
    }

    pub(crate) const fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn glyph(&self, key: GlyphKey) -> Option<Glyph> {
        self.glyphs.get(&key).copied()
    }

    pub(crate) fn insert_glyph(&mut self, key: GlyphKey, glyph: Glyph) {
        self.glyphs.insert(key, glyph);
    }

    /// Reserve a `width` x `height` rectangle
    ///
    /// Returns `None` once the page would have to grow past `max_size`.
    pub(crate) fn allocate(&mut self, width: u32, height: u32, max_size: u32) -> Option<IntRect> {
        let mut best: Option<usize> = None;
        let mut best_ratio = 0.0f32;

        for (index, row) in self.rows.iter().enumerate() {
            let ratio = height as f32 / row.height as f32;
            if !(MIN_ROW_FILL..=1.0).contains(&ratio) {
                continue;
            }
            if width > self.image.width() - row.width {
                continue;
            }
            if ratio < best_ratio {
                continue;
            }
            best = Some(index);
            best_ratio = ratio;
        }

        let index = match best {
            Some(index) => index,
            None => {
                let row_height = height + height / 10;
                while self.next_row + row_height >= self.image.height() || width >= self.image.width() {
                    let (current_width, current_height) = self.image.dimensions();
                    if current_width * 2 > max_size || current_height * 2 > max_size {
                        log::error!(
                            "Glyph page is full at {current_width}x{current_height}, cannot fit a {width}x{height} glyph"
                        );
                        return None;
                    }
                    self.grow(current_width * 2, current_height * 2);
                }

                self.rows.push(Row {
                    top: self.next_row,
                    width: 0,
                    height: row_height,
                });
                self.next_row += row_height;
                self.rows.len() - 1
            }
        };

        let row = &mut self.rows[index];
        let rect = IntRect::new(row.width as i32, row.top as i32, width as i32, height as i32);
        row.width += width;
        Some(rect)
    }

    /// Write a coverage bitmap into the alpha channel at (`x`, `y`)
    pub(crate) fn write_coverage(&mut self, x: u32, y: u32, width: u32, height: u32, coverage: &[u8]) {
        for row in 0..height {
            for column in 0..width {
                let alpha = coverage[(row * width + column) as usize];
                self.image.put_pixel(x + column, y + row, Rgba([255, 255, 255, alpha]));
            }
        }
    }

    fn grow(&mut self, width: u32, height: u32) {
        log::debug!(
            "Growing glyph page from {:?} to {width}x{height}",
            self.image.dimensions()
        );
        let mut image = RgbaImage::from_pixel(width, height, CLEAR);
        image::imageops::replace(&mut image, &self.image, 0, 0);
        self.image = image;
    }
}
