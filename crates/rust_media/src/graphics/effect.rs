//! Per-pixel effects
//!
//! An [`Effect`] is a fragment function run by [`Canvas::apply`] over every
//! pixel of the canvas. It reads from an immutable snapshot of the canvas,
//! so neighbouring samples never see already-processed pixels.
//!
//! [`Canvas::apply`]: super::Canvas::apply

use image::RgbaImage;

use super::Color;
use crate::foundation::math::Vector2f;

/// What a fragment function gets to see
#[derive(Debug, Clone, Copy)]
pub struct FragmentInput<'a> {
    /// Pixel column
    pub x: u32,
    /// Pixel row
    pub y: u32,
    /// Snapshot of the canvas before the effect
    pub source: &'a RgbaImage,
}

impl FragmentInput<'_> {
    /// Normalized coordinates of the pixel centre, both in `[0, 1]`
    pub fn uv(&self) -> Vector2f {
        let (width, height) = self.source.dimensions();
        Vector2f::new(
            (self.x as f32 + 0.5) / width.max(1) as f32,
            (self.y as f32 + 0.5) / height.max(1) as f32,
        )
    }

    /// Nearest sample at normalized coordinates, clamped to the edges
    pub fn sample(&self, uv: Vector2f) -> Color {
        let (width, height) = self.source.dimensions();
        let x = (uv.x * width as f32).floor() as i64;
        let y = (uv.y * height as f32).floor() as i64;
        self.texel(x, y)
    }

    /// Pixel at integer coordinates, clamped to the edges
    pub fn texel(&self, x: i64, y: i64) -> Color {
        let (width, height) = self.source.dimensions();
        if width == 0 || height == 0 {
            return super::colors::TRANSPARENT;
        }
        let x = x.clamp(0, i64::from(width) - 1) as u32;
        let y = y.clamp(0, i64::from(height) - 1) as u32;
        *self.source.get_pixel(x, y)
    }

    /// The unmodified pixel under this fragment
    pub fn current(&self) -> Color {
        self.texel(i64::from(self.x), i64::from(self.y))
    }
}

/// A full-screen pixel effect
pub trait Effect {
    /// Display name
    fn name(&self) -> &str;

    /// Advance the effect's parameters
    ///
    /// `time` is in seconds since start; `cursor` is the pointer position
    /// normalized to `[0, 1]` on both axes.
    fn update(&mut self, _time: f32, _cursor: Vector2f) {}

    /// Output color of one pixel
    fn fragment(&self, input: &FragmentInput<'_>) -> Color;
}
