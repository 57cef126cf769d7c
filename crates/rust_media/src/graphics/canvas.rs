//! CPU render target

use image::{Rgba, RgbaImage};

use super::effect::{Effect, FragmentInput};
use super::text::Text;
use super::texture::Texture;
use super::Color;
use crate::foundation::math::{FloatRect, IntRect, Vector2f, Vector2u};

/// An RGBA8 image that textures, text and effects are drawn into
///
/// Drawing uses nearest sampling and source-over blending; the source is
/// multiplied by a tint color first.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Size in pixels
    pub fn size(&self) -> Vector2u {
        Vector2u::new(self.image.width(), self.image.height())
    }

    /// The rendered pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take the rendered pixels
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fill with a single color
    pub fn clear(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Draw a whole texture with its top-left corner at `position`
    ///
    /// Nothing is drawn for a released texture.
    pub fn draw_texture(&mut self, texture: &Texture, position: Vector2f, tint: Color) {
        let image = &mut self.image;
        texture.with_pixels(|source| {
            let (width, height) = source.dimensions();
            let source_rect = IntRect::new(0, 0, width as i32, height as i32);
            let target = FloatRect::new(position.x, position.y, width as f32, height as f32);
            blit(image, source, source_rect, target, tint);
        });
    }

    /// Draw laid-out text with its fill color
    pub fn draw_text(&mut self, text: &Text<'_>) {
        let quads = text.layout();
        if quads.is_empty() {
            return;
        }
        let origin = text.position();
        let tint = text.fill_color();
        let image = &mut self.image;
        text.font().with_page(text.character_size(), |page| {
            for quad in &quads {
                let target = FloatRect::new(
                    quad.bounds.left + origin.x,
                    quad.bounds.top + origin.y,
                    quad.bounds.width,
                    quad.bounds.height,
                );
                blit(image, page, quad.texture_rect, target, tint);
            }
        });
    }

    /// Replace every pixel with the effect's fragment output
    pub fn apply(&mut self, effect: &dyn Effect) {
        let snapshot = self.image.clone();
        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            *pixel = effect.fragment(&FragmentInput {
                x,
                y,
                source: &snapshot,
            });
        }
    }
}

/// Nearest-sample `source_rect` of `source` onto `target` of `destination`
fn blit(destination: &mut RgbaImage, source: &RgbaImage, source_rect: IntRect, target: FloatRect, tint: Color) {
    if source_rect.is_empty() || target.is_empty() {
        return;
    }
    let bounds = FloatRect::new(0.0, 0.0, destination.width() as f32, destination.height() as f32);
    let Some(clipped) = target.intersection(&bounds) else {
        return;
    };

    let x_start = clipped.left.round() as u32;
    let y_start = clipped.top.round() as u32;
    let x_end = (clipped.right().round() as u32).min(destination.width());
    let y_end = (clipped.bottom().round() as u32).min(destination.height());
    let scale_x = source_rect.width as f32 / target.width;
    let scale_y = source_rect.height as f32 / target.height;

    for y in y_start..y_end {
        let v = ((y as f32 + 0.5 - target.top) * scale_y).floor() as i32;
        let sy = (source_rect.top + v.clamp(0, source_rect.height - 1)) as u32;
        for x in x_start..x_end {
            let u = ((x as f32 + 0.5 - target.left) * scale_x).floor() as i32;
            let sx = (source_rect.left + u.clamp(0, source_rect.width - 1)) as u32;
            if sx >= source.width() || sy >= source.height() {
                continue;
            }
            let src = modulate(*source.get_pixel(sx, sy), tint);
            let dst = destination.get_pixel_mut(x, y);
            *dst = blend_over(src, *dst);
        }
    }
}

fn modulate(color: Color, tint: Color) -> Color {
    let channel = |a: u8, b: u8| ((u16::from(a) * u16::from(b) + 127) / 255) as u8;
    Rgba([
        channel(color[0], tint[0]),
        channel(color[1], tint[1]),
        channel(color[2], tint[2]),
        channel(color[3], tint[3]),
    ])
}

fn blend_over(src: Color, dst: Color) -> Color {
    let src_alpha = f32::from(src[3]) / 255.0;
    if src_alpha >= 1.0 {
        return src;
    }
    if src_alpha <= 0.0 {
        return dst;
    }
    let dst_alpha = f32::from(dst[3]) / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    let channel = |s: u8, d: u8| {
        let value = (f32::from(s) * src_alpha + f32::from(d) * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
