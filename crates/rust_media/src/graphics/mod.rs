//! Owned graphics resources and CPU rendering
//!
//! - [`Texture`]: RGBA pixel data owned through the binding layer
//! - [`Font`]: a font face plus its per-size page texture cache
//! - [`Text`]: a laid-out string borrowing a [`Font`]
//! - [`Canvas`]: a CPU render target that textures, text and
//!   [`Effect`]s draw into

mod canvas;
mod effect;
mod font;
mod text;
mod texture;

pub use canvas::Canvas;
pub use effect::{Effect, FragmentInput};
pub use font::Font;
pub use text::{GlyphQuad, Text, TextStyle};
pub use texture::Texture;

pub use crate::native::{FontInfo, Glyph};

/// 8-bit RGBA color
pub type Color = image::Rgba<u8>;

/// Named colors
pub mod colors {
    use super::Color;

    /// Opaque black
    pub const BLACK: Color = image::Rgba([0, 0, 0, 255]);
    /// Opaque white
    pub const WHITE: Color = image::Rgba([255, 255, 255, 255]);
    /// Fully transparent
    pub const TRANSPARENT: Color = image::Rgba([0, 0, 0, 0]);
}
