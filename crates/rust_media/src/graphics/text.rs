//! Text layout
//!
//! [`Text`] turns a string into positioned glyph quads using the metrics of
//! a borrowed [`Font`]. Laying out loads every glyph it touches into the
//! font's page for the text's character size, so the quads' texture
//! rectangles are valid for that page right after [`Text::layout`].

use bitflags::bitflags;

use super::font::Font;
use super::{colors, Color};
use crate::foundation::math::{FloatRect, IntRect, Vector2f};

bitflags! {
    /// Text decorations
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextStyle: u32 {
        /// Synthesized bold glyphs
        const BOLD = 1 << 0;
        /// A line under every text line
        const UNDERLINED = 1 << 1;
    }
}

/// One textured rectangle produced by layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Destination rectangle in text-local coordinates
    pub bounds: FloatRect,
    /// Source rectangle in the page texture
    pub texture_rect: IntRect,
}

// The 2x2 opaque block every page reserves in its corner
const SOLID_TEXTURE_RECT: IntRect = IntRect::new(0, 0, 2, 2);

/// A drawable string
#[derive(Debug, Clone)]
pub struct Text<'f> {
    string: String,
    font: &'f Font,
    character_size: u32,
    style: TextStyle,
    fill_color: Color,
    position: Vector2f,
}

impl<'f> Text<'f> {
    /// Create white, regular text at the origin
    pub fn new(string: impl Into<String>, font: &'f Font, character_size: u32) -> Self {
        Self {
            string: string.into(),
            font,
            character_size,
            style: TextStyle::empty(),
            fill_color: colors::WHITE,
            position: Vector2f::zeros(),
        }
    }

    /// The displayed string
    pub fn string(&self) -> &str {
        &self.string
    }

    /// Replace the displayed string
    pub fn set_string(&mut self, string: impl Into<String>) {
        self.string = string.into();
    }

    /// Font used for layout
    pub const fn font(&self) -> &'f Font {
        self.font
    }

    /// Character size in pixels
    pub const fn character_size(&self) -> u32 {
        self.character_size
    }

    /// Change the character size
    pub fn set_character_size(&mut self, character_size: u32) {
        self.character_size = character_size;
    }

    /// Current decorations
    pub const fn style(&self) -> TextStyle {
        self.style
    }

    /// Change decorations
    pub fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    /// Color glyphs are tinted with
    pub const fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Change the tint
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Position of the text's local origin on the target
    pub const fn position(&self) -> Vector2f {
        self.position
    }

    /// Move the text
    pub fn set_position(&mut self, position: Vector2f) {
        self.position = position;
    }

    /// Lay the string out into quads
    ///
    /// The first baseline sits at `character_size`; each `'\n'` moves down
    /// by the font's line spacing. Spaces and tabs only advance the pen.
    pub fn layout(&self) -> Vec<GlyphQuad> {
        let size = self.character_size;
        let bold = self.style.contains(TextStyle::BOLD);
        let underlined = self.style.contains(TextStyle::UNDERLINED);

        let space = self.font.glyph(u32::from(' '), size, bold, 0.0).advance;
        let line_spacing = self.font.line_spacing(size);

        let mut quads = Vec::new();
        let mut x = 0.0f32;
        let mut y = size as f32;
        let mut previous = 0u32;

        for ch in self.string.chars() {
            let current = u32::from(ch);
            x += self.font.kerning(previous, current, size);
            previous = current;

            match ch {
                ' ' => x += space,
                '\t' => x += space * 4.0,
                '\n' => {
                    if underlined && x > 0.0 {
                        quads.push(self.underline(x, y));
                    }
                    x = 0.0;
                    y += line_spacing;
                }
                _ => {
                    let glyph = self.font.glyph(current, size, bold, 0.0);
                    if !glyph.texture_rect.is_empty() {
                        quads.push(GlyphQuad {
                            bounds: FloatRect::new(
                                x + glyph.bounds.left,
                                y + glyph.bounds.top,
                                glyph.bounds.width,
                                glyph.bounds.height,
                            ),
                            texture_rect: glyph.texture_rect,
                        });
                    }
                    x += glyph.advance;
                }
            }
        }

        if underlined && x > 0.0 {
            quads.push(self.underline(x, y));
        }
        quads
    }

    fn underline(&self, width: f32, baseline: f32) -> GlyphQuad {
        let position = self.font.underline_position(self.character_size);
        let thickness = self.font.underline_thickness(self.character_size).max(1.0);
        GlyphQuad {
            bounds: FloatRect::new(0.0, baseline + position - thickness / 2.0, width, thickness),
            texture_rect: SOLID_TEXTURE_RECT,
        }
    }

    /// Bounding box of the laid-out quads in local coordinates
    pub fn local_bounds(&self) -> FloatRect {
        self.layout()
            .into_iter()
            .map(|quad| quad.bounds)
            .reduce(|acc, bounds| acc.union(&bounds))
            .unwrap_or_default()
    }

    /// Bounding box on the target, i.e. [`local_bounds`](Self::local_bounds) moved by the position
    pub fn global_bounds(&self) -> FloatRect {
        let local = self.local_bounds();
        FloatRect::new(
            local.left + self.position.x,
            local.top + self.position.y,
            local.width,
            local.height,
        )
    }
}
