//! Native font records and their entry points
//!
//! Outlines, metrics and kerning come from `fontdue`; the family name and
//! underline metrics are read from the face tables with `ttf-parser`.

use std::collections::HashMap;
use std::path::Path;

use super::page::{GlyphKey, GlyphPage};
use super::stream::{read_all, InputStream};
use super::texture::NativeTexture;
use super::{FontKey, NativeLibrary, TextureKey};
use crate::error::ResourceKind;
use crate::foundation::math::{FloatRect, IntRect};

/// Glyph metrics and page location, copied out of the binding layer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Glyph {
    /// Horizontal offset to the next glyph
    pub advance: f32,
    /// Bounding box relative to the baseline (y grows downwards)
    pub bounds: FloatRect,
    /// Location of the glyph in its page texture
    pub texture_rect: IntRect,
}

/// Descriptive information about a font
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontInfo {
    /// Family name, empty when the font carries none
    pub family: String,
}

/// Face data extracted once at load time
#[derive(Clone)]
struct FaceTables {
    family: String,
    underline: Option<(i16, i16)>,
    units_per_em: f32,
}

#[derive(Clone)]
pub(crate) struct NativeFont {
    font: fontdue::Font,
    tables: FaceTables,
    pages: HashMap<u32, GlyphPage>,
}

impl NativeFont {
    fn parse(data: &[u8]) -> Result<Self, String> {
        let face = ttf_parser::Face::parse(data, 0).map_err(|e| e.to_string())?;
        let family = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
            .find_map(|name| name.to_string())
            .unwrap_or_default();
        let tables = FaceTables {
            family,
            underline: face.underline_metrics().map(|m| (m.position, m.thickness)),
            units_per_em: f32::from(face.units_per_em()),
        };

        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(str::to_owned)?;

        Ok(Self {
            font,
            tables,
            pages: HashMap::new(),
        })
    }

    fn scale(&self, character_size: u32) -> f32 {
        character_size as f32 / self.tables.units_per_em
    }
}

/// 8-bit coverage bitmap
struct Coverage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Coverage {
    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Square max-filter; grows the bitmap by `radius` on every side
    ///
    /// Runs as a horizontal then a vertical pass. Returns `None` when the
    /// grown bitmap would not be addressable.
    fn dilate(&self, radius: usize) -> Option<Self> {
        let span = radius.checked_mul(2)?;
        let width = self.width.checked_add(span)?;
        let height = self.height.checked_add(span)?;
        let len = width.checked_mul(height)?;

        let mut wide = vec![0u8; width * self.height];
        for y in 0..self.height {
            for x in 0..self.width {
                let value = self.data[y * self.width + x];
                if value == 0 {
                    continue;
                }
                let start = y * width + x;
                for target in &mut wide[start..=start + span] {
                    *target = (*target).max(value);
                }
            }
        }

        let mut data = vec![0u8; len];
        for y in 0..self.height {
            for x in 0..width {
                let value = wide[y * width + x];
                if value == 0 {
                    continue;
                }
                for dy in 0..=span {
                    let target = &mut data[(y + dy) * width + x];
                    *target = (*target).max(value);
                }
            }
        }

        Some(Self { width, height, data })
    }
}

/// Largest bold or outline radius rendered into a page of side `max_page_size`
fn dilation_limit(max_page_size: u32) -> usize {
    (max_page_size / 32).max(1) as usize
}

/// Dilation radius for an outline thickness
///
/// Non-finite and non-positive thicknesses draw no outline. `None` means the
/// radius exceeds `limit`.
fn outline_radius(thickness: f32, limit: usize) -> Option<usize> {
    if !thickness.is_finite() || thickness <= 0.0 {
        return Some(0);
    }
    let radius = thickness.ceil();
    (radius <= limit as f32).then_some(radius as usize)
}

fn to_char(code_point: u32) -> Option<char> {
    if code_point == 0 {
        None
    } else {
        char::from_u32(code_point)
    }
}

impl NativeLibrary {
    pub(crate) fn font_create_from_file(&mut self, path: &Path) -> FontKey {
        match std::fs::read(path) {
            Ok(data) => self.insert_font(&data, &format!("file {}", path.display())),
            Err(err) => {
                log::error!("Failed to read font file {}: {err}", path.display());
                FontKey::default()
            }
        }
    }

    pub(crate) fn font_create_from_memory(&mut self, data: &[u8]) -> FontKey {
        self.insert_font(data, "memory")
    }

    pub(crate) fn font_create_from_stream(&mut self, stream: &mut dyn InputStream) -> FontKey {
        match read_all(stream) {
            Some(data) => self.insert_font(&data, "stream"),
            None => {
                log::error!("Failed to read font from stream");
                FontKey::default()
            }
        }
    }

    pub(crate) fn font_copy(&mut self, key: FontKey) -> FontKey {
        let Some(font) = self.fonts.get(key).cloned() else {
            log::error!("Cannot copy a font handle that is not live");
            return FontKey::default();
        };
        self.record_created(ResourceKind::Font);
        let copy = self.fonts.insert(font);
        log::debug!("Copied font {key:?} into {copy:?}");
        copy
    }

    pub(crate) fn font_destroy(&mut self, key: FontKey) -> bool {
        let destroyed = self.fonts.remove(key).is_some();
        if destroyed {
            log::debug!("Destroyed font {key:?}");
        }
        self.record_destroyed(ResourceKind::Font, destroyed)
    }

    pub(crate) fn font_get_info(&self, key: FontKey) -> FontInfo {
        self.fonts.get(key).map_or_else(FontInfo::default, |font| FontInfo {
            family: font.tables.family.clone(),
        })
    }

    pub(crate) fn font_get_glyph(
        &mut self,
        key: FontKey,
        code_point: u32,
        character_size: u32,
        bold: bool,
        outline_thickness: f32,
    ) -> Glyph {
        let initial_page_size = self.config.font.initial_page_size;
        let max_page_size = self.config.font.max_page_size;
        let padding = self.config.font.glyph_padding;

        let Some(font) = self.fonts.get_mut(key) else {
            return Glyph::default();
        };

        let glyph_key = GlyphKey::new(code_point, bold, outline_thickness);
        if let Some(glyph) = font.pages.get(&character_size).and_then(|page| page.glyph(glyph_key)) {
            return glyph;
        }

        let ch = to_char(code_point).unwrap_or('\u{FFFD}');
        let metrics = font.font.metrics(ch, character_size as f32);
        let has_pixels = metrics.width > 0 && metrics.height > 0;

        let limit = dilation_limit(max_page_size);
        let bold_radius = if bold && has_pixels {
            (character_size / 24).max(1) as usize
        } else {
            0
        };
        let outline = if has_pixels {
            outline_radius(outline_thickness, limit)
        } else {
            Some(0)
        };
        // Glyphs that cannot be rendered into a full-size page keep their metrics but get no pixels
        let page_side = max_page_size as usize;
        let fits = bold_radius <= limit
            && outline.is_some_and(|outline| {
                let border = bold_radius
                    .saturating_add(outline)
                    .saturating_add(padding as usize)
                    .saturating_mul(2);
                metrics.width.saturating_add(border) <= page_side
                    && metrics.height.saturating_add(border) <= page_side
            });
        let grow = (bold_radius + outline.unwrap_or(0)) as f32;

        let mut glyph = Glyph {
            advance: (metrics.advance_width + bold_radius as f32).round(),
            bounds: FloatRect::new(
                metrics.xmin as f32 - grow,
                -(metrics.ymin as f32 + metrics.height as f32) - grow,
                metrics.width as f32 + 2.0 * grow,
                metrics.height as f32 + 2.0 * grow,
            ),
            texture_rect: IntRect::default(),
        };

        let coverage = if fits && has_pixels {
            let (_, data) = font.font.rasterize(ch, character_size as f32);
            let mut coverage = Some(Coverage {
                width: metrics.width,
                height: metrics.height,
                data,
            });
            for radius in [bold_radius, outline.unwrap_or(0)] {
                if radius > 0 {
                    coverage = coverage.and_then(|coverage| coverage.dilate(radius));
                }
            }
            coverage
        } else {
            if has_pixels {
                log::warn!(
                    "Glyph {code_point:#x} at size {character_size} does not fit in a {max_page_size}px page"
                );
            }
            None
        };

        let page = font
            .pages
            .entry(character_size)
            .or_insert_with(|| GlyphPage::new(initial_page_size));

        if let Some(coverage) = coverage.filter(|coverage| !coverage.is_empty()) {
            let width = coverage.width as u32;
            let height = coverage.height as u32;
            if let Some(slot) = page.allocate(width + 2 * padding, height + 2 * padding, max_page_size) {
                let x = slot.left as u32 + padding;
                let y = slot.top as u32 + padding;
                page.write_coverage(x, y, width, height, &coverage.data);
                glyph.texture_rect = IntRect::new(x as i32, y as i32, width as i32, height as i32);
            }
        }

        page.insert_glyph(glyph_key, glyph);
        glyph
    }

    pub(crate) fn font_get_kerning(&self, key: FontKey, first: u32, second: u32, character_size: u32) -> f32 {
        let (Some(font), Some(first), Some(second)) = (self.fonts.get(key), to_char(first), to_char(second)) else {
            return 0.0;
        };
        font.font
            .horizontal_kern(first, second, character_size as f32)
            .unwrap_or(0.0)
    }

    pub(crate) fn font_get_line_spacing(&self, key: FontKey, character_size: u32) -> f32 {
        self.fonts
            .get(key)
            .and_then(|font| font.font.horizontal_line_metrics(character_size as f32))
            .map_or(0.0, |metrics| metrics.new_line_size)
    }

    /// Positive values lie below the baseline
    pub(crate) fn font_get_underline_position(&self, key: FontKey, character_size: u32) -> f32 {
        self.fonts.get(key).map_or(0.0, |font| match font.tables.underline {
            Some((position, _)) => -f32::from(position) * font.scale(character_size),
            None => character_size as f32 / 10.0,
        })
    }

    pub(crate) fn font_get_underline_thickness(&self, key: FontKey, character_size: u32) -> f32 {
        self.fonts.get(key).map_or(0.0, |font| match font.tables.underline {
            Some((_, thickness)) => f32::from(thickness) * font.scale(character_size),
            None => character_size as f32 / 10.0,
        })
    }

    /// Snapshot of the glyph page for `character_size` as a new texture record
    pub(crate) fn font_get_texture(&mut self, key: FontKey, character_size: u32) -> TextureKey {
        if !self.require_active("font_get_texture") {
            return TextureKey::default();
        }
        let initial_page_size = self.config.font.initial_page_size;
        let smooth = self.config.texture.smooth_by_default;

        let Some(font) = self.fonts.get_mut(key) else {
            log::error!("Cannot fetch a page texture from a font handle that is not live");
            return TextureKey::default();
        };
        let image = font
            .pages
            .entry(character_size)
            .or_insert_with(|| GlyphPage::new(initial_page_size))
            .image()
            .clone();

        self.insert_texture(NativeTexture::new(image, smooth))
    }

    /// Read access to a page image without creating a texture record
    pub(crate) fn font_page_image(&self, key: FontKey, character_size: u32) -> Option<&image::RgbaImage> {
        self.fonts
            .get(key)?
            .pages
            .get(&character_size)
            .map(GlyphPage::image)
    }

    fn insert_font(&mut self, data: &[u8], origin: &str) -> FontKey {
        match NativeFont::parse(data) {
            Ok(font) => {
                self.record_created(ResourceKind::Font);
                let key = self.fonts.insert(font);
                log::debug!("Loaded font {key:?} from {origin}");
                key
            }
            Err(err) => {
                log::error!("Failed to load font from {origin}: {err}");
                FontKey::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilate_grows_every_side() {
        let coverage = Coverage {
            width: 1,
            height: 1,
            data: vec![200],
        };
        let dilated = coverage.dilate(1).unwrap();

        assert_eq!((dilated.width, dilated.height), (3, 3));
        assert!(dilated.data.iter().all(|&value| value == 200));
    }

    #[test]
    fn test_dilate_keeps_maximum() {
        let coverage = Coverage {
            width: 2,
            height: 1,
            data: vec![50, 150],
        };
        let dilated = coverage.dilate(1).unwrap();

        assert_eq!(dilated.width, 4);
        assert_eq!(dilated.data[1], 150);
        assert_eq!(dilated.data[0], 50);
    }

    #[test]
    fn test_dilate_rejects_unaddressable_radius() {
        let coverage = Coverage {
            width: 1,
            height: 1,
            data: vec![1],
        };

        assert!(coverage.dilate(usize::MAX).is_none());
        assert!(coverage.dilate(usize::MAX / 4).is_none());
    }

    #[test]
    fn test_outline_radius_ignores_unusable_thickness() {
        let limit = dilation_limit(4096);
        assert_eq!(outline_radius(f32::INFINITY, limit), Some(0));
        assert_eq!(outline_radius(f32::NAN, limit), Some(0));
        assert_eq!(outline_radius(-3.0, limit), Some(0));
        assert_eq!(outline_radius(1.2, limit), Some(2));
        assert_eq!(outline_radius(2000.0, limit), None);
        assert_eq!(outline_radius(1e10, limit), None);
    }

    #[test]
    fn test_null_code_point_has_no_char() {
        assert_eq!(to_char(0), None);
        assert_eq!(to_char(0x41), Some('A'));
        assert_eq!(to_char(0xD800), None);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let mut library = NativeLibrary::new(crate::config::MediaConfig::default());
        let key = library.font_create_from_memory(b"definitely not a font");

        assert!(slotmap::Key::is_null(&key));
        assert_eq!(library.stats(ResourceKind::Font).created, 0);
    }
}
