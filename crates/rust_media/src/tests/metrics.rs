//! Font metrics read through the `Font` wrapper

use super::font_fixture;
use crate::graphics::Font;
use crate::native::Context;
use approx::assert_relative_eq;

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(character_size: u32) -> f32 {
        character_size as f32 / font_fixture::UNITS_PER_EM
    }

    #[test]
    fn test_kerning_scales_with_size() {
        let context = Context::new();
        let font = Font::from_memory(&context, &font_fixture::build()).unwrap();
        let (a, v) = (u32::from('A'), u32::from('V'));

        let at_24 = font.kerning(a, v, 24);
        assert_relative_eq!(at_24, font_fixture::KERNING_UNITS * scale(24), epsilon = 1e-4);
        assert_relative_eq!(font.kerning(a, v, 48), at_24 * 2.0, epsilon = 1e-4);

        assert_eq!(font.kerning(v, a, 24), 0.0);
        assert_eq!(font.kerning(0, a, 24), 0.0);
    }

    #[test]
    fn test_line_spacing() {
        let context = Context::new();
        let font = Font::from_memory(&context, &font_fixture::build()).unwrap();
        assert_relative_eq!(
            font.line_spacing(24),
            font_fixture::LINE_SPACING_UNITS * scale(24),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_underline_from_post_table() {
        let context = Context::new();
        let font = Font::from_memory(&context, &font_fixture::build()).unwrap();

        assert_relative_eq!(
            font.underline_position(24),
            font_fixture::UNDERLINE_POSITION_UNITS * scale(24),
            epsilon = 1e-4
        );
        assert_relative_eq!(
            font.underline_thickness(24),
            font_fixture::UNDERLINE_THICKNESS_UNITS * scale(24),
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_underline_fallback_without_metrics() {
        let context = Context::new();
        let font = Font::from_memory(&context, &font_fixture::build_without_underline()).unwrap();

        assert_relative_eq!(font.underline_position(30), 3.0);
        assert_relative_eq!(font.underline_thickness(30), 3.0);
    }

    #[test]
    fn test_glyph_metrics() {
        let context = Context::new();
        let font = Font::from_memory(&context, &font_fixture::build()).unwrap();

        let glyph = font.glyph(u32::from('A'), 50, false, 0.0);
        assert_relative_eq!(glyph.advance, 30.0);
        assert!(glyph.bounds.top < 0.0, "glyph sits above the baseline");
        assert!(!glyph.texture_rect.is_empty());

        let bold = font.glyph(u32::from('A'), 50, true, 0.0);
        assert!(bold.advance > glyph.advance);
        assert!(bold.bounds.width > glyph.bounds.width);

        let outlined = font.glyph(u32::from('A'), 50, false, 2.0);
        assert_relative_eq!(outlined.bounds.width, glyph.bounds.width + 4.0);

        // Repeated lookups hit the page cache
        assert_eq!(font.glyph(u32::from('A'), 50, false, 0.0), glyph);
    }

    #[test]
    fn test_unusable_outline_thickness_draws_no_outline() {
        let context = Context::new();
        let font = Font::from_memory(&context, &font_fixture::build()).unwrap();
        let plain = font.glyph(u32::from('A'), 24, false, 0.0);

        for thickness in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN, -4.0] {
            let glyph = font.glyph(u32::from('A'), 24, false, thickness);
            assert_eq!(glyph.bounds, plain.bounds);
            assert!(!glyph.texture_rect.is_empty());
        }
    }

    #[test]
    fn test_oversized_glyphs_keep_metrics_without_pixels() {
        let context = Context::new();
        let font = Font::from_memory(&context, &font_fixture::build()).unwrap();
        let plain = font.glyph(u32::from('A'), 24, false, 0.0);

        for thickness in [1e10, 2000.0] {
            let glyph = font.glyph(u32::from('A'), 24, false, thickness);
            assert_relative_eq!(glyph.advance, plain.advance);
            assert!(glyph.texture_rect.is_empty());
        }

        let huge = font.glyph(u32::from('A'), u32::MAX, true, 0.0);
        assert!(huge.advance > 0.0);
        assert!(huge.texture_rect.is_empty());
    }

    #[test]
    fn test_unknown_code_point_uses_notdef() {
        let context = Context::new();
        let font = Font::from_memory(&context, &font_fixture::build()).unwrap();

        let glyph = font.glyph(u32::from('z'), 24, false, 0.0);
        assert_relative_eq!(glyph.advance, 12.0);
        assert!(glyph.texture_rect.is_empty());
    }

    #[test]
    fn test_page_grows_for_large_glyphs() {
        let context = Context::new();
        let mut font = Font::from_memory(&context, &font_fixture::build()).unwrap();
        let initial = context.config().font.initial_page_size;

        let glyph = font.glyph(u32::from('A'), 200, false, 0.0);
        let size = font.texture(200).unwrap().size();

        assert_eq!(size.x, initial * 2);
        assert!(glyph.texture_rect.bottom() as u32 <= size.y);
    }

    #[test]
    fn test_info_of_copy_matches() {
        let context = Context::new();
        let font = Font::from_memory(&context, &font_fixture::build()).unwrap();
        assert_eq!(font.clone().info(), font.info());
    }
}
