//! Ownership and teardown of native records through the wrappers
//!
//! Every test reads the context's per-kind statistics, which count records
//! created, records destroyed and destroy calls on keys that were not live.

use super::font_fixture;
use crate::config::{CacheConfig, MediaConfig, StaleEntryPolicy};
use crate::error::{ResourceKind, ResourceLoadError};
use crate::foundation::logging;
use crate::graphics::{Font, Texture};
use crate::native::{Context, ResourceStats};
use crate::window::Touch;

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_policy(stale_entries: StaleEntryPolicy) -> Context {
        Context::with_config(MediaConfig {
            cache: CacheConfig { stale_entries },
            ..MediaConfig::default()
        })
    }

    fn fixture_font(context: &Context) -> Font {
        logging::init();
        Font::from_memory(context, &font_fixture::build()).unwrap()
    }

    fn stats(created: usize, destroyed: usize) -> ResourceStats {
        ResourceStats {
            created,
            destroyed,
            invalid_destroys: 0,
        }
    }

    #[test]
    fn test_missing_font_file_error() {
        let context = Context::new();
        let err = Font::from_file(&context, "missing.ttf").unwrap_err();

        assert_eq!(
            err,
            ResourceLoadError {
                kind: ResourceKind::Font,
                source_id: Some("missing.ttf".to_string()),
            }
        );
        assert_eq!(err.to_string(), "Failed to load font from \"missing.ttf\"");
        assert_eq!(context.stats(ResourceKind::Font), ResourceStats::default());
    }

    #[test]
    fn test_font_texture_is_usable() {
        let context = Context::new();
        let mut font = fixture_font(&context);

        let texture = font.texture(24).unwrap();
        let image = texture.copy_to_image();
        assert!(!texture.is_released());
        assert_eq!(image.width(), context.config().font.initial_page_size);
        // Solid block reserved for underlines
        assert_eq!(image.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn test_stream_loading() {
        let context = Context::new();
        let mut cursor = std::io::Cursor::new(font_fixture::build());
        let font = Font::from_stream(&context, &mut cursor).unwrap();
        assert_eq!(font.info().family, font_fixture::FAMILY);

        let mut garbage = std::io::Cursor::new(vec![7u8; 128]);
        let err = Font::from_stream(&context, &mut garbage).unwrap_err();
        assert_eq!(err.source_id, None);
    }

    #[test]
    fn test_copy_yields_distinct_record() {
        let context = Context::new();
        let font = fixture_font(&context);
        let copy = font.clone();

        assert_ne!(font.key(), copy.key());
        assert_eq!(context.stats(ResourceKind::Font).live(), 2);

        drop(font);
        assert_eq!(copy.info().family, font_fixture::FAMILY);
    }

    #[test]
    fn test_double_release_is_harmless() {
        let context = Context::new();
        let mut font = fixture_font(&context);

        font.release();
        font.release();
        assert!(font.is_released());
        drop(font);

        assert_eq!(context.stats(ResourceKind::Font), stats(1, 1));
    }

    #[test]
    fn test_explicit_release_tears_down_cache() {
        let context = Context::new();
        let mut font = fixture_font(&context);
        for size in [12, 24, 48] {
            font.texture(size).unwrap();
        }

        font.release();

        assert_eq!(font.cached_texture_count(), 0);
        assert_eq!(context.stats(ResourceKind::Font), stats(1, 1));
        assert_eq!(context.stats(ResourceKind::Texture), stats(3, 3));
        assert!(!context.is_active());
    }

    #[test]
    fn test_drop_destroys_each_record_once() {
        let context = Context::new();
        let mut font = fixture_font(&context);
        for size in [12, 24, 48] {
            font.texture(size).unwrap();
        }

        drop(font);

        assert_eq!(context.stats(ResourceKind::Font), stats(1, 1));
        assert_eq!(context.stats(ResourceKind::Texture), stats(3, 3));
        assert!(!context.is_active());
    }

    #[test]
    fn test_release_policy_keeps_one_entry_per_size() {
        let context = context_with_policy(StaleEntryPolicy::Release);
        let mut font = fixture_font(&context);

        font.texture(24).unwrap();
        font.glyph(u32::from('A'), 24, false, 0.0);
        font.texture(24).unwrap();
        font.texture(24).unwrap();

        assert_eq!(font.cached_texture_count(), 1);
        assert_eq!(context.stats(ResourceKind::Texture), stats(3, 2));
    }

    #[test]
    fn test_retain_policy_keeps_stale_entries_until_release() {
        let context = context_with_policy(StaleEntryPolicy::Retain);
        let mut font = fixture_font(&context);

        for _ in 0..3 {
            font.texture(24).unwrap();
        }
        assert_eq!(font.cached_texture_count(), 3);
        assert_eq!(context.stats(ResourceKind::Texture).live(), 3);

        font.release();
        assert_eq!(context.stats(ResourceKind::Texture), stats(3, 3));
    }

    #[test]
    fn test_retained_entries_dropped_with_font() {
        let context = context_with_policy(StaleEntryPolicy::Retain);
        let mut font = fixture_font(&context);
        font.texture(24).unwrap();
        font.texture(24).unwrap();

        drop(font);
        assert_eq!(context.stats(ResourceKind::Texture), stats(2, 2));
    }

    #[test]
    fn test_released_font_cannot_produce_textures() {
        let context = Context::new();
        let mut font = fixture_font(&context);
        font.release();

        let err = font.texture(24).unwrap_err();
        assert_eq!(err.kind, ResourceKind::Texture);
        assert_eq!(font.info().family, "");
        assert!(font.try_clone().is_err());
    }

    #[test]
    fn test_wrappers_outlive_callers_context_handle() {
        let context = Context::new();
        let mut font = fixture_font(&context);
        let texture = Texture::new(&context, 2, 2).unwrap();
        drop(context);

        assert!(font.texture(16).is_ok());
        assert_eq!(texture.size().x, 2);
    }

    #[test]
    fn test_activation_depth_returns_to_zero() {
        let context = Context::new();
        let mut font = fixture_font(&context);
        let _ = font.texture(24);
        assert!(!context.is_active());

        let mut texture = Texture::new(&context, 4, 4).unwrap();
        texture.update(&[1; 16], 2, 2, 0, 0).unwrap();
        let copy = texture.clone();
        assert!(!context.is_active());

        drop(copy);
        texture.release();
        font.release();
        assert!(!context.is_active());
    }

    #[test]
    fn test_touch_is_up_without_hardware() {
        assert!(!Touch::is_down(0));
    }
}
