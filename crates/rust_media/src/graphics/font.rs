//! Font wrapper and its page texture cache

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

use image::RgbaImage;

use super::texture::Texture;
use crate::config::StaleEntryPolicy;
use crate::error::ResourceLoadError;
use crate::native::{Context, FontInfo, FontKey, Glyph, StreamAdapter};
use crate::resource::{FontResource, OwnedHandle};

/// A loaded font face
///
/// Glyphs are rasterized on demand into one page per character size.
/// [`texture`](Self::texture) snapshots that page into a [`Texture`] which
/// the font keeps in a cache keyed by character size; references to cached
/// textures cannot outlive the font.
///
/// # Teardown
///
/// - [`release`](Self::release) destroys the font record and then every
///   cached texture, including entries kept under
///   [`StaleEntryPolicy::Retain`].
/// - Dropping the font destroys only the font record. Cached textures are
///   dropped afterwards as ordinary fields and release themselves.
///
/// Both paths end with the same records destroyed, each exactly once.
#[derive(Debug)]
pub struct Font {
    // Must stay the first field: the font record goes before its textures
    handle: OwnedHandle<FontResource>,
    textures: HashMap<u32, Texture>,
    retired: Vec<Texture>,
}

impl Font {
    /// Load a font file
    ///
    /// # Errors
    ///
    /// Fails with the path as `source_id` when the file cannot be read or
    /// parsed.
    pub fn from_file(context: &Context, path: impl AsRef<Path>) -> Result<Self, ResourceLoadError> {
        let path = path.as_ref();
        let key = context.with_library(|library| library.font_create_from_file(path));
        Self::adopt(context, key, Some(&path.display().to_string()))
    }

    /// Load a font from bytes
    ///
    /// `data` is only borrowed for the duration of the call.
    ///
    /// # Errors
    ///
    /// Fails when `data` is not a font.
    pub fn from_memory(context: &Context, data: &[u8]) -> Result<Self, ResourceLoadError> {
        let key = context.with_library(|library| library.font_create_from_memory(data));
        Self::adopt(context, key, None)
    }

    /// Load a font from any seekable reader
    ///
    /// # Errors
    ///
    /// Fails when the stream cannot be read or does not hold a font.
    pub fn from_stream<S: Read + Seek + ?Sized>(context: &Context, stream: &mut S) -> Result<Self, ResourceLoadError> {
        let mut adapter = StreamAdapter::new(stream);
        let key = context.with_library(|library| library.font_create_from_stream(&mut adapter));
        Self::adopt(context, key, None)
    }

    fn adopt(context: &Context, key: FontKey, source_id: Option<&str>) -> Result<Self, ResourceLoadError> {
        Ok(Self {
            handle: OwnedHandle::adopt(context, key, source_id)?,
            textures: HashMap::new(),
            retired: Vec::new(),
        })
    }

    /// Copy the font into an independent record with an empty cache
    ///
    /// # Errors
    ///
    /// Fails when this font has been released.
    pub fn try_clone(&self) -> Result<Self, ResourceLoadError> {
        let context = self.handle.context();
        let key = context.with_library(|library| library.font_copy(self.handle.key()));
        Self::adopt(context, key, None)
    }

    /// Family name and other descriptive data
    pub fn info(&self) -> FontInfo {
        self.handle
            .context()
            .with_library(|library| library.font_get_info(self.handle.key()))
    }

    /// Metrics of `code_point` at `character_size`, rasterizing it if needed
    pub fn glyph(&self, code_point: u32, character_size: u32, bold: bool, outline_thickness: f32) -> Glyph {
        let key = self.handle.key();
        self.handle.context().with_library(|library| {
            library.font_get_glyph(key, code_point, character_size, bold, outline_thickness)
        })
    }

    /// Horizontal adjustment between two characters
    pub fn kerning(&self, first: u32, second: u32, character_size: u32) -> f32 {
        self.handle
            .context()
            .with_library(|library| library.font_get_kerning(self.handle.key(), first, second, character_size))
    }

    /// Distance between two consecutive baselines
    pub fn line_spacing(&self, character_size: u32) -> f32 {
        self.handle
            .context()
            .with_library(|library| library.font_get_line_spacing(self.handle.key(), character_size))
    }

    /// Offset of the underline below the baseline
    pub fn underline_position(&self, character_size: u32) -> f32 {
        self.handle
            .context()
            .with_library(|library| library.font_get_underline_position(self.handle.key(), character_size))
    }

    /// Thickness of the underline
    pub fn underline_thickness(&self, character_size: u32) -> f32 {
        self.handle
            .context()
            .with_library(|library| library.font_get_underline_thickness(self.handle.key(), character_size))
    }

    /// Page texture holding every glyph loaded so far at `character_size`
    ///
    /// Each call takes a fresh snapshot of the page, since loading glyphs
    /// may have grown it, and replaces the cached entry. The replaced
    /// entry is released or retained according to the context's
    /// [`StaleEntryPolicy`].
    ///
    /// # Errors
    ///
    /// Fails when the font has been released.
    pub fn texture(&mut self, character_size: u32) -> Result<&Texture, ResourceLoadError> {
        let context = self.handle.context();
        let key = context.with_active(|library| library.font_get_texture(self.handle.key(), character_size));
        let texture = Texture::adopt(context, key, None)?;
        let policy = context.stale_entry_policy();

        if let Some(mut stale) = self.textures.insert(character_size, texture) {
            match policy {
                StaleEntryPolicy::Release => stale.release(),
                StaleEntryPolicy::Retain => self.retired.push(stale),
            }
        }

        Ok(&self.textures[&character_size])
    }

    /// Number of live cached textures, retained stale entries included
    pub fn cached_texture_count(&self) -> usize {
        self.textures.len() + self.retired.len()
    }

    /// Borrow the current page image for `character_size` without creating a texture
    pub(crate) fn with_page<T>(&self, character_size: u32, f: impl FnOnce(&RgbaImage) -> T) -> Option<T> {
        self.handle
            .context()
            .with_library(|library| library.font_page_image(self.handle.key(), character_size).map(f))
    }

    /// Destroy the font record and every cached texture now
    ///
    /// Later calls are no-ops.
    pub fn release(&mut self) {
        self.handle.release();
        for (_, mut texture) in self.textures.drain() {
            texture.release();
        }
        for mut texture in self.retired.drain(..) {
            texture.release();
        }
    }

    /// Whether [`release`](Self::release) has run
    pub const fn is_released(&self) -> bool {
        self.handle.is_released()
    }

    /// The native key, null once released
    pub fn key(&self) -> FontKey {
        self.handle.key()
    }
}

impl Clone for Font {
    /// # Panics
    ///
    /// Copying a live font cannot fail in the binding layer; a null copy
    /// means this font was already released.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(font) => font,
            Err(err) => panic!("font copy returned a null handle: {err}"),
        }
    }
}
