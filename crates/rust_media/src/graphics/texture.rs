//! Texture wrapper

use std::io::{Read, Seek};
use std::path::Path;

use image::RgbaImage;

use crate::error::{ResourceLoadError, TextureUpdateError};
use crate::foundation::math::{IntRect, Vector2u};
use crate::native::{Context, StreamAdapter, TextureKey};
use crate::resource::{OwnedHandle, TextureResource};

/// An image living in the binding layer
///
/// Every creation and destruction runs inside an activation scope of the
/// owning [`Context`]. Factories taking an `area` load only that part of
/// the source; an empty area (or `None`) loads everything, and an area
/// larger than the source is clamped to it.
#[derive(Debug)]
pub struct Texture {
    handle: OwnedHandle<TextureResource>,
}

impl Texture {
    /// Create a transparent texture of the given size
    ///
    /// # Errors
    ///
    /// Fails when either dimension is zero.
    pub fn new(context: &Context, width: u32, height: u32) -> Result<Self, ResourceLoadError> {
        let key = context.with_active(|library| library.texture_create(width, height));
        Self::adopt(context, key, None)
    }

    /// Load a PNG or JPEG file
    ///
    /// # Errors
    ///
    /// Fails with the path as `source_id` when the file is missing or not
    /// a decodable image.
    pub fn from_file(context: &Context, path: impl AsRef<Path>, area: Option<IntRect>) -> Result<Self, ResourceLoadError> {
        let path = path.as_ref();
        let key = context.with_active(|library| library.texture_create_from_file(path, area));
        Self::adopt(context, key, Some(&path.display().to_string()))
    }

    /// Decode an encoded image held in memory
    ///
    /// # Errors
    ///
    /// Fails when `data` is not a decodable image.
    pub fn from_memory(context: &Context, data: &[u8], area: Option<IntRect>) -> Result<Self, ResourceLoadError> {
        let key = context.with_active(|library| library.texture_create_from_memory(data, area));
        Self::adopt(context, key, None)
    }

    /// Decode an encoded image read from `stream`
    ///
    /// # Errors
    ///
    /// Fails when the stream cannot be read or does not hold an image.
    pub fn from_stream<S: Read + Seek + ?Sized>(
        context: &Context,
        stream: &mut S,
        area: Option<IntRect>,
    ) -> Result<Self, ResourceLoadError> {
        let mut adapter = StreamAdapter::new(stream);
        let key = context.with_active(|library| library.texture_create_from_stream(&mut adapter, area));
        Self::adopt(context, key, None)
    }

    /// Upload already decoded pixels
    ///
    /// # Errors
    ///
    /// Fails when `image` is empty.
    pub fn from_image(context: &Context, image: &RgbaImage, area: Option<IntRect>) -> Result<Self, ResourceLoadError> {
        let key = context.with_active(|library| library.texture_create_from_image(image, area));
        Self::adopt(context, key, None)
    }

    pub(crate) fn adopt(context: &Context, key: TextureKey, source_id: Option<&str>) -> Result<Self, ResourceLoadError> {
        OwnedHandle::adopt(context, key, source_id).map(|handle| Self { handle })
    }

    /// Duplicate the pixels into an independent texture
    ///
    /// # Errors
    ///
    /// Fails when this texture has been released.
    pub fn try_clone(&self) -> Result<Self, ResourceLoadError> {
        let context = self.handle.context();
        let key = context.with_active(|library| library.texture_copy(self.handle.key()));
        Self::adopt(context, key, None)
    }

    /// Size in pixels; zero once released
    pub fn size(&self) -> Vector2u {
        self.handle
            .context()
            .with_library(|library| library.texture_get_size(self.handle.key()))
    }

    /// Whether sampling uses linear filtering
    pub fn is_smooth(&self) -> bool {
        self.handle
            .context()
            .with_library(|library| library.texture_is_smooth(self.handle.key()))
    }

    /// Enable or disable linear filtering
    pub fn set_smooth(&mut self, smooth: bool) {
        let key = self.handle.key();
        self.handle
            .context()
            .with_library(|library| library.texture_set_smooth(key, smooth));
    }

    /// Whether sampling outside the texture wraps around
    pub fn is_repeated(&self) -> bool {
        self.handle
            .context()
            .with_library(|library| library.texture_is_repeated(self.handle.key()))
    }

    /// Enable or disable wrap-around sampling
    pub fn set_repeated(&mut self, repeated: bool) {
        let key = self.handle.key();
        self.handle
            .context()
            .with_library(|library| library.texture_set_repeated(key, repeated));
    }

    /// Copy the pixels out; empty once released
    pub fn copy_to_image(&self) -> RgbaImage {
        self.handle
            .context()
            .with_library(|library| library.texture_copy_to_image(self.handle.key()))
    }

    /// Overwrite a `width` x `height` region at (`x`, `y`) with RGBA8 pixels
    ///
    /// # Errors
    ///
    /// Fails when the buffer length does not match the region, when the
    /// region does not fit in the texture, or after release.
    pub fn update(&mut self, pixels: &[u8], width: u32, height: u32, x: u32, y: u32) -> Result<(), TextureUpdateError> {
        if self.handle.is_released() {
            return Err(TextureUpdateError::Released);
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureUpdateError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        let size = self.size();
        let fits_x = x.checked_add(width).is_some_and(|right| right <= size.x);
        let fits_y = y.checked_add(height).is_some_and(|bottom| bottom <= size.y);
        if !fits_x || !fits_y {
            return Err(TextureUpdateError::OutOfBounds {
                x,
                y,
                width,
                height,
                texture_width: size.x,
                texture_height: size.y,
            });
        }

        let key = self.handle.key();
        self.handle
            .context()
            .with_active(|library| library.texture_update(key, pixels, width, height, x, y));
        Ok(())
    }

    /// Overwrite the region at (`x`, `y`) with `image`
    ///
    /// # Errors
    ///
    /// Same conditions as [`update`](Self::update).
    pub fn update_from_image(&mut self, image: &RgbaImage, x: u32, y: u32) -> Result<(), TextureUpdateError> {
        self.update(image.as_raw(), image.width(), image.height(), x, y)
    }

    /// Borrow the pixels for the duration of `f`; `None` once released
    pub(crate) fn with_pixels<T>(&self, f: impl FnOnce(&RgbaImage) -> T) -> Option<T> {
        self.handle
            .context()
            .with_library(|library| library.texture_image(self.handle.key()).map(f))
    }

    /// Destroy the native texture now; later calls are no-ops
    pub fn release(&mut self) {
        self.handle.release();
    }

    /// Whether [`release`](Self::release) has run
    pub const fn is_released(&self) -> bool {
        self.handle.is_released()
    }

    /// The native key, null once released
    pub fn key(&self) -> TextureKey {
        self.handle.key()
    }
}

impl Clone for Texture {
    /// # Panics
    ///
    /// Copying a live texture cannot fail in the binding layer; a null copy
    /// means this texture was already released.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(texture) => texture,
            Err(err) => panic!("texture copy returned a null handle: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResourceKind;
    use image::Rgba;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_new_texture_is_transparent() {
        let context = Context::new();
        let texture = Texture::new(&context, 3, 2).unwrap();

        assert_eq!(texture.size(), Vector2u::new(3, 2));
        assert!(texture.copy_to_image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
        assert!(!context.is_active());
    }

    #[test]
    fn test_zero_size_fails() {
        let context = Context::new();
        let err = Texture::new(&context, 0, 5).unwrap_err();
        assert_eq!(err.kind, ResourceKind::Texture);
        assert_eq!(err.source_id, None);
    }

    #[test]
    fn test_missing_file_names_path() {
        let context = Context::new();
        let err = Texture::from_file(&context, "missing.png", None).unwrap_err();
        assert_eq!(err.source_id.as_deref(), Some("missing.png"));
    }

    #[test]
    fn test_from_memory_with_area() {
        let context = Context::new();
        let bytes = png_bytes(8, 8);
        let texture = Texture::from_memory(&context, &bytes, Some(IntRect::new(2, 2, 4, 3))).unwrap();

        assert_eq!(texture.size(), Vector2u::new(4, 3));
        assert_eq!(texture.copy_to_image().get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_from_stream() {
        let context = Context::new();
        let mut cursor = std::io::Cursor::new(png_bytes(5, 7));
        let texture = Texture::from_stream(&context, &mut cursor, None).unwrap();
        assert_eq!(texture.size(), Vector2u::new(5, 7));
    }

    #[test]
    fn test_clone_is_independent() {
        let context = Context::new();
        let mut original = Texture::new(&context, 2, 2).unwrap();
        let copy = original.clone();
        assert_ne!(original.key(), copy.key());

        original.update(&[255; 4], 1, 1, 0, 0).unwrap();
        assert_eq!(original.copy_to_image().get_pixel(0, 0).0, [255; 4]);
        assert_eq!(copy.copy_to_image().get_pixel(0, 0).0, [0; 4]);
    }

    #[test]
    fn test_update_rejects_bad_regions() {
        let context = Context::new();
        let mut texture = Texture::new(&context, 4, 4).unwrap();

        assert!(matches!(
            texture.update(&[0; 16], 2, 2, 3, 3),
            Err(TextureUpdateError::OutOfBounds { texture_width: 4, .. })
        ));
        assert_eq!(
            texture.update(&[0; 3], 1, 1, 0, 0),
            Err(TextureUpdateError::BufferSize { expected: 4, actual: 3 })
        );

        texture.release();
        assert_eq!(texture.update(&[0; 4], 1, 1, 0, 0), Err(TextureUpdateError::Released));
    }

    #[test]
    fn test_flags_round_trip() {
        let context = Context::new();
        let mut texture = Texture::new(&context, 1, 1).unwrap();
        assert!(!texture.is_repeated());

        texture.set_repeated(true);
        texture.set_smooth(true);
        assert!(texture.is_repeated());
        assert!(texture.is_smooth());
    }

    #[test]
    fn test_released_texture_reports_empty() {
        let context = Context::new();
        let mut texture = Texture::new(&context, 2, 2).unwrap();
        texture.release();

        assert!(texture.is_released());
        assert_eq!(texture.size(), Vector2u::zeros());
        assert!(texture.try_clone().is_err());
    }
}
