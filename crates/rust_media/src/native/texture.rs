//! Native texture records and their entry points
//!
//! Pixel data is kept as RGBA8 in an `image::RgbaImage`. Creation and
//! destruction require an active context, like any upload to the device.

use std::path::Path;

use image::RgbaImage;

use super::stream::{read_all, InputStream};
use super::{NativeLibrary, TextureKey};
use crate::error::ResourceKind;
use crate::foundation::math::{IntRect, Vector2u};

#[derive(Clone)]
pub(crate) struct NativeTexture {
    image: RgbaImage,
    smooth: bool,
    repeated: bool,
}

impl NativeTexture {
    pub(crate) const fn new(image: RgbaImage, smooth: bool) -> Self {
        Self {
            image,
            smooth,
            repeated: false,
        }
    }
}

/// Crop `image` to `area`, clamped to its bounds; an empty area keeps everything
fn crop_to_area(image: RgbaImage, area: Option<IntRect>) -> RgbaImage {
    let Some(area) = area.filter(|area| !area.is_empty()) else {
        return image;
    };
    let full = IntRect::new(0, 0, image.width() as i32, image.height() as i32);
    match area.intersection(&full) {
        Some(clamped) => image::imageops::crop_imm(
            &image,
            clamped.left as u32,
            clamped.top as u32,
            clamped.width as u32,
            clamped.height as u32,
        )
        .to_image(),
        None => {
            log::warn!("Texture area {area:?} lies outside the image, loading the whole image");
            image
        }
    }
}

impl NativeLibrary {
    pub(crate) fn texture_create(&mut self, width: u32, height: u32) -> TextureKey {
        if !self.require_active("texture_create") {
            return TextureKey::default();
        }
        if width == 0 || height == 0 {
            log::error!("Failed to create texture, invalid size ({width}x{height})");
            return TextureKey::default();
        }
        let smooth = self.config.texture.smooth_by_default;
        self.insert_texture(NativeTexture::new(RgbaImage::new(width, height), smooth))
    }

    pub(crate) fn texture_create_from_file(&mut self, path: &Path, area: Option<IntRect>) -> TextureKey {
        if !self.require_active("texture_create_from_file") {
            return TextureKey::default();
        }
        match image::open(path) {
            Ok(image) => self.texture_create_from_image(&image.to_rgba8(), area),
            Err(err) => {
                log::error!("Failed to load image {}: {err}", path.display());
                TextureKey::default()
            }
        }
    }

    pub(crate) fn texture_create_from_memory(&mut self, data: &[u8], area: Option<IntRect>) -> TextureKey {
        if !self.require_active("texture_create_from_memory") {
            return TextureKey::default();
        }
        match image::load_from_memory(data) {
            Ok(image) => self.texture_create_from_image(&image.to_rgba8(), area),
            Err(err) => {
                log::error!("Failed to load image from memory: {err}");
                TextureKey::default()
            }
        }
    }

    pub(crate) fn texture_create_from_stream(
        &mut self,
        stream: &mut dyn InputStream,
        area: Option<IntRect>,
    ) -> TextureKey {
        if !self.require_active("texture_create_from_stream") {
            return TextureKey::default();
        }
        match read_all(stream) {
            Some(data) => self.texture_create_from_memory(&data, area),
            None => {
                log::error!("Failed to read image from stream");
                TextureKey::default()
            }
        }
    }

    pub(crate) fn texture_create_from_image(&mut self, image: &RgbaImage, area: Option<IntRect>) -> TextureKey {
        if !self.require_active("texture_create_from_image") {
            return TextureKey::default();
        }
        if image.width() == 0 || image.height() == 0 {
            log::error!("Failed to create texture from an empty image");
            return TextureKey::default();
        }
        let smooth = self.config.texture.smooth_by_default;
        self.insert_texture(NativeTexture::new(crop_to_area(image.clone(), area), smooth))
    }

    pub(crate) fn texture_copy(&mut self, key: TextureKey) -> TextureKey {
        if !self.require_active("texture_copy") {
            return TextureKey::default();
        }
        match self.textures.get(key).cloned() {
            Some(texture) => self.insert_texture(texture),
            None => {
                log::error!("Cannot copy a texture handle that is not live");
                TextureKey::default()
            }
        }
    }

    pub(crate) fn texture_destroy(&mut self, key: TextureKey) -> bool {
        if !self.require_active("texture_destroy") {
            return false;
        }
        let destroyed = self.textures.remove(key).is_some();
        if destroyed {
            log::debug!("Destroyed texture {key:?}");
        }
        self.record_destroyed(ResourceKind::Texture, destroyed)
    }

    pub(crate) fn texture_get_size(&self, key: TextureKey) -> Vector2u {
        self.textures
            .get(key)
            .map_or_else(Vector2u::zeros, |texture| {
                Vector2u::new(texture.image.width(), texture.image.height())
            })
    }

    pub(crate) fn texture_is_smooth(&self, key: TextureKey) -> bool {
        self.textures.get(key).is_some_and(|texture| texture.smooth)
    }

    pub(crate) fn texture_set_smooth(&mut self, key: TextureKey, smooth: bool) {
        if let Some(texture) = self.textures.get_mut(key) {
            texture.smooth = smooth;
        }
    }

    pub(crate) fn texture_is_repeated(&self, key: TextureKey) -> bool {
        self.textures.get(key).is_some_and(|texture| texture.repeated)
    }

    pub(crate) fn texture_set_repeated(&mut self, key: TextureKey, repeated: bool) {
        if let Some(texture) = self.textures.get_mut(key) {
            texture.repeated = repeated;
        }
    }

    pub(crate) fn texture_copy_to_image(&self, key: TextureKey) -> RgbaImage {
        self.textures
            .get(key)
            .map_or_else(|| RgbaImage::new(0, 0), |texture| texture.image.clone())
    }

    /// Read access to the pixels without copying them out
    pub(crate) fn texture_image(&self, key: TextureKey) -> Option<&RgbaImage> {
        self.textures.get(key).map(|texture| &texture.image)
    }

    /// Overwrite a region; the caller has validated bounds and buffer size
    pub(crate) fn texture_update(&mut self, key: TextureKey, pixels: &[u8], width: u32, height: u32, x: u32, y: u32) -> bool {
        if !self.require_active("texture_update") {
            return false;
        }
        let Some(texture) = self.textures.get_mut(key) else {
            return false;
        };
        let Some(region) = RgbaImage::from_raw(width, height, pixels.to_vec()) else {
            return false;
        };
        image::imageops::replace(&mut texture.image, &region, i64::from(x), i64::from(y));
        true
    }

    pub(super) fn insert_texture(&mut self, texture: NativeTexture) -> TextureKey {
        self.record_created(ResourceKind::Texture);
        let (width, height) = texture.image.dimensions();
        let key = self.textures.insert(texture);
        log::debug!("Created texture {key:?} ({width}x{height})");
        key
    }
}
