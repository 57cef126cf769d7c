//! Error types shared by the resource wrappers

use std::fmt;

use thiserror::Error;

/// Kind of native resource, used in errors and statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// TrueType/OpenType font
    Font,
    /// RGBA texture
    Texture,
    /// Operating system window
    Window,
}

impl ResourceKind {
    /// Every kind, in statistics order
    pub const ALL: [Self; 3] = [Self::Font, Self::Texture, Self::Window];

    /// Lower-case name used in messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::Font => "font",
            Self::Texture => "texture",
            Self::Window => "window",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A native factory call returned the null handle
///
/// `source_id` names what was being loaded (a file path, a window title)
/// and is `None` for in-memory and stream sources. The underlying cause is
/// logged by the binding layer when it happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to load {kind}{}", describe_source(.source_id))]
pub struct ResourceLoadError {
    /// Which kind of resource failed to load
    pub kind: ResourceKind,
    /// Path or other identifier of the source, when there is one
    pub source_id: Option<String>,
}

impl ResourceLoadError {
    /// Create an error for `kind`, optionally naming its source
    pub fn new(kind: ResourceKind, source_id: Option<&str>) -> Self {
        Self {
            kind,
            source_id: source_id.map(str::to_owned),
        }
    }
}

fn describe_source(source_id: &Option<String>) -> String {
    source_id
        .as_ref()
        .map_or_else(String::new, |id| format!(" from \"{id}\""))
}

/// Errors from [`Texture::update`](crate::graphics::Texture::update)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureUpdateError {
    /// The destination region does not fit inside the texture
    #[error("Update region at ({x}, {y}) of {width}x{height} exceeds texture size {texture_width}x{texture_height}")]
    OutOfBounds {
        /// Left edge of the region
        x: u32,
        /// Top edge of the region
        y: u32,
        /// Region width
        width: u32,
        /// Region height
        height: u32,
        /// Texture width
        texture_width: u32,
        /// Texture height
        texture_height: u32,
    },

    /// The pixel buffer length does not match `width * height * 4`
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },

    /// The texture was already released
    #[error("Texture has been released")]
    Released,
}
