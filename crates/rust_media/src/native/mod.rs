//! Binding layer
//!
//! This is the only module that deals in raw native handles. Every native
//! resource lives in a typed arena owned by [`NativeLibrary`] and is named
//! by a slotmap key. Entry points follow a C-style contract:
//!
//! - factories (`*_create_from_file`, `*_create_from_memory`,
//!   `*_create_from_stream`, `*_copy`) return the **null key** on failure
//!   and log the cause;
//! - `*_destroy` returns `false` for a key that is not live, so a double
//!   destroy is observable but harmless;
//! - accessors are total and return degenerate values for unknown keys.
//!
//! Textures (and glyph pages turned into textures) may only be created or
//! destroyed while the library is *active*, i.e. inside
//! [`Context::with_active`]. That scope replaces a process-wide
//! "context is active" flag.
//!
//! Nothing outside the crate sees [`NativeLibrary`] directly; wrappers go
//! through [`Context`].

mod context;
mod font;
mod page;
mod stream;
mod texture;
pub mod touch;

#[cfg(feature = "window")]
mod presenter;
#[cfg(feature = "window")]
mod window;

pub use context::Context;
pub use font::{FontInfo, Glyph};
pub use stream::{InputStream, StreamAdapter};

use slotmap::SlotMap;

use crate::config::MediaConfig;
use crate::error::ResourceKind;

use self::font::NativeFont;
use self::texture::NativeTexture;
#[cfg(feature = "window")]
use self::window::NativeWindow;

slotmap::new_key_type! {
    /// Native handle to a font record
    pub struct FontKey;

    /// Native handle to a texture record
    pub struct TextureKey;

    /// Native handle to a window record
    pub struct WindowKey;
}

/// Creation/destruction counters for one resource kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceStats {
    /// Records created
    pub created: usize,
    /// Records destroyed
    pub destroyed: usize,
    /// Destroy calls on keys that were not live
    pub invalid_destroys: usize,
}

impl ResourceStats {
    /// Records currently alive
    pub const fn live(&self) -> usize {
        self.created - self.destroyed
    }
}

/// Arena of native records plus the activation state
pub(crate) struct NativeLibrary {
    config: MediaConfig,
    fonts: SlotMap<FontKey, NativeFont>,
    textures: SlotMap<TextureKey, NativeTexture>,
    #[cfg(feature = "window")]
    windows: SlotMap<WindowKey, NativeWindow>,
    // Declared after `windows`: glfw must terminate after every window is gone.
    #[cfg(feature = "window")]
    glfw: Option<glfw::Glfw>,
    active_depth: u32,
    stats: [ResourceStats; ResourceKind::ALL.len()],
}

impl NativeLibrary {
    pub(crate) fn new(config: MediaConfig) -> Self {
        log::debug!("Creating native library with config: {config:?}");
        Self {
            config,
            fonts: SlotMap::with_key(),
            textures: SlotMap::with_key(),
            #[cfg(feature = "window")]
            windows: SlotMap::with_key(),
            #[cfg(feature = "window")]
            glfw: None,
            active_depth: 0,
            stats: [ResourceStats::default(); ResourceKind::ALL.len()],
        }
    }

    pub(crate) const fn config(&self) -> &MediaConfig {
        &self.config
    }

    pub(crate) const fn is_active(&self) -> bool {
        self.active_depth > 0
    }

    pub(crate) fn push_active(&mut self) {
        self.active_depth += 1;
    }

    pub(crate) fn pop_active(&mut self) {
        debug_assert!(self.active_depth > 0, "unbalanced context deactivation");
        self.active_depth = self.active_depth.saturating_sub(1);
    }

    pub(crate) const fn stats(&self, kind: ResourceKind) -> ResourceStats {
        self.stats[kind.index()]
    }

    /// Log and refuse an operation that needs an active context
    fn require_active(&self, operation: &str) -> bool {
        if self.is_active() {
            true
        } else {
            log::error!("{operation} requires an active context");
            false
        }
    }

    fn record_created(&mut self, kind: ResourceKind) {
        self.stats[kind.index()].created += 1;
    }

    fn record_destroyed(&mut self, kind: ResourceKind, destroyed: bool) -> bool {
        let stats = &mut self.stats[kind.index()];
        if destroyed {
            stats.destroyed += 1;
        } else {
            stats.invalid_destroys += 1;
            log::warn!("Destroy called on a {kind} handle that is not live");
        }
        destroyed
    }
}

impl NativeLibrary {
    /// Records of every kind still allocated
    fn live_records(&self) -> usize {
        #[cfg(feature = "window")]
        let windows = self.windows.len();
        #[cfg(not(feature = "window"))]
        let windows = 0;
        self.fonts.len() + self.textures.len() + windows
    }
}

impl Drop for NativeLibrary {
    fn drop(&mut self) {
        let leftover = self.live_records();
        if leftover > 0 {
            log::debug!("Native library torn down with {leftover} records still allocated");
        }
    }
}
