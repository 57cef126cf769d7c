//! Exclusive ownership of one native handle
//!
//! [`OwnedHandle`] is the single place where a null key is turned into a
//! [`ResourceLoadError`] and where a live key is handed back to the
//! binding layer. Wrappers embed one and add their own accessors.

use std::marker::PhantomData;

use slotmap::Key;

use crate::error::{ResourceKind, ResourceLoadError};
use crate::native::{Context, FontKey, NativeLibrary, TextureKey};

/// A kind of native record that can be owned
pub(crate) trait NativeResource {
    /// Arena key naming one record
    type Key: Key;

    /// Kind reported in errors and statistics
    const KIND: ResourceKind;

    /// Destroy must run inside an activation scope
    const NEEDS_ACTIVE_CONTEXT: bool;

    /// Hand `key` back to the binding layer
    fn destroy(library: &mut NativeLibrary, key: Self::Key) -> bool;
}

pub(crate) struct FontResource;

impl NativeResource for FontResource {
    type Key = FontKey;
    const KIND: ResourceKind = ResourceKind::Font;
    const NEEDS_ACTIVE_CONTEXT: bool = false;

    fn destroy(library: &mut NativeLibrary, key: FontKey) -> bool {
        library.font_destroy(key)
    }
}

pub(crate) struct TextureResource;

impl NativeResource for TextureResource {
    type Key = TextureKey;
    const KIND: ResourceKind = ResourceKind::Texture;
    const NEEDS_ACTIVE_CONTEXT: bool = true;

    fn destroy(library: &mut NativeLibrary, key: TextureKey) -> bool {
        library.texture_destroy(key)
    }
}

#[cfg(feature = "window")]
pub(crate) struct WindowResource;

#[cfg(feature = "window")]
impl NativeResource for WindowResource {
    type Key = crate::native::WindowKey;
    const KIND: ResourceKind = ResourceKind::Window;
    const NEEDS_ACTIVE_CONTEXT: bool = false;

    fn destroy(library: &mut NativeLibrary, key: Self::Key) -> bool {
        library.window_destroy(key)
    }
}

/// One live native key plus the context it belongs to
///
/// The key is set once by [`adopt`](Self::adopt) and cleared once by
/// [`release`](Self::release) or `Drop`. Releasing twice is a no-op.
pub(crate) struct OwnedHandle<R: NativeResource> {
    context: Context,
    key: Option<R::Key>,
    _resource: PhantomData<R>,
}

impl<R: NativeResource> OwnedHandle<R> {
    /// Take ownership of a freshly created key
    ///
    /// The null key becomes a [`ResourceLoadError`] naming `source_id`.
    pub(crate) fn adopt(context: &Context, key: R::Key, source_id: Option<&str>) -> Result<Self, ResourceLoadError> {
        if key.is_null() {
            return Err(ResourceLoadError::new(R::KIND, source_id));
        }
        Ok(Self {
            context: context.clone(),
            key: Some(key),
            _resource: PhantomData,
        })
    }

    /// The owned key, or the null key once released
    pub(crate) fn key(&self) -> R::Key {
        self.key.unwrap_or_default()
    }

    pub(crate) const fn context(&self) -> &Context {
        &self.context
    }

    pub(crate) const fn is_released(&self) -> bool {
        self.key.is_none()
    }

    /// Destroy the record now
    pub(crate) fn release(&mut self) {
        let Some(key) = self.key.take() else {
            return;
        };
        if R::NEEDS_ACTIVE_CONTEXT {
            self.context.with_active(|library| R::destroy(library, key));
        } else {
            self.context.with_library(|library| R::destroy(library, key));
        }
    }
}

impl<R: NativeResource> Drop for OwnedHandle<R> {
    fn drop(&mut self) {
        let Some(key) = self.key.take() else {
            return;
        };
        let released = self
            .context
            .try_with(R::NEEDS_ACTIVE_CONTEXT, |library| R::destroy(library, key));
        if released.is_none() {
            log::warn!(
                "Context busy while dropping {} {key:?}; record left for context teardown",
                R::KIND
            );
        }
    }
}

impl<R: NativeResource> std::fmt::Debug for OwnedHandle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnedHandle")
            .field("kind", &R::KIND)
            .field("key", &self.key)
            .finish()
    }
}
