//! Window wrapper

use super::{Event, WindowBase, WindowSettings};
use crate::error::ResourceLoadError;
use crate::foundation::math::{Vector2i, Vector2u};
use crate::graphics::Canvas;
use crate::native::{Context, WindowKey};
use crate::resource::{OwnedHandle, WindowResource};

/// An operating system window presenting [`Canvas`] frames
///
/// Closing a window hides it and stops event delivery; the native record
/// stays alive until [`release`](Self::release) or drop.
#[derive(Debug)]
pub struct Window {
    handle: OwnedHandle<WindowResource>,
}

impl Window {
    /// Open a window
    ///
    /// # Errors
    ///
    /// Fails with the title as `source_id` when the windowing system cannot
    /// be initialised or refuses to create the window.
    pub fn new(context: &Context, settings: &WindowSettings) -> Result<Self, ResourceLoadError> {
        let key = context.with_library(|library| library.window_create(settings));
        let handle = OwnedHandle::adopt(context, key, Some(&settings.title))?;
        log::info!("Opened window \"{}\"", settings.title);
        Ok(Self { handle })
    }

    /// Whether the window is still open
    pub fn is_open(&self) -> bool {
        self.handle
            .context()
            .with_library(|library| library.window_is_open(self.handle.key()))
    }

    /// Close the window; pending events are discarded
    pub fn close(&mut self) {
        let key = self.handle.key();
        self.handle.context().with_library(|library| library.window_close(key));
    }

    /// Next pending event, if any
    pub fn poll_event(&mut self) -> Option<Event> {
        let key = self.handle.key();
        self.handle
            .context()
            .with_library(|library| library.window_poll_event(key))
    }

    /// Client area size in pixels
    pub fn size(&self) -> Vector2u {
        self.handle
            .context()
            .with_library(|library| library.window_get_size(self.handle.key()))
    }

    /// Change the title bar text
    pub fn set_title(&mut self, title: &str) {
        let key = self.handle.key();
        self.handle
            .context()
            .with_library(|library| library.window_set_title(key, title));
    }

    /// Show a rendered frame
    pub fn display(&mut self, canvas: &Canvas) {
        let key = self.handle.key();
        self.handle
            .context()
            .with_library(|library| library.window_display(key, canvas.image()));
    }

    /// Destroy the native window now; later calls are no-ops
    pub fn release(&mut self) {
        self.handle.release();
    }

    /// The native key, null once released
    pub fn key(&self) -> WindowKey {
        self.handle.key()
    }
}

impl WindowBase for Window {
    fn position(&self) -> Vector2i {
        self.handle
            .context()
            .with_library(|library| library.window_get_position(self.handle.key()))
    }
}
