//! Window management and input
//!
//! - **`event`**: backend-free [`Event`] and [`Key`] types
//! - **`touch`**: context-free [`Touch`] queries
//! - **`handle`** (feature `window`): the glfw-backed [`Window`]

mod event;
mod touch;

#[cfg(feature = "window")]
mod handle;

pub use event::{Event, Key};
pub use touch::{Touch, WindowBase};

#[cfg(feature = "window")]
pub use handle::Window;

use serde::{Deserialize, Serialize};

/// Parameters for creating a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Synchronise presentation with the display refresh
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: String::from("rust_media"),
            resizable: false,
            vsync: true,
        }
    }
}
