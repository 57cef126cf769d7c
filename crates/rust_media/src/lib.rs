//! # Rust Media
//!
//! Owned-resource wrappers for fonts, textures, windows and touch input.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Application code                        │
//! └──────────────┬───────────────────────────┘
//!                │ uses
//! ┌──────────────▼───────────────────────────┐
//! │  graphics::{Font, Texture, Text, Canvas} │ ← owned wrappers
//! │  window::{Window, Touch}                 │
//! └──────────────┬───────────────────────────┘
//!                │ OwnedHandle<R> (resource.rs)
//! ┌──────────────▼───────────────────────────┐
//! │  native::NativeLibrary                   │ ← binding layer, arena
//! │  (fontdue, ttf-parser, image, glfw, gl)  │   of native records
//! └──────────────────────────────────────────┘
//! ```
//!
//! Every wrapper owns exactly one arena key. Construction checks the key
//! for the null sentinel once and turns it into a [`ResourceLoadError`].
//! Teardown happens either through an explicit `release()` (which also
//! releases derived resources such as a font's page textures) or through
//! `Drop` (which releases only the wrapper's own key).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_media::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = Context::new();
//!     let mut font = Font::from_file(&context, "resources/fonts/sansation.ttf")?;
//!     println!("family: {}", font.info().family);
//!
//!     let page = font.texture(24)?;
//!     println!("page size: {:?}", page.size());
//!
//!     font.release();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod graphics;
pub mod native;
pub mod window;

mod resource;

#[cfg(test)]
mod tests;

pub use error::{ResourceKind, ResourceLoadError, TextureUpdateError};
pub use native::Context;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, MediaConfig, StaleEntryPolicy},
        error::{ResourceKind, ResourceLoadError},
        foundation::math::{FloatRect, IntRect, Vector2f, Vector2i, Vector2u},
        graphics::{Canvas, Color, Effect, Font, FontInfo, FragmentInput, Glyph, Text, TextStyle, Texture},
        native::Context,
        window::{Event, Key, Touch, WindowBase, WindowSettings},
    };

    #[cfg(feature = "window")]
    pub use crate::window::Window;
}
