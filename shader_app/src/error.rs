//! Demo errors

use rust_media::config::ConfigError;
use rust_media::{ResourceLoadError, TextureUpdateError};
use thiserror::Error;

/// Why the demo could not start
#[derive(Error, Debug)]
pub enum DemoError {
    /// A font, texture or window failed to load
    #[error(transparent)]
    Resource(#[from] ResourceLoadError),

    /// The generated background could not be uploaded
    #[error(transparent)]
    Texture(#[from] TextureUpdateError),

    /// `shader_app.toml` exists but is unreadable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The effect list is empty
    #[error("No effects to show")]
    NoEffects,
}
