//! Configuration system
//!
//! [`MediaConfig`] tunes the binding layer (glyph page sizes, texture
//! defaults) and the derived-resource cache. Any [`Config`] type can be
//! loaded from or saved to TOML or RON, picked by file extension.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match Format::of(path)? {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Load configuration from file, falling back to defaults when the file is absent
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            log::info!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// What a font does with the page texture it replaces in its cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StaleEntryPolicy {
    /// Release the previous texture before storing the new one
    #[default]
    Release,
    /// Keep the previous texture alive until the font itself is released
    Retain,
}

/// Glyph page settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Side length of a freshly created glyph page
    pub initial_page_size: u32,
    /// Pages never grow beyond this side length
    pub max_page_size: u32,
    /// Transparent border kept around each glyph in the page
    pub glyph_padding: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            initial_page_size: 128,
            max_page_size: 4096,
            glyph_padding: 1,
        }
    }
}

/// Texture defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Whether new textures use linear filtering
    pub smooth_by_default: bool,
}

/// Derived-resource cache settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Handling of replaced cache entries
    pub stale_entries: StaleEntryPolicy,
}

/// Top-level configuration for a [`Context`](crate::native::Context)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Glyph page settings
    pub font: FontConfig,
    /// Texture defaults
    pub texture: TextureConfig,
    /// Derived-resource cache settings
    pub cache: CacheConfig,
}

impl Config for MediaConfig {}
