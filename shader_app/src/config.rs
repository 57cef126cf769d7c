//! Demo configuration, read from `shader_app.toml` when present

use std::path::PathBuf;

use rust_media::config::Config;
use rust_media::window::WindowSettings;
use serde::{Deserialize, Serialize};

/// Where the demo's assets live and how its window looks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowSettings,
    pub font_path: PathBuf,
    /// A generated gradient is used when unset
    pub background_path: Option<PathBuf>,
    pub label_size: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings {
                title: String::from("rust_media shader effects"),
                ..WindowSettings::default()
            },
            font_path: PathBuf::from("resources/fonts/sansation.ttf"),
            background_path: None,
            label_size: 20,
        }
    }
}

impl Config for DemoConfig {}
