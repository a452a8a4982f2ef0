//! Game configuration
//!
//! Window settings plus a handful of runtime switches, read from a RON file.
//! Every field has a default so a config only needs the values it changes:
//!
//! ```ron
//! (
//!     title: "Coin Chase",
//!     width: 800,
//!     height: 600,
//!     background: (20, 22, 28, 255),
//!     fps_limit: Fps60,
//!     assets: Some("assets/manifest.ron"),
//! )
//! ```

use std::path::{Path, PathBuf};

use macroquad::prelude::{Color, Conf};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::runtime::FpsLimit;

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window title
    pub title: String,
    /// Initial window width in pixels
    pub width: i32,
    /// Initial window height in pixels
    pub height: i32,
    /// Allow the user to resize the window
    pub resizable: bool,
    /// Request a high-DPI framebuffer
    pub high_dpi: bool,
    /// Clear color used between frames (RGBA, 0-255)
    pub background: (u8, u8, u8, u8),
    /// Start with the collider debug overlay enabled
    pub debug: bool,
    /// Frame rate cap
    pub fps_limit: FpsLimit,
    /// Use nearest-neighbour filtering for loaded images
    pub pixel_art: bool,
    /// Optional RON asset manifest loaded before the first frame
    pub assets: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "sprout2d".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            high_dpi: false,
            background: (0, 0, 0, 255),
            debug: false,
            fps_limit: FpsLimit::default(),
            pixel_art: false,
            assets: None,
        }
    }
}

impl GameConfig {
    /// Parse a config from RON text
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Load a config from a RON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_ron_str(&text)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load a config, falling back to defaults when the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default config ({}): {}", path.as_ref().display(), e);
                Self::default()
            }
        }
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| crate::error::FrameworkError::Config(e.to_string()))
    }

    /// Background as a macroquad color
    pub fn background_color(&self) -> Color {
        let (r, g, b, a) = self.background;
        Color::from_rgba(r, g, b, a)
    }

    /// Window configuration for `#[macroquad::main]`
    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.title.clone(),
            window_width: self.width,
            window_height: self.height,
            window_resizable: self.resizable,
            high_dpi: self.high_dpi,
            ..Default::default()
        }
    }
}
