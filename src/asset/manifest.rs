//! Asset manifest
//!
//! Lists every asset to load up front, keyed by logical name. WASM builds
//! can't enumerate directories, so loading always goes through a manifest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FrameworkError, Result};

/// Named asset paths, relative to `root`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// Directory prefix joined onto every path (empty = as written)
    pub root: String,
    pub images: BTreeMap<String, String>,
    pub sounds: BTreeMap<String, String>,
    pub fonts: BTreeMap<String, String>,
}

impl AssetManifest {
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Load a manifest through macroquad's file API (works on native and WASM)
    pub async fn load(path: &str) -> Result<Self> {
        let text = macroquad::file::load_string(path)
            .await
            .map_err(|e| FrameworkError::AssetLoad {
                reference: path.to_string(),
                reason: e.to_string(),
            })?;
        Self::from_ron_str(&text)
    }

    /// Number of entries across all kinds
    pub fn len(&self) -> usize {
        self.images.len() + self.sounds.len() + self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolve(&self, path: &str) -> String {
        if self.root.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.root.trim_end_matches('/'), path)
        }
    }

    /// (name, resolved path) for every image
    pub fn images(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.images.iter().map(|(n, p)| (n.clone(), self.resolve(p)))
    }

    /// (name, resolved path) for every sound
    pub fn sounds(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.sounds.iter().map(|(n, p)| (n.clone(), self.resolve(p)))
    }

    /// (name, resolved path) for every font
    pub fn fonts(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.fonts.iter().map(|(n, p)| (n.clone(), self.resolve(p)))
    }
}
