//! Asset Library - named storage for loaded images, sounds and fonts

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;

use macroquad::audio::{self, PlaySoundParams, Sound};
use macroquad::prelude::{FilterMode, Font, Texture2D};

use super::loader::{self, join_all_ok, Loaded};
use super::manifest::AssetManifest;
use crate::error::{FrameworkError, Result};

type LoadFuture<'a> = Pin<Box<dyn Future<Output = Result<(String, Loaded)>> + 'a>>;

/// Loaded assets keyed by logical name
#[derive(Default)]
pub struct AssetLibrary {
    images: HashMap<String, Texture2D>,
    sounds: HashMap<String, Sound>,
    fonts: HashMap<String, Font>,
    /// Names already reported missing (so each warning is logged once)
    missing: RefCell<HashSet<String>>,
    /// Nearest-neighbour filtering for images inserted from now on
    pixel_art: bool,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use nearest filtering for crisp pixel art
    pub fn set_pixel_art(&mut self, enabled: bool) {
        self.pixel_art = enabled;
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn image(&self, name: &str) -> Option<&Texture2D> {
        self.images.get(name)
    }

    pub fn sound(&self, name: &str) -> Option<&Sound> {
        self.sounds.get(name)
    }

    pub fn font(&self, name: &str) -> Option<&Font> {
        self.fonts.get(name)
    }

    pub fn contains_image(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn contains_sound(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    pub fn contains_font(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Total number of loaded assets of all kinds
    pub fn len(&self) -> usize {
        self.images.len() + self.sounds.len() + self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record that `name` was requested but not loaded.
    /// Returns true the first time a name is reported.
    pub(crate) fn note_missing(&self, name: &str) -> bool {
        self.missing.borrow_mut().insert(name.to_string())
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    pub fn insert_image(&mut self, name: impl Into<String>, texture: Texture2D) {
        if self.pixel_art {
            texture.set_filter(FilterMode::Nearest);
        }
        let name = name.into();
        self.missing.borrow_mut().remove(&name);
        self.images.insert(name, texture);
    }

    pub fn insert_sound(&mut self, name: impl Into<String>, sound: Sound) {
        self.sounds.insert(name.into(), sound);
    }

    pub fn insert_font(&mut self, name: impl Into<String>, font: Font) {
        self.fonts.insert(name.into(), font);
    }

    fn insert_loaded(&mut self, name: String, loaded: Loaded) {
        match loaded {
            Loaded::Image(texture) => self.insert_image(name, texture),
            Loaded::Sound(sound) => self.insert_sound(name, sound),
            Loaded::Font(font) => self.insert_font(name, font),
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load a single image under `name`
    pub async fn load_image(&mut self, name: &str, path: &str) -> Result<()> {
        let texture = loader::load_image(path).await?;
        self.insert_image(name, texture);
        Ok(())
    }

    /// Load a single sound under `name`
    pub async fn load_sound(&mut self, name: &str, path: &str) -> Result<()> {
        let sound = loader::load_sound(path).await?;
        self.insert_sound(name, sound);
        Ok(())
    }

    /// Load a single font under `name`
    pub async fn load_font(&mut self, name: &str, path: &str) -> Result<()> {
        let font = loader::load_font(path).await?;
        self.insert_font(name, font);
        Ok(())
    }

    /// Load everything in a manifest as one concurrent batch.
    ///
    /// Nothing is inserted unless the whole batch succeeds.
    pub async fn load_manifest(&mut self, manifest: &AssetManifest) -> Result<usize> {
        let mut batch: Vec<LoadFuture<'_>> = Vec::new();

        for (name, path) in manifest.images() {
            batch.push(Box::pin(async move {
                Ok::<_, FrameworkError>((name, Loaded::Image(loader::load_image(&path).await?)))
            }));
        }
        for (name, path) in manifest.sounds() {
            batch.push(Box::pin(async move {
                Ok::<_, FrameworkError>((name, Loaded::Sound(loader::load_sound(&path).await?)))
            }));
        }
        for (name, path) in manifest.fonts() {
            batch.push(Box::pin(async move {
                Ok::<_, FrameworkError>((name, Loaded::Font(loader::load_font(&path).await?)))
            }));
        }

        let loaded = join_all_ok(batch).await?;
        let count = loaded.len();
        for (name, asset) in loaded {
            self.insert_loaded(name, asset);
        }
        log::info!("Loaded {} assets from manifest", count);
        Ok(count)
    }

    // =========================================================================
    // Audio playback
    // =========================================================================

    /// Play a sound once at full volume
    pub fn play_sound(&self, name: &str) {
        match self.sounds.get(name) {
            Some(sound) => audio::play_sound_once(sound),
            None => self.warn_missing_sound(name),
        }
    }

    /// Start a looping sound at the given volume (0.0 - 1.0)
    pub fn play_sound_looped(&self, name: &str, volume: f32) {
        match self.sounds.get(name) {
            Some(sound) => audio::play_sound(sound, PlaySoundParams { looped: true, volume }),
            None => self.warn_missing_sound(name),
        }
    }

    pub fn stop_sound(&self, name: &str) {
        if let Some(sound) = self.sounds.get(name) {
            audio::stop_sound(sound);
        }
    }

    fn warn_missing_sound(&self, name: &str) {
        if self.note_missing(name) {
            log::warn!("Sound '{}' not loaded", name);
        }
    }
}
