//! Asset loading
//!
//! Images, sounds and fonts are loaded asynchronously through macroquad and
//! stored in an `AssetLibrary` under a caller-chosen logical name. Batches
//! (a whole manifest) load concurrently and are all-or-nothing: every load
//! runs to completion, and the batch fails if any single load failed.
//!
//! ```text
//! assets/manifest.ron
//! (
//!     root: "assets",
//!     images: { "hero": "sprites/hero.png" },
//!     sounds: { "coin": "sfx/coin.wav" },
//!     fonts:  { "title": "fonts/title.ttf" },
//! )
//! ```

mod library;
mod loader;
mod manifest;

pub use library::AssetLibrary;
pub use loader::{join_all_ok, load_font, load_image, load_sound, JoinAllOk, Loaded};
pub use manifest::AssetManifest;
