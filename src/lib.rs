//! sprout2d: a small 2D game framework on macroquad
//!
//! - Scenes of game objects drawn in layer order
//! - Sprite, shape, text and flip-book components, plus user behaviours
//! - Box and circle colliders with naive all-pairs queries
//! - Keyboard, mouse and touch input mirrored into one state object
//! - Async image / sound / font loading into a named asset library

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod asset;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod math;
pub mod render;

pub use asset::{AssetLibrary, AssetManifest};
pub use config::GameConfig;
pub use error::{FrameworkError, Result};
pub use game::{
    Behaviour, Collider, ColliderShape, Component, ComponentCtx, ComponentKind, FpsLimit, FrameCtx, Game,
    GameObject, ObjectId, Scene, SceneScript, Transform2D, Transition,
};
pub use input::InputState;
pub use math::{Circle, Rect};
pub use render::{Saved, Surface, TextAlign, TextBaseline, TextStyle};
