//! Framework error type
//!
//! Everything fallible in the framework funnels into `FrameworkError`.
//! Collision queries and geometry helpers never fail, so they don't appear here.

use thiserror::Error;

/// Errors raised by the framework
#[derive(Error, Debug)]
pub enum FrameworkError {
    /// The window has no usable drawing surface (zero-sized framebuffer)
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The game loop was started before `Game::init`
    #[error("game loop started before initialization")]
    NotInitialized,

    /// A scene name that was never registered with the game
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// An image, sound or font failed to load
    #[error("failed to load asset '{reference}': {reason}")]
    AssetLoad {
        /// Path or URL of the resource that failed
        reference: String,
        /// Loader message
        reason: String,
    },

    /// Config or manifest could not be parsed
    #[error("config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ron::error::SpannedError> for FrameworkError {
    fn from(e: ron::error::SpannedError) -> Self {
        FrameworkError::Config(e.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, FrameworkError>;
