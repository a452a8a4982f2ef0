//! Input handling
//!
//! Keyboard, pointer and touch state captured once per frame. Game code reads
//! flags (`is_key_pressed`, `is_mouse_pressed`, `is_touch_pressed`) and
//! positions rather than handling events itself.

mod state;

pub use state::*;
