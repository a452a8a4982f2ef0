//! Input state management
//!
//! Mirrors raw keyboard, pointer and touch events into last-known-state flags.
//! The event handlers are plain methods so any event source can drive them;
//! `capture()` feeds them from macroquad once per frame.

use std::collections::HashSet;

use macroquad::prelude::*;

/// Last-known keyboard / pointer / touch state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keys currently held
    keys: HashSet<KeyCode>,
    /// Keys that went down since the last capture
    just_pressed: HashSet<KeyCode>,
    /// Mouse button or first touch went down since the last capture
    pointer_just_pressed: bool,
    mouse_pressed: bool,
    mouse_position: Vec2,
    touch_pressed: bool,
    touch_position: Vec2,
    /// Id of the touch being tracked (only the first touch point counts)
    touch_id: Option<u64>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Event handlers
    // =========================================================================

    pub fn key_down(&mut self, key: KeyCode) {
        if self.keys.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    /// Pointer moved (surface coordinates)
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    pub fn pointer_down(&mut self, position: Vec2) {
        self.mouse_position = position;
        if !self.mouse_pressed {
            self.pointer_just_pressed = true;
        }
        self.mouse_pressed = true;
    }

    pub fn pointer_up(&mut self, position: Vec2) {
        self.mouse_position = position;
        self.mouse_pressed = false;
    }

    /// Touch event. Only the first active touch point is tracked.
    pub fn touch(&mut self, phase: TouchPhase, id: u64, position: Vec2) {
        match phase {
            TouchPhase::Started => {
                if self.touch_id.is_none() {
                    self.touch_id = Some(id);
                    self.touch_pressed = true;
                    self.pointer_just_pressed = true;
                    self.touch_position = position;
                }
            }
            TouchPhase::Moved | TouchPhase::Stationary => {
                if self.touch_id == Some(id) {
                    self.touch_position = position;
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.touch_id == Some(id) {
                    self.touch_id = None;
                    self.touch_pressed = false;
                    self.touch_position = position;
                }
            }
        }
    }

    /// Forget everything (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// True only on the frame the key went down
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    /// True only on the frame the mouse button or a touch went down
    pub fn is_pointer_just_pressed(&self) -> bool {
        self.pointer_just_pressed
    }

    pub fn is_mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    pub fn is_touch_pressed(&self) -> bool {
        self.touch_pressed
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    pub fn touch_position(&self) -> Vec2 {
        self.touch_position
    }

    /// Pointer or touch, whichever is active (touch wins)
    pub fn pointer(&self) -> Option<Vec2> {
        if self.touch_pressed {
            Some(self.touch_position)
        } else if self.mouse_pressed {
            Some(self.mouse_position)
        } else {
            None
        }
    }

    /// Keyboard direction from arrows / WASD, normalized
    pub fn axis(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_key_pressed(KeyCode::Left) || self.is_key_pressed(KeyCode::A) { dir.x -= 1.0; }
        if self.is_key_pressed(KeyCode::Right) || self.is_key_pressed(KeyCode::D) { dir.x += 1.0; }
        if self.is_key_pressed(KeyCode::Up) || self.is_key_pressed(KeyCode::W) { dir.y -= 1.0; }
        if self.is_key_pressed(KeyCode::Down) || self.is_key_pressed(KeyCode::S) { dir.y += 1.0; }
        dir.normalize_or_zero()
    }

    // =========================================================================
    // macroquad event source
    // =========================================================================

    /// Pull one frame of events from macroquad. Call once at the start of a frame.
    pub fn capture(&mut self) {
        self.just_pressed.clear();
        self.pointer_just_pressed = false;

        for key in get_keys_pressed() {
            self.key_down(key);
        }
        for key in get_keys_released() {
            self.key_up(key);
        }

        let (x, y) = mouse_position();
        let pos = vec2(x, y);
        if pos != self.mouse_position {
            self.pointer_moved(pos);
        }
        if is_mouse_button_pressed(MouseButton::Left) {
            self.pointer_down(pos);
        }
        if is_mouse_button_released(MouseButton::Left) {
            self.pointer_up(pos);
        }

        for t in touches() {
            self.touch(t.phase, t.id, t.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_flags() {
        let mut input = InputState::new();
        input.key_down(KeyCode::Space);
        assert!(input.is_key_pressed(KeyCode::Space));
        assert!(input.is_key_just_pressed(KeyCode::Space));
        assert!(!input.is_key_pressed(KeyCode::Enter));

        input.key_up(KeyCode::Space);
        assert!(!input.is_key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_pointer_edge_not_held_state() {
        let mut input = InputState::new();
        input.pointer_down(vec2(3.0, 4.0));
        assert!(input.is_pointer_just_pressed());
        assert!(input.is_mouse_pressed());

        // still held on the next frame
        input.pointer_just_pressed = false;
        input.pointer_down(vec2(3.0, 4.0));
        assert!(input.is_mouse_pressed());
        assert!(!input.is_pointer_just_pressed());

        input.pointer_up(vec2(3.0, 4.0));
        input.touch(TouchPhase::Started, 7, vec2(1.0, 1.0));
        assert!(input.is_pointer_just_pressed());
    }

    #[test]
    fn test_key_repeat_not_just_pressed() {
        let mut input = InputState::new();
        input.key_down(KeyCode::A);
        input.just_pressed.clear();
        // Held key repeating
        input.key_down(KeyCode::A);
        assert!(input.is_key_pressed(KeyCode::A));
        assert!(!input.is_key_just_pressed(KeyCode::A));
    }

    #[test]
    fn test_pointer() {
        let mut input = InputState::new();
        input.pointer_moved(vec2(10.0, 20.0));
        assert_eq!(input.mouse_position(), vec2(10.0, 20.0));
        assert!(!input.is_mouse_pressed());
        assert_eq!(input.pointer(), None);

        input.pointer_down(vec2(11.0, 21.0));
        assert!(input.is_mouse_pressed());
        assert_eq!(input.pointer(), Some(vec2(11.0, 21.0)));

        input.pointer_up(vec2(12.0, 22.0));
        assert!(!input.is_mouse_pressed());
        assert_eq!(input.mouse_position(), vec2(12.0, 22.0));
    }

    #[test]
    fn test_first_touch_only() {
        let mut input = InputState::new();
        input.touch(TouchPhase::Started, 1, vec2(5.0, 5.0));
        input.touch(TouchPhase::Started, 2, vec2(50.0, 50.0));
        assert!(input.is_touch_pressed());
        assert_eq!(input.touch_position(), vec2(5.0, 5.0));

        // Second finger moving is ignored
        input.touch(TouchPhase::Moved, 2, vec2(60.0, 60.0));
        assert_eq!(input.touch_position(), vec2(5.0, 5.0));

        input.touch(TouchPhase::Moved, 1, vec2(7.0, 8.0));
        assert_eq!(input.touch_position(), vec2(7.0, 8.0));

        // Second finger lifting doesn't release
        input.touch(TouchPhase::Ended, 2, vec2(60.0, 60.0));
        assert!(input.is_touch_pressed());

        input.touch(TouchPhase::Ended, 1, vec2(7.0, 8.0));
        assert!(!input.is_touch_pressed());
    }

    #[test]
    fn test_touch_wins_pointer() {
        let mut input = InputState::new();
        input.pointer_down(vec2(1.0, 1.0));
        input.touch(TouchPhase::Started, 0, vec2(9.0, 9.0));
        assert_eq!(input.pointer(), Some(vec2(9.0, 9.0)));
    }

    #[test]
    fn test_axis_normalized() {
        let mut input = InputState::new();
        input.key_down(KeyCode::Right);
        input.key_down(KeyCode::Down);
        let axis = input.axis();
        assert!((axis.length() - 1.0).abs() < 0.001);
        assert!(axis.x > 0.0 && axis.y > 0.0);

        input.reset();
        assert_eq!(input.axis(), Vec2::ZERO);
    }
}
