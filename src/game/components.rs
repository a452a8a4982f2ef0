//! Built-in components
//!
//! Everything here draws around the owner's origin: a 32x32 sprite on an
//! object at (100, 100) covers (84, 84)..(116, 116) before rotation/scale.

use macroquad::prelude::{Color, Vec2, WHITE};

use crate::math::Rect;
use crate::render::{Surface, TextStyle};

// =============================================================================
// Sprite
// =============================================================================

/// A named image drawn centered on the owner
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Logical image name in the asset library
    pub image: String,
    /// Drawn size in pixels
    pub size: Vec2,
    /// Crop region in texels (None = whole image)
    pub source: Option<Rect>,
    pub tint: Color,
}

impl Sprite {
    pub fn new(image: impl Into<String>, size: Vec2) -> Self {
        Self {
            image: image.into(),
            size,
            source: None,
            tint: WHITE,
        }
    }

    pub fn with_source(mut self, source: Rect) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let dest = Rect::from_center(Vec2::ZERO, self.size.x, self.size.y);
        surface.draw_image(&self.image, self.source, dest, self.tint);
    }
}

// =============================================================================
// Shape
// =============================================================================

/// Geometry of a `Shape` component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
}

/// A filled and/or stroked rectangle or circle
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub fill: Option<Color>,
    /// Outline thickness and color
    pub stroke: Option<(f32, Color)>,
}

impl Shape {
    /// Filled rectangle
    pub fn rect(width: f32, height: f32, fill: Color) -> Self {
        Self {
            kind: ShapeKind::Rect { width, height },
            fill: Some(fill),
            stroke: None,
        }
    }

    /// Filled circle
    pub fn circle(radius: f32, fill: Color) -> Self {
        Self {
            kind: ShapeKind::Circle { radius },
            fill: Some(fill),
            stroke: None,
        }
    }

    /// Add an outline
    pub fn with_stroke(mut self, thickness: f32, color: Color) -> Self {
        self.stroke = Some((thickness, color));
        self
    }

    /// Outline only
    pub fn outlined(mut self) -> Self {
        if self.stroke.is_none() {
            self.stroke = self.fill.map(|c| (1.0, c));
        }
        self.fill = None;
        self
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match self.kind {
            ShapeKind::Rect { width, height } => {
                let rect = Rect::from_center(Vec2::ZERO, width, height);
                if let Some(fill) = self.fill {
                    surface.fill_rect(rect, fill);
                }
                if let Some((thickness, color)) = self.stroke {
                    surface.stroke_rect(rect, thickness, color);
                }
            }
            ShapeKind::Circle { radius } => {
                if let Some(fill) = self.fill {
                    surface.fill_circle(Vec2::ZERO, radius, fill);
                }
                if let Some((thickness, color)) = self.stroke {
                    surface.stroke_circle(Vec2::ZERO, radius, thickness, color);
                }
            }
        }
    }
}

// =============================================================================
// Label
// =============================================================================

/// Text anchored at the owner's origin
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub style: TextStyle,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.text.is_empty() {
            surface.fill_text(&self.text, Vec2::ZERO, &self.style);
        }
    }
}

// =============================================================================
// Animator
// =============================================================================

/// One frame of an animation
#[derive(Debug, Clone, PartialEq)]
pub struct AnimFrame {
    pub image: String,
    pub source: Option<Rect>,
}

/// Flip-book animation: cycles through frames at a fixed rate
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    pub frames: Vec<AnimFrame>,
    /// Seconds per frame
    pub frame_time: f32,
    pub size: Vec2,
    pub looping: bool,
    playing: bool,
    current: usize,
    elapsed: f32,
}

impl Animator {
    /// Animate over separate images
    pub fn from_images<S: Into<String>>(images: impl IntoIterator<Item = S>, fps: f32, size: Vec2) -> Self {
        let frames = images
            .into_iter()
            .map(|image| AnimFrame { image: image.into(), source: None })
            .collect();
        Self::from_frames(frames, fps, size)
    }

    /// Animate over a horizontal strip of equally sized cells in one image
    pub fn from_strip(image: &str, cell: Vec2, count: usize, fps: f32, size: Vec2) -> Self {
        let frames = (0..count)
            .map(|i| AnimFrame {
                image: image.to_string(),
                source: Some(Rect::new(i as f32 * cell.x, 0.0, cell.x, cell.y)),
            })
            .collect();
        Self::from_frames(frames, fps, size)
    }

    pub fn from_frames(frames: Vec<AnimFrame>, fps: f32, size: Vec2) -> Self {
        Self {
            frames,
            frame_time: if fps > 0.0 { 1.0 / fps } else { f32::INFINITY },
            size,
            looping: true,
            playing: true,
            current: 0,
            elapsed: 0.0,
        }
    }

    /// Play once and stop on the last frame
    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }

    pub fn current_frame(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Back to the first frame, playing
    pub fn restart(&mut self) {
        self.current = 0;
        self.elapsed = 0.0;
        self.playing = true;
    }

    /// Advance the clock by `dt` seconds.
    ///
    /// A `frame_time` that is zero, negative or not finite holds the current frame.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing || self.frames.len() < 2 {
            return;
        }
        if !self.frame_time.is_finite() || self.frame_time <= 0.0 || !dt.is_finite() {
            return;
        }
        self.elapsed += dt.max(0.0);
        let steps = (self.elapsed / self.frame_time).floor();
        if steps < 1.0 {
            return;
        }
        self.elapsed -= steps * self.frame_time;
        // float error can leave elapsed a hair outside [0, frame_time)
        self.elapsed = self.elapsed.clamp(0.0, self.frame_time);

        let len = self.frames.len();
        let last = len - 1;
        if self.looping {
            let steps = (steps % len as f32) as usize;
            self.current = (self.current + steps) % len;
        } else {
            let remaining = last - self.current;
            if steps >= remaining as f32 {
                self.current = last;
                self.playing = false;
                self.elapsed = 0.0;
            } else {
                self.current += steps as usize;
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some(frame) = self.frames.get(self.current) {
            let dest = Rect::from_center(Vec2::ZERO, self.size.x, self.size.y);
            surface.draw_image(&frame.image, frame.source, dest, WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};
    use macroquad::prelude::{BLUE, RED};

    #[test]
    fn test_sprite_centered() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        Sprite::new("hero", Vec2::new(32.0, 16.0)).draw(&mut s);
        assert_eq!(
            s.commands()[0],
            DrawCommand::Image {
                name: "hero".into(),
                source: None,
                dest: Rect::new(-16.0, -8.0, 32.0, 16.0),
            }
        );
    }

    #[test]
    fn test_shape_fill_then_stroke() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        Shape::rect(10.0, 10.0, RED).with_stroke(2.0, BLUE).draw(&mut s);
        assert_eq!(s.commands().len(), 2);
        assert!(matches!(s.commands()[0], DrawCommand::FillRect { .. }));
        assert!(matches!(s.commands()[1], DrawCommand::StrokeRect { thickness, .. } if thickness == 2.0));
    }

    #[test]
    fn test_outlined_circle() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        Shape::circle(5.0, RED).outlined().draw(&mut s);
        assert_eq!(s.commands().len(), 1);
        assert!(matches!(s.commands()[0], DrawCommand::StrokeCircle { radius, .. } if radius == 5.0));
    }

    #[test]
    fn test_empty_label_draws_nothing() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        let mut label = Label::new("");
        label.draw(&mut s);
        assert!(s.commands().is_empty());
        label.set_text("Score: 3");
        label.draw(&mut s);
        assert_eq!(s.commands().len(), 1);
    }

    #[test]
    fn test_animator_loops() {
        let mut a = Animator::from_images(["a", "b", "c"], 10.0, Vec2::ONE);
        a.advance(0.05);
        assert_eq!(a.current_frame(), 0);
        a.advance(0.06);
        assert_eq!(a.current_frame(), 1);
        a.advance(0.2);
        assert_eq!(a.current_frame(), 0);
        assert!(a.is_playing());
    }

    #[test]
    fn test_animator_once_stops_on_last() {
        let mut a = Animator::from_images(["a", "b"], 10.0, Vec2::ONE).once();
        a.advance(1.0);
        assert_eq!(a.current_frame(), 1);
        assert!(!a.is_playing());
        a.restart();
        assert_eq!(a.current_frame(), 0);
        assert!(a.is_playing());
    }

    #[test]
    fn test_animator_degenerate_frame_time_holds() {
        let mut a = Animator::from_images(["a", "b"], f32::INFINITY, Vec2::ONE);
        a.advance(0.016);
        assert_eq!(a.current_frame(), 0);

        let mut a = Animator::from_images(["a", "b"], 0.0, Vec2::ONE);
        a.advance(1.0);
        assert_eq!(a.current_frame(), 0);

        a.frame_time = -1.0;
        a.advance(1.0);
        assert_eq!(a.current_frame(), 0);
        assert!(a.is_playing());
    }

    #[test]
    fn test_animator_tiny_frame_time_terminates() {
        let mut a = Animator::from_images(["a", "b", "c"], 10.0, Vec2::ONE);
        a.frame_time = 1e-30;
        a.advance(1.0e6);
        assert!(a.current_frame() < 3);

        let mut once = Animator::from_images(["a", "b", "c"], 10.0, Vec2::ONE).once();
        once.frame_time = f32::MIN_POSITIVE;
        once.advance(1.0);
        assert_eq!(once.current_frame(), 2);
        assert!(!once.is_playing());
    }

    #[test]
    fn test_animator_large_step_wraps() {
        let mut a = Animator::from_images(["a", "b", "c"], 10.0, Vec2::ONE);
        a.advance(0.75);
        assert_eq!(a.current_frame(), 1);
    }

    #[test]
    fn test_animator_strip_sources() {
        let a = Animator::from_strip("walk", Vec2::new(16.0, 16.0), 4, 8.0, Vec2::new(32.0, 32.0));
        assert_eq!(a.frames.len(), 4);
        assert_eq!(a.frames[2].source, Some(Rect::new(32.0, 0.0, 16.0, 16.0)));

        let mut s = RecordingSurface::new(10.0, 10.0);
        a.draw(&mut s);
        assert!(matches!(&s.commands()[0], DrawCommand::Image { name, .. } if name == "walk"));
    }
}
