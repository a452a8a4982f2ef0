//! Drawing surface
//!
//! Game objects never call macroquad directly. They draw through the
//! `Surface` trait: an immediate-mode 2D canvas with an affine transform
//! stack. `MacroquadSurface` is the real backend, `RecordingSurface` a
//! headless one that captures commands.

mod macroquad_surface;
mod recording;

use std::ops::{Deref, DerefMut};

use macroquad::prelude::{Color, Vec2, WHITE};

use crate::math::Rect;

pub use macroquad_surface::MacroquadSurface;
pub use recording::{DrawCommand, RecordingSurface};

/// Horizontal text alignment relative to the anchor x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text placement relative to the anchor y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// Anchor is the top of the glyphs
    Top,
    /// Anchor is the vertical middle of the glyphs
    Middle,
    /// Anchor sits on the baseline (macroquad's native placement)
    #[default]
    Alphabetic,
    /// Anchor is the bottom of descenders
    Bottom,
}

/// Font and layout settings for `Surface::fill_text`
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Logical font name in the asset library (None = macroquad's built-in font)
    pub font: Option<String>,
    pub size: u16,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: None,
            size: 20,
            color: WHITE,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

impl TextStyle {
    pub fn sized(size: u16, color: Color) -> Self {
        Self { size, color, ..Default::default() }
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }
}

/// Immediate-mode 2D drawing surface with a transform stack.
///
/// All coordinates are in the current transform's space. `save` pushes the
/// transform, `restore` pops back to the last `save`.
pub trait Surface {
    /// Size of the drawable area in pixels
    fn size(&self) -> Vec2;

    /// Fill the whole surface with a color
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color);

    /// Blit a named image into `dest`, optionally cropping to `source` (in texels)
    fn draw_image(&mut self, image: &str, source: Option<Rect>, dest: Rect, tint: Color);

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, by: Vec2);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, by: Vec2);
}

/// Scoped transform: saves on creation, restores on drop.
///
/// Derefs to the wrapped surface so drawing goes through the guard:
///
/// ```ignore
/// let mut scope = Saved::new(surface);
/// scope.translate(pos);
/// scope.fill_rect(rect, RED);
/// // restored here
/// ```
pub struct Saved<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> Saved<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<'a> Deref for Saved<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for Saved<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for Saved<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
