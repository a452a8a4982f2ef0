//! Headless surface that records draw calls instead of rendering them

use macroquad::prelude::{Color, Vec2};

use super::{Surface, TextStyle};
use crate::math::Rect;

/// One recorded call on a `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, thickness: f32, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, thickness: f32, color: Color },
    Image { name: String, source: Option<Rect>, dest: Rect },
    Text { text: String, pos: Vec2, size: u16 },
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    Scale(Vec2),
}

impl DrawCommand {
    /// True for commands that put pixels on the surface
    pub fn is_paint(&self) -> bool {
        !matches!(
            self,
            DrawCommand::Save
                | DrawCommand::Restore
                | DrawCommand::Translate(_)
                | DrawCommand::Rotate(_)
                | DrawCommand::Scale(_)
        )
    }
}

/// A surface with no GPU behind it.
///
/// Used by the test suite and for headless simulation runs.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, ..Default::default() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Only the commands that paint, in order
    pub fn paints(&self) -> Vec<&DrawCommand> {
        self.commands.iter().filter(|c| c.is_paint()).collect()
    }

    /// Current save depth (0 when every save was restored)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Deepest save nesting seen so far
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { rect, thickness, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, thickness, color });
    }

    fn draw_image(&mut self, image: &str, source: Option<Rect>, dest: Rect, _tint: Color) {
        self.commands.push(DrawCommand::Image { name: image.to_string(), source, dest });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text { text: text.to_string(), pos, size: style.size });
    }

    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            log::warn!("restore() without matching save()");
            return;
        }
        self.depth -= 1;
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, by: Vec2) {
        self.commands.push(DrawCommand::Translate(by));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn scale(&mut self, by: Vec2) {
        self.commands.push(DrawCommand::Scale(by));
    }
}
