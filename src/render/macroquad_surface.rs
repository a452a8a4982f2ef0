//! macroquad backend for `Surface`
//!
//! Transforms map onto QuadGl's model matrix stack. QuadGl composes each
//! pushed matrix with the current one, so every translate/rotate/scale is a
//! push, and `restore` pops however many were pushed since the matching save.

use macroquad::prelude::*;

use super::{Surface, TextAlign, TextBaseline, TextStyle};
use crate::asset::AssetLibrary;
use crate::math::Rect as ShapeRect;

/// Draws straight to the macroquad window.
///
/// Borrows the asset library so images and fonts can be resolved by name.
pub struct MacroquadSurface<'a> {
    assets: &'a AssetLibrary,
    /// Matrices pushed since each open save (bottom entry = outside any save)
    pushes: Vec<usize>,
}

impl<'a> MacroquadSurface<'a> {
    pub fn new(assets: &'a AssetLibrary) -> Self {
        Self { assets, pushes: vec![0] }
    }

    fn push_matrix(&mut self, matrix: Mat4) {
        unsafe {
            get_internal_gl().quad_gl.push_model_matrix(matrix);
        }
        if let Some(count) = self.pushes.last_mut() {
            *count += 1;
        }
    }

    fn pop_matrices(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let mut gl = unsafe { get_internal_gl() };
        for _ in 0..count {
            gl.quad_gl.pop_model_matrix();
        }
    }

    fn font(&self, style: &TextStyle) -> Option<&'a Font> {
        let name = style.font.as_deref()?;
        let font = self.assets.font(name);
        if font.is_none() && self.assets.note_missing(name) {
            log::warn!("Font '{}' not loaded, using default font", name);
        }
        font
    }
}

impl Surface for MacroquadSurface<'_> {
    fn size(&self) -> Vec2 {
        vec2(screen_width(), screen_height())
    }

    fn clear(&mut self, color: Color) {
        clear_background(color);
    }

    fn fill_rect(&mut self, rect: ShapeRect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn stroke_rect(&mut self, rect: ShapeRect, thickness: f32, color: Color) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        draw_circle(center.x, center.y, radius, color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color) {
        draw_circle_lines(center.x, center.y, radius, thickness, color);
    }

    fn draw_image(&mut self, image: &str, source: Option<ShapeRect>, dest: ShapeRect, tint: Color) {
        let Some(texture) = self.assets.image(image) else {
            if self.assets.note_missing(image) {
                log::warn!("Image '{}' not loaded, skipping draw", image);
            }
            return;
        };
        draw_texture_ex(
            texture,
            dest.x,
            dest.y,
            tint,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                source: source.map(|s| Rect::new(s.x, s.y, s.w, s.h)),
                ..Default::default()
            },
        );
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        let font = self.font(style);
        let dims = measure_text(text, font, style.size, 1.0);

        let x = match style.align {
            TextAlign::Left => pos.x,
            TextAlign::Center => pos.x - dims.width * 0.5,
            TextAlign::Right => pos.x - dims.width,
        };
        // offset_y is the ascent above the baseline
        let y = match style.baseline {
            TextBaseline::Top => pos.y + dims.offset_y,
            TextBaseline::Middle => pos.y + dims.offset_y - dims.height * 0.5,
            TextBaseline::Alphabetic => pos.y,
            TextBaseline::Bottom => pos.y + dims.offset_y - dims.height,
        };

        draw_text_ex(
            text,
            x,
            y,
            TextParams {
                font,
                font_size: style.size,
                color: style.color,
                ..Default::default()
            },
        );
    }

    fn save(&mut self) {
        self.pushes.push(0);
    }

    fn restore(&mut self) {
        if self.pushes.len() <= 1 {
            log::warn!("restore() without matching save()");
            return;
        }
        if let Some(count) = self.pushes.pop() {
            self.pop_matrices(count);
        }
    }

    fn translate(&mut self, by: Vec2) {
        self.push_matrix(Mat4::from_translation(vec3(by.x, by.y, 0.0)));
    }

    fn rotate(&mut self, radians: f32) {
        self.push_matrix(Mat4::from_rotation_z(radians));
    }

    fn scale(&mut self, by: Vec2) {
        self.push_matrix(Mat4::from_scale(vec3(by.x, by.y, 1.0)));
    }
}

impl Drop for MacroquadSurface<'_> {
    fn drop(&mut self) {
        // Leave the GL model stack as we found it even if a caller forgot to restore
        let leftover: usize = self.pushes.drain(..).sum();
        self.pop_matrices(leftover);
    }
}
