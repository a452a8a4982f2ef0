//! 2D transform
//!
//! Position, rotation (radians) and non-uniform scale. When drawing, an
//! object's transform is applied as translate → rotate → scale, so
//! components draw around their own origin.

use macroquad::math::{Affine2, Vec2};

use crate::render::Surface;

/// Local transform of a game object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    /// Rotation in radians, clockwise in screen space
    pub rotation: f32,
    pub scale: Vec2,
}

impl Transform2D {
    /// Origin, no rotation, scale 1
    pub const IDENTITY: Transform2D = Transform2D {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    pub fn from_position(position: Vec2) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    pub fn rotate(&mut self, radians: f32) {
        self.rotation += radians;
    }

    /// Local-to-world matrix
    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation, self.position)
    }

    /// Map a point from local space to world space
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.to_affine().transform_point2(point)
    }

    /// Push this transform onto a surface (caller owns the save/restore)
    pub fn apply(&self, surface: &mut dyn Surface) {
        if self.position != Vec2::ZERO {
            surface.translate(self.position);
        }
        if self.rotation != 0.0 {
            surface.rotate(self.rotation);
        }
        if self.scale != Vec2::ONE {
            surface.scale(self.scale);
        }
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}
