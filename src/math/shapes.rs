//! Plain shape records
//!
//! `Rect` is top-left + size, the same convention as screen space.
//! `Circle` is center + radius.

use macroquad::math::Vec2;

/// An axis-aligned rectangle defined by its top-left corner and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle around a center point
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w * 0.5, center.y - h * 0.5, w, h)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Move by an offset
    pub fn offset(&self, by: Vec2) -> Self {
        Self::new(self.x + by.x, self.y + by.y, self.w, self.h)
    }
}

/// A circle defined by its center and radius
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn at(center: Vec2, radius: f32) -> Self {
        Self::new(center.x, center.y, radius)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
