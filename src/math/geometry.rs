//! Geometry utilities
//!
//! Stateless helpers shared by colliders and game code. Overlap tests are
//! strict: shapes that only touch (shared edge, tangent circles) don't overlap.
//! `point_in_rect` is the exception and includes its bounds.

use macroquad::math::Vec2;

use super::shapes::{Circle, Rect};

/// Euclidean distance between two points
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Distance between two vectors
pub fn distance_v(a: Vec2, b: Vec2) -> f32 {
    distance(a.x, a.y, b.x, b.y)
}

/// True if the rectangles share interior area
pub fn rect_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// True if the circles share interior area
pub fn circle_overlap(a: &Circle, b: &Circle) -> bool {
    distance(a.x, a.y, b.x, b.y) < a.radius + b.radius
}

/// True if the point lies inside or on the edge of the rectangle
pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

/// Clamp `v` into `[lo, hi]`
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Linear interpolation from `a` to `b`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Uniform random float in `[lo, hi)`
pub fn random_range(lo: f32, hi: f32) -> f32 {
    macroquad::rand::gen_range(lo, hi)
}

/// Uniform random integer in `[lo, hi]`
pub fn random_int(lo: i32, hi: i32) -> i32 {
    // gen_range on integers is half-open
    macroquad::rand::gen_range(lo, hi + 1)
}
