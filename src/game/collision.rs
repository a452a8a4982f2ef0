//! Colliders
//!
//! Box and circle colliders attached to a game object. A collider has no
//! position of its own: its geometry is the owner's *current* position plus
//! an offset, computed on every query.
//!
//! Pairwise dispatch:
//! - Box × Box       → rectangle overlap
//! - Box × Circle    → closest point on the box to the circle center
//! - Circle × Circle → circle overlap
//! - Circle × Box    → delegates to Box × Circle (same answer both ways)
//! - anything × Empty → no collision

use macroquad::prelude::{Color, Vec2};

use crate::math::{circle_overlap, clamp, distance_v, rect_overlap, Circle, Rect};
use crate::render::Surface;

/// Shape parameters of a collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// No shape: never collides
    Empty,
    /// Axis-aligned box centered on the collider origin
    Box { width: f32, height: f32 },
    Circle { radius: f32 },
}

/// A collision shape plus its offset from the owning object's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub offset: Vec2,
    pub shape: ColliderShape,
}

impl Collider {
    pub fn new(shape: ColliderShape) -> Self {
        Self { offset: Vec2::ZERO, shape }
    }

    pub fn with_offset(shape: ColliderShape, offset: Vec2) -> Self {
        Self { offset, shape }
    }

    pub fn empty() -> Self {
        Self::new(ColliderShape::Empty)
    }

    pub fn rect(width: f32, height: f32) -> Self {
        Self::new(ColliderShape::Box { width, height })
    }

    pub fn circle(radius: f32) -> Self {
        Self::new(ColliderShape::Circle { radius })
    }

    /// Collider origin for an owner at `at`
    pub fn center(&self, at: Vec2) -> Vec2 {
        at + self.offset
    }

    /// World-space box, if this is a box collider
    pub fn bounds(&self, at: Vec2) -> Option<Rect> {
        match self.shape {
            ColliderShape::Box { width, height } => {
                Some(Rect::from_center(self.center(at), width, height))
            }
            _ => None,
        }
    }

    /// World-space circle, if this is a circle collider
    pub fn circle_at(&self, at: Vec2) -> Option<Circle> {
        match self.shape {
            ColliderShape::Circle { radius } => Some(Circle::at(self.center(at), radius)),
            _ => None,
        }
    }

    /// Test this collider (owner at `at`) against `other` (owner at `other_at`)
    pub fn overlaps(&self, at: Vec2, other: &Collider, other_at: Vec2) -> bool {
        match (self.shape, other.shape) {
            (ColliderShape::Box { width, height }, ColliderShape::Box { width: ow, height: oh }) => {
                let a = Rect::from_center(self.center(at), width, height);
                let b = Rect::from_center(other.center(other_at), ow, oh);
                rect_overlap(&a, &b)
            }
            (ColliderShape::Box { width, height }, ColliderShape::Circle { radius }) => {
                let rect = Rect::from_center(self.center(at), width, height);
                box_circle(&rect, &Circle::at(other.center(other_at), radius))
            }
            (ColliderShape::Circle { radius }, ColliderShape::Circle { radius: or }) => {
                let a = Circle::at(self.center(at), radius);
                let b = Circle::at(other.center(other_at), or);
                circle_overlap(&a, &b)
            }
            (ColliderShape::Circle { .. }, ColliderShape::Box { .. }) => {
                other.overlaps(other_at, self, at)
            }
            (ColliderShape::Empty, _) | (_, ColliderShape::Empty) => false,
        }
    }

    /// Stroke the collider outline. Coordinates are relative to the owner's
    /// position, so call this inside a translate to that position.
    pub fn draw_outline(&self, surface: &mut dyn Surface, color: Color) {
        match self.shape {
            ColliderShape::Box { width, height } => {
                surface.stroke_rect(Rect::from_center(self.offset, width, height), 1.0, color);
            }
            ColliderShape::Circle { radius } => {
                surface.stroke_circle(self.offset, radius, 1.0, color);
            }
            ColliderShape::Empty => {}
        }
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::empty()
    }
}

/// Box vs circle: clamp the circle center into the box, then compare distance
fn box_circle(rect: &Rect, circle: &Circle) -> bool {
    let closest = Vec2::new(
        clamp(circle.x, rect.x, rect.right()),
        clamp(circle.y, rect.y, rect.bottom()),
    );
    distance_v(circle.center(), closest) < circle.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};
    use macroquad::prelude::GREEN;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_box_box() {
        let a = Collider::rect(10.0, 10.0);
        let b = Collider::rect(10.0, 10.0);
        assert!(a.overlaps(v(0.0, 0.0), &b, v(5.0, 5.0)));
        // Edges touch only
        assert!(!a.overlaps(v(0.0, 0.0), &b, v(10.0, 0.0)));
        assert!(!a.overlaps(v(0.0, 0.0), &b, v(30.0, 0.0)));
    }

    #[test]
    fn test_circle_circle_tangent() {
        let a = Collider::circle(5.0);
        let b = Collider::circle(5.0);
        assert!(!a.overlaps(v(0.0, 0.0), &b, v(10.0, 0.0)));
        assert!(a.overlaps(v(0.0, 0.0), &b, v(9.0, 0.0)));
    }

    #[test]
    fn test_box_circle() {
        let b = Collider::rect(10.0, 10.0); // spans -5..5
        let c = Collider::circle(2.0);
        assert!(b.overlaps(v(0.0, 0.0), &c, v(6.0, 0.0)));
        // Tangent to the right edge
        assert!(!b.overlaps(v(0.0, 0.0), &c, v(7.0, 0.0)));
        // Near the corner but outside the rounded region
        assert!(!b.overlaps(v(0.0, 0.0), &c, v(6.5, 6.5)));
        // Circle center inside the box
        assert!(b.overlaps(v(0.0, 0.0), &c, v(1.0, 1.0)));
    }

    #[test]
    fn test_cross_variant_symmetry() {
        let b = Collider::with_offset(ColliderShape::Box { width: 8.0, height: 4.0 }, v(1.0, -1.0));
        let c = Collider::with_offset(ColliderShape::Circle { radius: 3.0 }, v(-2.0, 0.5));
        let positions = [v(0.0, 0.0), v(5.0, 0.0), v(6.5, 3.0), v(-4.0, -4.0), v(20.0, 20.0), v(3.0, 1.5)];
        for &pb in &positions {
            for &pc in &positions {
                assert_eq!(b.overlaps(pb, &c, pc), c.overlaps(pc, &b, pb));
            }
        }
    }

    #[test]
    fn test_empty_never_collides() {
        let e = Collider::empty();
        let b = Collider::rect(100.0, 100.0);
        let c = Collider::circle(100.0);
        assert!(!e.overlaps(v(0.0, 0.0), &b, v(0.0, 0.0)));
        assert!(!b.overlaps(v(0.0, 0.0), &e, v(0.0, 0.0)));
        assert!(!c.overlaps(v(0.0, 0.0), &e, v(0.0, 0.0)));
        assert!(!e.overlaps(v(0.0, 0.0), &e, v(0.0, 0.0)));
    }

    #[test]
    fn test_offset_follows_owner() {
        let c = Collider::with_offset(ColliderShape::Circle { radius: 1.0 }, v(10.0, 0.0));
        assert_eq!(c.center(v(5.0, 5.0)), v(15.0, 5.0));
        let b = Collider::with_offset(ColliderShape::Box { width: 2.0, height: 2.0 }, v(0.0, 3.0));
        assert_eq!(b.bounds(v(1.0, 1.0)), Some(Rect::new(0.0, 3.0, 2.0, 2.0)));
        assert_eq!(b.circle_at(v(0.0, 0.0)), None);
    }

    #[test]
    fn test_draw_outline() {
        let mut s = RecordingSurface::new(10.0, 10.0);
        Collider::rect(4.0, 2.0).draw_outline(&mut s, GREEN);
        Collider::circle(3.0).draw_outline(&mut s, GREEN);
        Collider::empty().draw_outline(&mut s, GREEN);
        assert_eq!(s.commands().len(), 2);
        assert!(matches!(
            s.commands()[0],
            DrawCommand::StrokeRect { rect, .. } if rect == Rect::new(-2.0, -1.0, 4.0, 2.0)
        ));
        assert!(matches!(s.commands()[1], DrawCommand::StrokeCircle { radius, .. } if radius == 3.0));
    }
}
