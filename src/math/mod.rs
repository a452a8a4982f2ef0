//! Geometry records and the pure helpers the collision code is built on

pub mod geometry;
pub mod shapes;

pub use geometry::*;
pub use shapes::{Circle, Rect};
