//! Scene graph and game loop
//!
//! Key concepts:
//! - GameObject: transform + ordered components + optional collider
//! - Component: built-in drawables or a user `Behaviour`, looked up by `ComponentKind`
//! - Scene: owns objects, keeps them in layer order, answers collision queries
//! - Game: named scenes, input, assets and the frame loop
//!
//! Design philosophy:
//! - Simple over flexible (no general ECS, no physics)
//! - Compile-time known component set, plus one extension point
//! - Nothing global: the `Game` value is the context

pub mod collision;
pub mod component;
pub mod components;
pub mod entity;
pub mod object;
pub mod runtime;
pub mod scene;
pub mod transform;

pub use collision::{Collider, ColliderShape};
pub use component::{Behaviour, Component, ComponentCtx, ComponentKind};
pub use components::{AnimFrame, Animator, Label, Shape, ShapeKind, Sprite};
pub use entity::{IdAllocator, ObjectId};
pub use object::{GameObject, Owner, DEBUG_COLLIDER_COLOR};
pub use runtime::{FpsLimit, Game, LoopState};
pub use scene::{FrameCtx, ObjectMut, Scene, SceneId, SceneScript, Transition};
pub use transform::Transform2D;
