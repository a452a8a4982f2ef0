//! Components
//!
//! A game object is a transform plus an ordered list of components. The
//! framework ships a fixed set of drawable components; game-specific logic
//! plugs in through the `Behaviour` trait as `Component::Script`.
//!
//! Lookup is by `ComponentKind`, an explicit tag each component reports,
//! rather than by runtime type.

use std::fmt;

use super::components::{Animator, Label, Shape, Sprite};
use super::transform::Transform2D;
use crate::input::InputState;
use crate::render::Surface;

/// Tag identifying a component variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Sprite,
    Shape,
    Label,
    Animator,
    /// A behaviour, identified by its name
    Script(&'static str),
}

/// What a component sees of its owner during `update`
pub struct ComponentCtx<'a> {
    /// Owner's transform (read and write)
    pub transform: &'a mut Transform2D,
    /// Owner's visibility flag
    pub visible: &'a mut bool,
    /// Owner's tag, if any
    pub tag: Option<&'a str>,
    /// Seconds since the previous frame
    pub dt: f32,
    pub input: &'a InputState,
}

/// Game-specific logic attached to an object.
///
/// Every hook is optional.
pub trait Behaviour {
    /// Name used as the `ComponentKind::Script` tag
    fn name(&self) -> &'static str;

    /// Runs once, as soon as the behaviour is added to an object
    fn start(&mut self, _transform: &mut Transform2D) {}

    fn update(&mut self, _ctx: &mut ComponentCtx<'_>) {}

    /// Draw in the owner's local space
    fn draw(&self, _surface: &mut dyn Surface) {}
}

/// A component attached to exactly one game object
pub enum Component {
    Sprite(Sprite),
    Shape(Shape),
    Label(Label),
    Animator(Animator),
    Script(Box<dyn Behaviour>),
}

impl Component {
    /// Wrap a behaviour
    pub fn script(behaviour: impl Behaviour + 'static) -> Self {
        Component::Script(Box::new(behaviour))
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Sprite(_) => ComponentKind::Sprite,
            Component::Shape(_) => ComponentKind::Shape,
            Component::Label(_) => ComponentKind::Label,
            Component::Animator(_) => ComponentKind::Animator,
            Component::Script(b) => ComponentKind::Script(b.name()),
        }
    }

    /// Has a per-frame update hook
    pub fn is_updatable(&self) -> bool {
        matches!(self, Component::Animator(_) | Component::Script(_))
    }

    pub(crate) fn start(&mut self, transform: &mut Transform2D) {
        if let Component::Script(b) = self {
            b.start(transform);
        }
    }

    pub(crate) fn update(&mut self, ctx: &mut ComponentCtx<'_>) {
        match self {
            Component::Animator(a) => a.advance(ctx.dt),
            Component::Script(b) => b.update(ctx),
            Component::Sprite(_) | Component::Shape(_) | Component::Label(_) => {}
        }
    }

    pub(crate) fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Component::Sprite(s) => s.draw(surface),
            Component::Shape(s) => s.draw(surface),
            Component::Label(l) => l.draw(surface),
            Component::Animator(a) => a.draw(surface),
            Component::Script(b) => b.draw(surface),
        }
    }

    pub fn as_sprite_mut(&mut self) -> Option<&mut Sprite> {
        match self {
            Component::Sprite(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_shape_mut(&mut self) -> Option<&mut Shape> {
        match self {
            Component::Shape(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_label_mut(&mut self) -> Option<&mut Label> {
        match self {
            Component::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_animator_mut(&mut self) -> Option<&mut Animator> {
        match self {
            Component::Animator(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Sprite(s) => f.debug_tuple("Sprite").field(s).finish(),
            Component::Shape(s) => f.debug_tuple("Shape").field(s).finish(),
            Component::Label(l) => f.debug_tuple("Label").field(l).finish(),
            Component::Animator(a) => f.debug_tuple("Animator").field(a).finish(),
            Component::Script(b) => f.debug_tuple("Script").field(&b.name()).finish(),
        }
    }
}

impl From<Sprite> for Component {
    fn from(s: Sprite) -> Self {
        Component::Sprite(s)
    }
}

impl From<Shape> for Component {
    fn from(s: Shape) -> Self {
        Component::Shape(s)
    }
}

impl From<Label> for Component {
    fn from(l: Label) -> Self {
        Component::Label(l)
    }
}

impl From<Animator> for Component {
    fn from(a: Animator) -> Self {
        Component::Animator(a)
    }
}
