//! Game objects
//!
//! A `GameObject` is a transform, an ordered component list and at most one
//! collider. Objects are plain values until added to a `Scene`, which takes
//! ownership and records itself in the object's `Owner`.

use macroquad::prelude::{Color, Vec2};

use super::collision::{Collider, ColliderShape};
use super::component::{Component, ComponentCtx, ComponentKind};
use super::entity::ObjectId;
use super::scene::SceneId;
use super::transform::Transform2D;
use crate::input::InputState;
use crate::render::{Saved, Surface};

/// Outline color for colliders in debug mode
pub const DEBUG_COLLIDER_COLOR: Color = Color::new(0.2, 1.0, 0.3, 1.0);

/// Back-reference from an object to the scene that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub scene: SceneId,
    pub id: ObjectId,
}

#[derive(Debug)]
pub struct GameObject {
    pub transform: Transform2D,
    visible: bool,
    layer: i32,
    components: Vec<Component>,
    collider: Option<Collider>,
    tag: Option<String>,
    pub(crate) owner: Option<Owner>,
}

impl GameObject {
    pub fn new() -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            visible: true,
            layer: 0,
            components: Vec::new(),
            collider: None,
            tag: None,
            owner: None,
        }
    }

    pub fn at(x: f32, y: f32) -> Self {
        let mut obj = Self::new();
        obj.transform.position = Vec2::new(x, y);
        obj
    }

    // ---- builders ----

    pub fn with_component(mut self, component: impl Into<Component>) -> Self {
        self.add_component(component);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_collider(mut self, shape: ColliderShape) -> Self {
        self.set_collider(shape);
        self
    }

    // ---- components ----

    /// Append a component and run its start hook right away
    pub fn add_component(&mut self, component: impl Into<Component>) -> &mut Self {
        self.components.push(component.into());
        if let Some(last) = self.components.last_mut() {
            last.start(&mut self.transform);
        }
        self
    }

    /// First component of the given kind, in insertion order
    pub fn get_component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    pub fn get_component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    // ---- per-frame ----

    /// Run every component's update hook in order. Invisible objects are frozen.
    pub fn update(&mut self, dt: f32, input: &InputState) {
        if !self.visible {
            return;
        }
        let tag = self.tag.as_deref();
        for component in &mut self.components {
            let mut ctx = ComponentCtx {
                transform: &mut self.transform,
                visible: &mut self.visible,
                tag,
                dt,
                input,
            };
            component.update(&mut ctx);
        }
    }

    /// Draw components in this object's transform; with `debug`, outline the collider
    pub fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        if !self.visible {
            return;
        }

        {
            let mut scope = Saved::new(surface);
            self.transform.apply(&mut *scope);
            for component in &self.components {
                component.draw(&mut *scope);
            }
        }

        if debug {
            if let Some(collider) = &self.collider {
                // Collision ignores rotation and scale, so the outline does too
                let mut scope = Saved::new(surface);
                scope.translate(self.transform.position);
                collider.draw_outline(&mut *scope, DEBUG_COLLIDER_COLOR);
            }
        }
    }

    // ---- collision ----

    /// Replace the collider, centered on the object
    pub fn set_collider(&mut self, shape: ColliderShape) {
        self.collider = Some(Collider::new(shape));
    }

    pub fn set_collider_with_offset(&mut self, shape: ColliderShape, offset: Vec2) {
        self.collider = Some(Collider::with_offset(shape, offset));
    }

    pub fn clear_collider(&mut self) {
        self.collider = None;
    }

    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }

    /// Overlap test at both objects' current positions
    pub fn check_collision(&self, other: &GameObject) -> bool {
        match (&self.collider, &other.collider) {
            (Some(a), Some(b)) => a.overlaps(self.position(), b, other.position()),
            _ => false,
        }
    }

    // ---- accessors ----

    /// Id within the owning scene
    pub fn id(&self) -> Option<ObjectId> {
        self.owner.map(|o| o.id)
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.owner.map(|o| o.scene)
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    pub fn translate(&mut self, by: Vec2) {
        self.transform.translate(by);
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    /// Change the draw layer. For an object inside a scene, go through
    /// `Scene::get_mut` or `Scene::set_layer` so the scene re-sorts.
    pub fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new()
    }
}
