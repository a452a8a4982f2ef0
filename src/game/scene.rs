//! Scenes
//!
//! A scene owns its game objects and keeps them sorted by ascending layer,
//! which is also the draw order. The sort is stable: objects on the same
//! layer keep the order they were added in.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU32, Ordering};

use macroquad::prelude::{Color, Vec2};

use super::entity::{IdAllocator, ObjectId};
use super::object::{GameObject, Owner};
use crate::asset::AssetLibrary;
use crate::input::InputState;
use crate::math::Rect;
use crate::render::Surface;

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique scene identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(u32);

impl SceneId {
    fn next() -> Self {
        SceneId(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

pub struct Scene {
    id: SceneId,
    objects: Vec<GameObject>,
    ids: IdAllocator,
    background: Option<Color>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            id: SceneId::next(),
            objects: Vec::new(),
            ids: IdAllocator::new(),
            background: None,
        }
    }

    /// Scene that paints a solid background before its objects
    pub fn with_background(color: Color) -> Self {
        Self { background: Some(color), ..Self::new() }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    /// Take ownership of an object. Returns its id in this scene.
    pub fn add(&mut self, mut object: GameObject) -> ObjectId {
        let id = self.ids.allocate();
        object.owner = Some(Owner { scene: self.id, id });
        self.objects.push(object);
        self.sort();
        id
    }

    /// Detach an object and hand it back. Unknown or stale ids return `None`.
    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        let index = self.index_of(id)?;
        let mut object = self.objects.remove(index);
        object.owner = None;
        self.ids.free(id);
        Some(object)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.index_of(id).map(|i| &self.objects[i])
    }

    /// Mutable access. The scene re-sorts when the guard drops if the layer changed.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<ObjectMut<'_>> {
        let index = self.index_of(id)?;
        let layer = self.objects[index].layer();
        Some(ObjectMut { objects: &mut self.objects, index, layer })
    }

    /// Move an object to another layer. False if the id is not in this scene.
    pub fn set_layer(&mut self, id: ObjectId, layer: i32) -> bool {
        match self.get_mut(id) {
            Some(mut object) => {
                object.set_layer(layer);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    /// All objects with the tag, in draw order
    pub fn find(&self, tag: &str) -> Vec<&GameObject> {
        self.objects.iter().filter(|o| o.has_tag(tag)).collect()
    }

    pub fn find_one(&self, tag: &str) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.has_tag(tag))
    }

    pub fn find_ids(&self, tag: &str) -> Vec<ObjectId> {
        self.objects.iter().filter(|o| o.has_tag(tag)).filter_map(|o| o.id()).collect()
    }

    pub fn update(&mut self, dt: f32, input: &InputState) {
        for object in &mut self.objects {
            object.update(dt, input);
        }
    }

    /// Background first, then objects from the lowest layer up
    pub fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        if let Some(color) = self.background {
            let size = surface.size();
            surface.fill_rect(Rect::new(0.0, 0.0, size.x, size.y), color);
        }
        for object in &self.objects {
            object.draw(surface, debug);
        }
    }

    /// Every other object currently overlapping `id`, in draw order
    pub fn collisions(&self, id: ObjectId) -> Vec<ObjectId> {
        let Some(subject) = self.get(id) else {
            return Vec::new();
        };
        self.objects
            .iter()
            .filter(|o| o.id() != Some(id) && subject.check_collision(o))
            .filter_map(|o| o.id())
            .collect()
    }

    /// Whether two objects of this scene overlap. False if either id is unknown.
    pub fn check_collision(&self, a: ObjectId, b: ObjectId) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.check_collision(b),
            _ => false,
        }
    }

    /// Objects in draw order
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drop every object. Previously issued ids become stale.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.ids.clear();
    }

    pub fn is_sorted_by_layer(&self) -> bool {
        self.objects.windows(2).all(|w| w[0].layer() <= w[1].layer())
    }

    /// Position of a live member. Ids issued by another scene never match.
    fn index_of(&self, id: ObjectId) -> Option<usize> {
        if !self.ids.is_alive(id) {
            return None;
        }
        let owner = Owner { scene: self.id, id };
        self.objects.iter().position(|o| o.owner == Some(owner))
    }

    fn sort(&mut self) {
        sort_by_layer(&mut self.objects);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_by_layer(objects: &mut [GameObject]) {
    objects.sort_by_key(|o| o.layer());
}

/// Mutable borrow of one scene object; re-sorts the scene on drop if the
/// layer changed
pub struct ObjectMut<'a> {
    objects: &'a mut Vec<GameObject>,
    index: usize,
    layer: i32,
}

impl Deref for ObjectMut<'_> {
    type Target = GameObject;

    fn deref(&self) -> &GameObject {
        &self.objects[self.index]
    }
}

impl DerefMut for ObjectMut<'_> {
    fn deref_mut(&mut self) -> &mut GameObject {
        &mut self.objects[self.index]
    }
}

impl Drop for ObjectMut<'_> {
    fn drop(&mut self) {
        if self.objects[self.index].layer() != self.layer {
            sort_by_layer(self.objects.as_mut_slice());
        }
    }
}

// =============================================================================
// Scene scripts
// =============================================================================

/// What a scene script gets to see each frame
pub struct FrameCtx<'a> {
    /// Seconds since the previous frame (0 on enter)
    pub dt: f32,
    pub input: &'a InputState,
    pub assets: &'a AssetLibrary,
    /// Size of the drawing surface
    pub screen: Vec2,
    /// Collider debug overlay switch
    pub debug: &'a mut bool,
}

/// Requested by a scene script at the end of its update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    None,
    /// Make the named scene current after this frame
    Switch(String),
    /// Stop the loop after this frame
    Quit,
}

/// Scene-level game logic: spawning, scoring, switching scenes
pub trait SceneScript {
    /// Runs each time the scene becomes current
    fn enter(&mut self, _scene: &mut Scene, _ctx: &mut FrameCtx<'_>) {}

    /// Runs once per frame before the scene's objects update
    fn update(&mut self, scene: &mut Scene, ctx: &mut FrameCtx<'_>) -> Transition;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::collision::ColliderShape;
    use crate::game::components::Shape;
    use crate::render::{DrawCommand, RecordingSurface};
    use macroquad::prelude::{BLUE, GREEN, RED};

    fn layered(layer: i32, tag: &str) -> GameObject {
        GameObject::new().with_layer(layer).with_tag(tag)
    }

    fn tags(scene: &Scene) -> Vec<&str> {
        scene.iter().filter_map(|o| o.tag()).collect()
    }

    #[test]
    fn test_add_sorts_stable() {
        let mut scene = Scene::new();
        scene.add(layered(2, "a"));
        scene.add(layered(0, "b"));
        scene.add(layered(2, "c"));
        scene.add(layered(1, "d"));
        scene.add(layered(0, "e"));
        assert_eq!(tags(&scene), ["b", "e", "d", "a", "c"]);
        assert!(scene.is_sorted_by_layer());
    }

    #[test]
    fn test_add_sets_owner() {
        let mut scene = Scene::new();
        let id = scene.add(GameObject::new());
        let obj = scene.get(id).expect("object present");
        assert_eq!(obj.id(), Some(id));
        assert_eq!(obj.scene(), Some(scene.id()));
        assert_ne!(Scene::new().id(), scene.id());
    }

    #[test]
    fn test_set_layer_resorts() {
        let mut scene = Scene::new();
        let a = scene.add(layered(0, "a"));
        scene.add(layered(1, "b"));
        scene.add(layered(2, "c"));

        assert!(scene.set_layer(a, 5));
        assert_eq!(tags(&scene), ["b", "c", "a"]);

        if let Some(mut obj) = scene.get_mut(a) {
            obj.set_layer(-1);
        }
        assert_eq!(tags(&scene), ["a", "b", "c"]);
        assert!(scene.is_sorted_by_layer());
    }

    #[test]
    fn test_remove() {
        let mut scene = Scene::new();
        let a = scene.add(layered(0, "a"));
        let b = scene.add(layered(0, "b"));

        let removed = scene.remove(a).expect("removed");
        assert!(removed.id().is_none());
        assert_eq!(scene.len(), 1);

        // stale and unknown ids are harmless
        assert!(scene.remove(a).is_none());
        assert!(!scene.set_layer(a, 3));
        assert!(scene.get_mut(a).is_none());

        let c = scene.add(layered(0, "c"));
        assert_eq!(c.index(), a.index());
        assert_ne!(c, a);
        assert!(scene.get(a).is_none());
        assert!(scene.contains(b) && scene.contains(c));
    }

    #[test]
    fn test_foreign_ids_are_not_members() {
        let mut a = Scene::new();
        let mut b = Scene::new();
        let in_a = a.add(layered(0, "in_a").with_collider(ColliderShape::Circle { radius: 5.0 }));
        let in_b = b.add(layered(0, "in_b").with_collider(ColliderShape::Circle { radius: 5.0 }));
        // same slot and generation in both scenes
        assert_eq!(in_a.index(), in_b.index());
        assert_eq!(in_a.generation(), in_b.generation());

        assert!(b.remove(in_a).is_none());
        assert_eq!(b.len(), 1);
        assert!(!b.contains(in_a));
        assert!(b.get(in_a).is_none());
        assert!(b.get_mut(in_a).is_none());
        assert!(!b.set_layer(in_a, 4));
        assert!(!b.check_collision(in_a, in_b));
        assert!(b.collisions(in_a).is_empty());
        assert_eq!(tags(&b), ["in_b"]);
        assert_eq!(b.iter().map(|o| o.layer()).collect::<Vec<_>>(), vec![0]);

        assert_eq!(a.remove(in_a).and_then(|o| o.tag().map(str::to_string)), Some("in_a".to_string()));
    }

    #[test]
    fn test_find() {
        let mut scene = Scene::new();
        scene.add(layered(1, "coin"));
        let p = scene.add(layered(0, "player"));
        scene.add(layered(3, "coin"));

        assert_eq!(scene.find("coin").len(), 2);
        assert_eq!(scene.find_one("player").and_then(|o| o.id()), Some(p));
        assert!(scene.find("enemy").is_empty());
        assert_eq!(scene.find_ids("player"), vec![p]);
    }

    #[test]
    fn test_draw_order_and_background() {
        let mut scene = Scene::with_background(BLUE);
        scene.add(GameObject::new().with_layer(1).with_component(Shape::rect(1.0, 1.0, RED)));
        scene.add(GameObject::new().with_layer(0).with_component(Shape::rect(1.0, 1.0, GREEN)));

        let mut s = RecordingSurface::new(64.0, 32.0);
        scene.draw(&mut s, false);

        let colors: Vec<Color> = s
            .paints()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![BLUE, GREEN, RED]);
        assert_eq!(
            s.commands()[0],
            DrawCommand::FillRect { rect: Rect::new(0.0, 0.0, 64.0, 32.0), color: BLUE }
        );
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn test_collisions() {
        let mut scene = Scene::new();
        let player = scene.add(GameObject::at(0.0, 0.0).with_collider(ColliderShape::Box { width: 10.0, height: 10.0 }));
        let near = scene.add(GameObject::at(6.0, 0.0).with_collider(ColliderShape::Circle { radius: 2.0 }));
        scene.add(GameObject::at(50.0, 0.0).with_collider(ColliderShape::Circle { radius: 2.0 }));
        scene.add(GameObject::at(0.0, 0.0));

        assert_eq!(scene.collisions(player), vec![near]);
        assert!(scene.check_collision(player, near));
        assert!(scene.check_collision(near, player));

        if let Some(mut obj) = scene.get_mut(near) {
            obj.translate(Vec2::new(100.0, 0.0));
        }
        assert!(scene.collisions(player).is_empty());

        let gone = scene.remove(near).and_then(|o| o.id());
        assert!(gone.is_none());
        assert!(!scene.check_collision(player, near));
        assert!(scene.collisions(near).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut scene = Scene::new();
        let a = scene.add(GameObject::new());
        scene.clear();
        assert!(scene.is_empty());
        assert!(scene.get(a).is_none());
        let b = scene.add(GameObject::new());
        assert_ne!(a, b);
        assert!(scene.get(a).is_none());
    }
}
