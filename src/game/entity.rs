//! Object ids with generational indices
//!
//! A scene hands out an `ObjectId` when an object is added. The generation
//! counter makes stale ids harmless: once an object is removed its slot may be
//! reused, but the old id no longer matches anything.

/// Handle to a game object owned by a scene.
///
/// Consists of an index (which slot) and a generation (which version of
/// that slot). Ids are only meaningful for the scene that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    index: u32,
    generation: u32,
}

impl ObjectId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Allocates and tracks object id lifetimes.
///
/// Freed slots are reused LIFO with an incremented generation.
#[derive(Debug, Default)]
pub struct IdAllocator {
    /// Generation counter for each slot
    generations: Vec<u32>,
    /// Free slots available for reuse
    free_indices: Vec<u32>,
    /// Number of currently alive ids
    alive_count: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new id
    pub fn allocate(&mut self) -> ObjectId {
        self.alive_count += 1;

        if let Some(index) = self.free_indices.pop() {
            // Generation was already bumped on free
            ObjectId::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            ObjectId::new(index, 0)
        }
    }

    /// Free an id. Returns false if it was already dead.
    pub fn free(&mut self, id: ObjectId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.generations[id.index as usize] += 1;
        self.free_indices.push(id.index);
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, id: ObjectId) -> bool {
        let idx = id.index as usize;
        idx < self.generations.len() && self.generations[idx] == id.generation
    }

    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }

    /// Invalidate every id
    pub fn clear(&mut self) {
        for gen in &mut self.generations {
            *gen += 1;
        }
        self.free_indices = (0..self.generations.len() as u32).rev().collect();
        self.alive_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_free() {
        let mut ids = IdAllocator::new();

        let a = ids.allocate();
        let b = ids.allocate();
        assert_eq!(ids.alive_count(), 2);
        assert!(ids.is_alive(a));
        assert!(ids.is_alive(b));

        assert!(ids.free(a));
        assert!(!ids.free(a));
        assert_eq!(ids.alive_count(), 1);
        assert!(!ids.is_alive(a));
        assert!(ids.is_alive(b));
    }

    #[test]
    fn test_stale_id_after_reuse() {
        let mut ids = IdAllocator::new();

        let old = ids.allocate();
        ids.free(old);

        let new = ids.allocate();
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        assert!(!ids.is_alive(old));
        assert!(ids.is_alive(new));
    }

    #[test]
    fn test_clear_invalidates_all() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        ids.clear();
        assert!(!ids.is_alive(a));
        assert!(!ids.is_alive(b));
        assert_eq!(ids.alive_count(), 0);
        // Slot 0 comes back first
        assert_eq!(ids.allocate().index(), 0);
    }
}
