//! Entity ids and allocation.
//!
//! An [`Entity`] is a bare `u64` identifier with no data of its own;
//! meaning comes entirely from attached components. Each [`crate::World`]
//! owns its own [`EntityAllocator`], so tests get deterministic ids simply
//! by constructing a fresh world; there is no process-global counter.

/// A unique entity identifier.
///
/// Ids increase monotonically within a world and are never reused, even
/// after the entity is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(pub u64);

impl Entity {
    /// The null / invalid entity sentinel.
    pub const INVALID: Entity = Entity(0);

    /// Create an entity from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// `true` for any non-sentinel entity.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Hands out monotonically increasing entity ids, starting at 1
/// (0 is reserved for [`Entity::INVALID`]). Removed ids are not recycled
/// within the allocator's lifetime.
#[derive(Debug)]
pub struct EntityAllocator {
    next_id: u64,
}

impl EntityAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocate a fresh, never-before-seen entity id.
    pub fn allocate(&mut self) -> Entity {
        let id = self.next_id;
        self.next_id += 1;
        Entity(id)
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_identity() {
        let e = Entity::from_raw(42);
        assert_eq!(e.id(), 42);
        assert!(e.is_valid());
        assert!(!Entity::INVALID.is_valid());
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = EntityAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
        assert!(a < b);
        assert_eq!(alloc.count(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Entity::from_raw(7).to_string(), "Entity(7)");
    }
}
