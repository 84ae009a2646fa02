//! Entity handles and the live-entity registry
//!
//! Entities carry no payload. An id is "alive" only while it is a member of
//! the registry's live set; ids are chosen by the caller.

use std::collections::HashSet;
use std::fmt;

/// Entity handle (opaque ID)
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u64);

impl Entity {
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Entity {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Set of live entity ids.
///
/// `registrations` counts every insertion attempt, duplicates included. It is
/// bookkeeping only and never feeds id assignment; `next_free` uses its own
/// forward-only cursor.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    live: HashSet<Entity>,
    registrations: u64,
    cursor: u64,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `entity` live. Returns `false` if it already was.
    pub fn insert(&mut self, entity: Entity) -> bool {
        self.registrations += 1;
        self.live.insert(entity)
    }

    /// Drop `entity` from the live set. Returns `false` if it was not live.
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.live.remove(&entity)
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.live.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live entities in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.live.iter().copied()
    }

    /// Number of `insert` calls made so far.
    pub fn registrations(&self) -> u64 {
        self.registrations
    }

    /// Reserve the next id that is not live.
    ///
    /// The cursor only moves forward, so an id handed out here is never
    /// handed out again even after the entity is removed.
    pub fn next_free(&mut self) -> Entity {
        while self.live.contains(&Entity(self.cursor)) {
            self.cursor += 1;
        }
        let entity = Entity(self.cursor);
        self.cursor += 1;
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_insert_is_a_no_op_but_counted() {
        let mut registry = EntityRegistry::new();
        assert!(registry.insert(Entity::from_raw(7)));
        assert!(!registry.insert(Entity::from_raw(7)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.registrations(), 2);
    }

    #[test]
    fn removing_unknown_entity_is_silent() {
        let mut registry = EntityRegistry::new();
        assert!(!registry.remove(Entity::from_raw(3)));
        assert!(registry.is_empty());
    }

    #[test]
    fn next_free_skips_live_ids_and_never_repeats() {
        let mut registry = EntityRegistry::new();
        registry.insert(Entity::from_raw(0));
        registry.insert(Entity::from_raw(1));

        let a = registry.next_free();
        assert_eq!(a, Entity::from_raw(2));
        registry.insert(a);
        registry.remove(a);

        let b = registry.next_free();
        assert_eq!(b, Entity::from_raw(3));
    }
}
