// store.rs - Kind-keyed component buckets
//
// Each registered kind owns one bucket: an insertion-ordered set of
// components stamped with their owning entity. Identity is structural, so
// inserting an equal (entity, component) pair twice stores it once.

use crate::ecs::{CommandError, Component, Entity};
use indexmap::IndexSet;
use std::collections::HashMap;

/// A component together with the entity that owns it.
///
/// The owner is always assigned by the store; there is no way to construct
/// one with a caller-chosen owner from outside this module.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Owned<C> {
    entity: Entity,
    component: C,
}

impl<C> Owned<C> {
    #[inline]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    #[inline]
    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn into_component(self) -> C {
        self.component
    }
}

type Bucket<C> = IndexSet<Owned<C>>;

/// Mapping from kind to the set of components of that kind.
pub struct ComponentStore<C: Component> {
    buckets: HashMap<C::Kind, Bucket<C>>,
}

impl<C: Component> ComponentStore<C> {
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
        }
    }

    /// Create an empty bucket for `kind`.
    ///
    /// Registering a kind that already has a bucket empties it. Returns the
    /// number of components discarded that way.
    pub fn register(&mut self, kind: C::Kind) -> usize {
        self.buckets
            .insert(kind, Bucket::new())
            .map(|previous| previous.len())
            .unwrap_or(0)
    }

    pub fn is_registered(&self, kind: C::Kind) -> bool {
        self.buckets.contains_key(&kind)
    }

    /// Store a copy of `component` owned by `entity`.
    ///
    /// Returns `Ok(false)` when an identical component for the same entity is
    /// already present. The existing entry then moves to the back of the
    /// bucket, so it counts as the newest of its kind for that entity.
    pub fn insert(&mut self, entity: Entity, component: C) -> Result<bool, CommandError> {
        let kind = component.kind();
        let bucket = self
            .buckets
            .get_mut(&kind)
            .ok_or_else(|| CommandError::UnregisteredKind {
                kind: kind.to_string(),
            })?;
        let (index, inserted) = bucket.insert_full(Owned { entity, component });
        if !inserted {
            bucket.move_index(index, bucket.len() - 1);
        }
        Ok(inserted)
    }

    /// Delete every component owned by `entity`, across all buckets.
    ///
    /// Linear in the total number of stored components. Bucket order of the
    /// survivors is preserved.
    pub fn remove_entity(&mut self, entity: Entity) -> usize {
        let mut removed = 0;
        for bucket in self.buckets.values_mut() {
            let before = bucket.len();
            bucket.retain(|owned| owned.entity != entity);
            removed += before - bucket.len();
        }
        removed
    }

    /// Components of `kind` in insertion order. Empty for unregistered kinds.
    pub fn iter(&self, kind: C::Kind) -> impl Iterator<Item = &Owned<C>> + '_ {
        self.buckets.get(&kind).into_iter().flatten()
    }

    /// Components of `kind` owned by `entity`, oldest first.
    pub fn owned_by(&self, entity: Entity, kind: C::Kind) -> impl Iterator<Item = &C> + '_ {
        self.iter(kind)
            .filter(move |owned| owned.entity == entity)
            .map(Owned::component)
    }

    /// Number of components of `kind`; `0` for unregistered kinds.
    pub fn len(&self, kind: C::Kind) -> usize {
        self.buckets.get(&kind).map_or(0, IndexSet::len)
    }

    pub fn total_len(&self) -> usize {
        self.buckets.values().map(IndexSet::len).sum()
    }

    /// Registered kinds in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = C::Kind> + '_ {
        self.buckets.keys().copied()
    }
}

impl<C: Component> Default for ComponentStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::fixtures::*;

    fn store() -> ComponentStore<TestComponent> {
        let mut store = ComponentStore::new();
        store.register(TestKind::Position);
        store.register(TestKind::Velocity);
        store
    }

    #[test]
    fn unregistered_kind_is_rejected() {
        let mut store = store();
        let err = store.insert(Entity::from_raw(1), health(10)).unwrap_err();
        assert_eq!(
            err,
            CommandError::UnregisteredKind {
                kind: "Health".to_string()
            }
        );
        assert_eq!(store.len(TestKind::Health), 0);
    }

    #[test]
    fn identical_component_is_stored_once() {
        let mut store = store();
        let e = Entity::from_raw(1);
        assert!(store.insert(e, pos(1, 2)).unwrap());
        assert!(!store.insert(e, pos(1, 2)).unwrap());
        assert_eq!(store.len(TestKind::Position), 1);

        // Same value, different owner: distinct entry.
        assert!(store.insert(Entity::from_raw(2), pos(1, 2)).unwrap());
        assert_eq!(store.len(TestKind::Position), 2);
    }

    #[test]
    fn re_inserting_an_equal_component_makes_it_newest() {
        let mut store = store();
        let e = Entity::from_raw(1);
        store.insert(e, pos(0, 0)).unwrap();
        store.insert(e, pos(1, 0)).unwrap();
        assert!(!store.insert(e, pos(0, 0)).unwrap());

        assert_eq!(store.len(TestKind::Position), 2);
        let latest = store.owned_by(e, TestKind::Position).last().cloned();
        assert_eq!(latest, Some(pos(0, 0)));
    }

    #[test]
    fn owner_is_the_insert_argument() {
        let mut store = store();
        let other = Entity::from_raw(9);
        let e = Entity::from_raw(1);
        store.insert(other, pos(5, 5)).unwrap();

        let copied = store.owned_by(other, TestKind::Position).next().cloned().unwrap();
        store.insert(e, copied).unwrap();

        let owners: Vec<_> = store.iter(TestKind::Position).map(Owned::entity).collect();
        assert_eq!(owners, vec![other, e]);
    }

    #[test]
    fn remove_entity_only_touches_its_own_components() {
        let mut store = store();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        store.insert(a, pos(0, 0)).unwrap();
        store.insert(a, vel(1, 0)).unwrap();
        store.insert(b, pos(0, 0)).unwrap();
        store.insert(b, vel(0, 1)).unwrap();

        assert_eq!(store.remove_entity(a), 2);
        assert_eq!(store.total_len(), 2);
        assert!(store.iter(TestKind::Position).all(|o| o.entity() == b));
        assert!(store.iter(TestKind::Velocity).all(|o| o.entity() == b));

        assert_eq!(store.remove_entity(Entity::from_raw(42)), 0);
    }

    #[test]
    fn re_registering_resets_the_bucket() {
        let mut store = store();
        store.insert(Entity::from_raw(1), pos(0, 0)).unwrap();
        assert_eq!(store.register(TestKind::Position), 1);
        assert_eq!(store.len(TestKind::Position), 0);
        assert!(store.is_registered(TestKind::Position));
    }
}
