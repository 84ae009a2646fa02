//! Multi-kind queries
//!
//! A query is an AND-join over kind buckets, grouped by entity. Results are
//! owned snapshots, so a system may mutate the world while it walks them.

use crate::ecs::{Component, ComponentStore, Entity, Variant};
use indexmap::IndexMap;
use std::collections::HashMap;

/// One entity that owns every requested kind, with its component per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryResult<C: Component> {
    entity: Entity,
    components: HashMap<C::Kind, C>,
}

impl<C: Component> QueryResult<C> {
    #[inline]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn get(&self, kind: C::Kind) -> Option<&C> {
        self.components.get(&kind)
    }

    /// Typed access to the payload of kind `T::KIND`.
    pub fn component<T: Variant<C>>(&self) -> Option<&T> {
        self.components.get(&T::KIND).and_then(T::project)
    }

    pub fn kinds(&self) -> impl Iterator<Item = C::Kind> + '_ {
        self.components.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn into_components(self) -> HashMap<C::Kind, C> {
        self.components
    }
}

/// Join `kinds` over `store`.
///
/// When an entity owns several components of one kind, the most recently
/// inserted or re-inserted one is reported. Result order is unspecified. An empty kind list
/// matches nothing; an unregistered kind contributes no components, which
/// empties the join.
pub(crate) fn run<C: Component>(store: &ComponentStore<C>, kinds: &[C::Kind]) -> Vec<QueryResult<C>> {
    let mut wanted: Vec<C::Kind> = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        if !wanted.contains(&kind) {
            wanted.push(kind);
        }
    }
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut accumulator: IndexMap<Entity, HashMap<C::Kind, C>> = IndexMap::new();
    for &kind in &wanted {
        if !store.is_registered(kind) {
            tracing::warn!(%kind, "query names an unregistered component kind");
            return Vec::new();
        }
        for owned in store.iter(kind) {
            accumulator
                .entry(owned.entity())
                .or_default()
                .insert(kind, owned.component().clone());
        }
    }

    accumulator
        .into_iter()
        .filter(|(_, components)| components.len() == wanted.len())
        .map(|(entity, components)| QueryResult { entity, components })
        .collect()
}
