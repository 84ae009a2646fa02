// commands.rs - The mutation surface handed to running systems
//
// Every operation applies immediately: a system that runs later in the same
// pass sees what earlier systems did. Nothing is buffered or deferred.

use crate::ecs::query::{self, QueryResult};
use crate::ecs::{CommandError, Component, ComponentStore, Entity, EntityRegistry};

/// Entities plus their components. Owned by the [`World`](crate::ecs::World).
pub(crate) struct WorldState<C: Component> {
    pub(crate) entities: EntityRegistry,
    pub(crate) components: ComponentStore<C>,
}

impl<C: Component> WorldState<C> {
    pub(crate) fn new() -> Self {
        Self {
            entities: EntityRegistry::new(),
            components: ComponentStore::new(),
        }
    }
}

/// Query/mutation facade over the world.
///
/// Systems receive one for the duration of a single call; it cannot outlive
/// the `start`/`tick` pass that created it.
pub struct Commands<'w, C: Component> {
    state: &'w mut WorldState<C>,
}

impl<'w, C: Component> Commands<'w, C> {
    pub(crate) fn new(state: &'w mut WorldState<C>) -> Self {
        Self { state }
    }

    /// Make `entity` live and attach `components` to it.
    ///
    /// Re-adding a live entity is allowed; its components are still
    /// processed. Components are added in order and the first failure is
    /// returned, leaving earlier ones in place.
    pub fn add_entity<I>(&mut self, entity: Entity, components: I) -> Result<Entity, CommandError>
    where
        I: IntoIterator,
        I::Item: Into<C>,
    {
        self.state.entities.insert(entity);
        for component in components {
            self.add_component(entity, component)?;
        }
        Ok(entity)
    }

    /// Like [`add_entity`](Self::add_entity) with an id picked by the registry.
    pub fn spawn<I>(&mut self, components: I) -> Result<Entity, CommandError>
    where
        I: IntoIterator,
        I::Item: Into<C>,
    {
        let entity = self.state.entities.next_free();
        self.add_entity(entity, components)
    }

    /// Remove `entity` and every component it owns.
    ///
    /// Removing an entity that is not live is a no-op.
    pub fn remove_entity(&mut self, entity: Entity) {
        let was_live = self.state.entities.remove(entity);
        let removed = self.state.components.remove_entity(entity);
        tracing::debug!(%entity, was_live, removed, "removed entity");
    }

    /// Attach a copy of `component` to `entity`.
    ///
    /// The store records `entity` as the owner whatever entity the value was
    /// read from. Adding a component equal to one the entity already owns is
    /// a no-op.
    pub fn add_component(&mut self, entity: Entity, component: impl Into<C>) -> Result<(), CommandError> {
        let component = component.into();
        let kind = component.kind();
        if !self.state.components.is_registered(kind) {
            return Err(CommandError::UnregisteredKind {
                kind: kind.to_string(),
            });
        }
        if !self.state.entities.contains(entity) {
            return Err(CommandError::DeadEntity {
                entity,
                kind: kind.to_string(),
            });
        }
        self.state.components.insert(entity, component)?;
        Ok(())
    }

    /// Entities that own every kind in `kinds`. See [`QueryResult`].
    pub fn query(&self, kinds: &[C::Kind]) -> Vec<QueryResult<C>> {
        query::run(&self.state.components, kinds)
    }

    pub fn contains_entity(&self, entity: Entity) -> bool {
        self.state.entities.contains(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.state.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::fixtures::*;
    use std::collections::BTreeSet;

    fn state() -> WorldState<TestComponent> {
        let mut state = WorldState::new();
        for kind in TestKind::ALL {
            state.components.register(*kind);
        }
        state
    }

    #[test]
    fn add_entity_stamps_every_component() {
        let mut state = state();
        let mut commands = Commands::new(&mut state);
        let e = Entity::from_raw(4);

        assert_eq!(commands.add_entity(e, [pos(1, 1), vel(0, 1)]), Ok(e));

        let results = commands.query(&[TestKind::Position, TestKind::Velocity]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entity(), e);
    }

    #[test]
    fn add_entity_accepts_payload_structs() {
        let mut state = state();
        let mut commands = Commands::new(&mut state);
        let e = commands
            .add_entity(Entity::from_raw(1), [Position { x: 2, y: 3 }])
            .unwrap();
        assert!(commands.contains_entity(e));
        assert_eq!(commands.query(&[TestKind::Position]).len(), 1);
    }

    #[test]
    fn re_adding_a_live_entity_keeps_processing_components() {
        let mut state = state();
        let mut commands = Commands::new(&mut state);
        let e = Entity::from_raw(1);
        commands.add_entity(e, [pos(0, 0)]).unwrap();
        commands.add_entity(e, [health(3)]).unwrap();

        assert_eq!(commands.entity_count(), 1);
        assert_eq!(commands.query(&[TestKind::Position, TestKind::Health]).len(), 1);
    }

    #[test]
    fn copying_a_component_between_entities_rewrites_the_owner() {
        let mut state = state();
        let mut commands = Commands::new(&mut state);
        let e = Entity::from_raw(1);
        let other = Entity::from_raw(2);
        commands.add_entity(e, [vel(0, 0)]).unwrap();
        commands.add_entity(other, [pos(7, 7)]).unwrap();

        let borrowed = commands.query(&[TestKind::Position])[0]
            .get(TestKind::Position)
            .cloned()
            .unwrap();
        commands.add_component(e, borrowed).unwrap();

        let owners: BTreeSet<_> = commands
            .query(&[TestKind::Position, TestKind::Velocity])
            .iter()
            .map(QueryResult::entity)
            .collect();
        assert_eq!(owners, BTreeSet::from([e]));
        drop(commands);
        assert_eq!(
            state.components.owned_by(e, TestKind::Position).count(),
            1
        );
        assert_eq!(
            state.components.owned_by(other, TestKind::Position).count(),
            1
        );
    }

    #[test]
    fn unregistered_kind_fails_fast() {
        let mut state = WorldState::<TestComponent>::new();
        state.components.register(TestKind::Position);
        let mut commands = Commands::new(&mut state);

        let err = commands
            .add_entity(Entity::from_raw(1), [pos(0, 0), health(1)])
            .unwrap_err();
        assert!(matches!(err, CommandError::UnregisteredKind { ref kind } if kind == "Health"));
        // Earlier components of the same call stay applied.
        assert_eq!(commands.query(&[TestKind::Position]).len(), 1);
    }

    #[test]
    fn components_need_a_live_owner() {
        let mut state = state();
        let mut commands = Commands::new(&mut state);
        let err = commands.add_component(Entity::from_raw(5), pos(0, 0)).unwrap_err();
        assert_eq!(
            err,
            CommandError::DeadEntity {
                entity: Entity::from_raw(5),
                kind: "Position".to_string()
            }
        );
    }

    #[test]
    fn unregistered_kind_is_reported_before_a_dead_owner() {
        let mut state = WorldState::<TestComponent>::new();
        state.components.register(TestKind::Position);
        let mut commands = Commands::new(&mut state);
        let err = commands.add_component(Entity::from_raw(5), health(1)).unwrap_err();
        assert_eq!(
            err,
            CommandError::UnregisteredKind {
                kind: "Health".to_string()
            }
        );
    }

    #[test]
    fn remove_entity_leaves_other_entities_untouched() {
        let mut state = state();
        let mut commands = Commands::new(&mut state);
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        commands.add_entity(a, [pos(0, 0), vel(1, 1)]).unwrap();
        commands.add_entity(b, [pos(0, 0), vel(1, 1)]).unwrap();

        commands.remove_entity(a);
        commands.remove_entity(Entity::from_raw(99));

        assert!(!commands.contains_entity(a));
        let results = commands.query(&[TestKind::Position, TestKind::Velocity]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entity(), b);
    }

    #[test]
    fn spawn_picks_fresh_ids() {
        let mut state = state();
        let mut commands = Commands::new(&mut state);
        commands.add_entity(Entity::from_raw(0), [pos(0, 0)]).unwrap();

        let first = commands.spawn([pos(1, 1)]).unwrap();
        let second = commands.spawn(Vec::<TestComponent>::new()).unwrap();
        assert_ne!(first, Entity::from_raw(0));
        assert_ne!(first, second);
        assert_eq!(commands.entity_count(), 3);
    }
}
