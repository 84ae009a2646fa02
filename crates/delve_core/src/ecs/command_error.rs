use crate::ecs::Entity;
use thiserror::Error;

/// Errors raised by mutations issued through [`Commands`](crate::ecs::Commands)
/// or directly against a [`ComponentStore`](crate::ecs::ComponentStore).
///
/// Kinds are carried as their display names so the error stays independent
/// of the component set it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("component kind '{kind}' was never registered")]
    UnregisteredKind { kind: String },

    #[error("cannot add '{kind}' to {entity}: entity is not alive")]
    DeadEntity { entity: Entity, kind: String },
}
