//! Entity Component System core types.
//!
//! The world owns a registry of live entities and one bucket of components
//! per registered kind. Systems never touch those collections directly: each
//! one receives a [`Commands`] handle for the duration of its run and reads
//! through [`Commands::query`] and writes through `add_entity`,
//! `add_component` and `remove_entity`.
//!
//! Mutations apply immediately. There is no deferred command queue, so a
//! system observes everything earlier systems in the same pass did.
//!
//! Component kinds form a closed set declared with [`define_components!`].

mod command_error;
mod commands;
mod component;
mod entity;
mod query;
mod store;
mod system;
mod system_registry;
mod world;

pub use command_error::CommandError;
pub use commands::Commands;
pub use component::{Component, Variant};
pub use entity::{Entity, EntityRegistry};
pub use query::QueryResult;
pub use store::{ComponentStore, Owned};
pub use system::{make_system, System, SystemResult};
pub use system_registry::{Phase, SystemHandle};
pub(crate) use system_registry::SystemRegistry;
pub use world::{World, WorldError};
