//! Delve Core
//!
//! Contains the simulation runtime shared by every Delve host:
//! - Entity Component System (ECS) with a two-phase scheduler
//! - Deterministic tick clock

pub mod ecs;
pub mod time;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
