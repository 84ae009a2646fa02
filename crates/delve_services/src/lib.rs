//! Delve Services Layer
//!
//! Host-facing services that sit outside the simulation: settings loading
//! and the input source that feeds player actions into systems.

pub mod input;
pub mod settings;

pub use input::{Action, InputError, ScriptedInput};
pub use settings::{DungeonSettings, Settings, SettingsError, SimulationSettings};
