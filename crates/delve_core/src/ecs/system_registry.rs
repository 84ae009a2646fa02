use crate::ecs::{Component, System};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::fmt;

/// Scheduler phase a system belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Runs once, on the first `start()`.
    Startup,
    /// Runs on every `tick()`.
    Update,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Startup => f.write_str("startup"),
            Phase::Update => f.write_str("update"),
        }
    }
}

/// Handle assigned to each registered system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SystemHandle {
    phase: Phase,
    index: u32,
}

impl SystemHandle {
    pub fn phase(self) -> Phase {
        self.phase
    }

    /// Position in the phase's run order.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for SystemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.phase, self.index)
    }
}

/// Ordered set of systems for one phase, keyed by name.
pub(crate) struct SystemRegistry<C: Component> {
    phase: Phase,
    systems: IndexMap<String, System<C>>,
}

impl<C: Component> SystemRegistry<C> {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            systems: IndexMap::new(),
        }
    }

    /// Append `system` to the run order.
    ///
    /// A system whose name is already registered is dropped and the handle
    /// of the existing one is returned with `false`.
    pub fn register(&mut self, system: System<C>) -> (SystemHandle, bool) {
        let phase = self.phase;
        let entry = self.systems.entry(system.name().to_string());
        let index = entry.index() as u32;
        let inserted = match entry {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(system);
                true
            }
        };
        (SystemHandle { phase, index }, inserted)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.systems.keys().map(String::as_str)
    }

    /// Systems in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut System<C>> {
        self.systems.values_mut()
    }
}
