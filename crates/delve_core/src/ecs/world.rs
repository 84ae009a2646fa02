// world.rs - ECS World with phase scheduling

use crate::ecs::commands::WorldState;
use crate::ecs::query::{self, QueryResult};
use crate::ecs::{
    Commands, Component, ComponentStore, EntityRegistry, Phase, System, SystemHandle,
    SystemRegistry,
};
use crate::time::SimulationTime;
use delve_metrics::SystemProfiler;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    /// A system returned an error. `source` is that error, untouched.
    #[error("{phase} system '{system}' failed")]
    System {
        phase: Phase,
        system: String,
        #[source]
        source: anyhow::Error,
    },

    /// `start`/`tick` was entered while a pass was still in progress. A pass
    /// that unwound (a panicking system) leaves the world in this state.
    #[error("cannot begin a {requested} pass: a {running} pass is already in progress")]
    Reentrant { running: Phase, requested: Phase },
}

/// The main ECS world containing all entities, components and systems.
///
/// Lifecycle: register kinds, register systems, call [`start`](Self::start)
/// once, then [`tick`](Self::tick) once per simulation step.
pub struct World<C: Component> {
    state: WorldState<C>,
    startup: SystemRegistry<C>,
    update: SystemRegistry<C>,
    started: bool,
    running: Option<Phase>,
    time: SimulationTime,
    profiler: SystemProfiler,
}

impl<C: Component> World<C> {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::with_time(SimulationTime::new())
    }

    pub fn with_time(time: SimulationTime) -> Self {
        Self {
            state: WorldState::new(),
            startup: SystemRegistry::new(Phase::Startup),
            update: SystemRegistry::new(Phase::Update),
            started: false,
            running: None,
            time,
            profiler: SystemProfiler::new(),
        }
    }

    /// Create the bucket for `kind`.
    ///
    /// Registering a kind twice empties its bucket; register each kind once
    /// before use.
    pub fn register(&mut self, kind: C::Kind) -> &mut Self {
        let was_registered = self.state.components.is_registered(kind);
        let discarded = self.state.components.register(kind);
        if was_registered {
            tracing::warn!(%kind, discarded, "component kind re-registered; bucket reset");
        } else {
            tracing::debug!(%kind, "registered component kind");
        }
        self
    }

    /// Add `system` to the startup phase.
    ///
    /// A system named like one already in the phase is dropped with a
    /// warning and the existing handle is returned.
    pub fn register_startup_system(&mut self, system: System<C>) -> SystemHandle {
        Self::register_system(&mut self.startup, system)
    }

    /// Add `system` to the update phase. Same naming rule as
    /// [`register_startup_system`](Self::register_startup_system).
    pub fn register_update_system(&mut self, system: System<C>) -> SystemHandle {
        Self::register_system(&mut self.update, system)
    }

    fn register_system(registry: &mut SystemRegistry<C>, system: System<C>) -> SystemHandle {
        let name = system.name().to_string();
        let (handle, inserted) = registry.register(system);
        if inserted {
            tracing::debug!(system = %name, %handle, "registered system");
        } else {
            tracing::warn!(
                system = %name,
                %handle,
                "a system with this name is already registered; keeping the first"
            );
        }
        handle
    }

    /// Run every startup system once, in registration order.
    ///
    /// Later calls are no-ops. If a startup system fails the world stays
    /// un-started, so the call may be retried.
    pub fn start(&mut self) -> Result<(), WorldError> {
        self.ensure_idle(Phase::Startup)?;
        if self.started {
            tracing::trace!("startup systems already ran");
            return Ok(());
        }
        self.run_phase(Phase::Startup)?;
        self.started = true;
        Ok(())
    }

    /// Run every update system once, in registration order.
    ///
    /// Valid whether or not [`start`](Self::start) was called. The clock only
    /// advances when every system succeeded.
    pub fn tick(&mut self) -> Result<(), WorldError> {
        self.ensure_idle(Phase::Update)?;
        let _span = tracing::debug_span!("tick", tick = self.time.tick_count()).entered();
        self.run_phase(Phase::Update)?;
        self.time.advance_tick();
        Ok(())
    }

    fn ensure_idle(&self, requested: Phase) -> Result<(), WorldError> {
        match self.running {
            Some(running) => Err(WorldError::Reentrant { running, requested }),
            None => Ok(()),
        }
    }

    fn run_phase(&mut self, phase: Phase) -> Result<(), WorldError> {
        let registry = match phase {
            Phase::Startup => &mut self.startup,
            Phase::Update => &mut self.update,
        };
        tracing::debug!(%phase, systems = registry.len(), "pass begin");

        // Cleared on every normal exit; left set if a system unwinds.
        self.running = Some(phase);
        let mut commands = Commands::new(&mut self.state);

        for system in registry.iter_mut() {
            let (name, run) = system.split();
            tracing::trace!(%phase, system = name, "running system");
            let result = self.profiler.time_system(name, || run(&mut commands));
            if let Err(source) = result {
                tracing::warn!(%phase, system = name, error = %source, "system failed; aborting pass");
                self.running = None;
                return Err(WorldError::System {
                    phase,
                    system: name.to_string(),
                    source,
                });
            }
        }

        self.running = None;
        tracing::debug!(%phase, entities = self.state.entities.len(), "pass end");
        Ok(())
    }

    /// Command buffer for host-side code running outside any pass, such as
    /// a generator that populates the world before `start`.
    pub fn commands(&mut self) -> Commands<'_, C> {
        Commands::new(&mut self.state)
    }

    /// Read-only query for collaborators such as renderers.
    pub fn query(&self, kinds: &[C::Kind]) -> Vec<QueryResult<C>> {
        query::run(&self.state.components, kinds)
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.state.entities
    }

    pub fn components(&self) -> &ComponentStore<C> {
        &self.state.components
    }

    /// Names of the systems in `phase`, in run order.
    pub fn system_names(&self, phase: Phase) -> Vec<&str> {
        match phase {
            Phase::Startup => self.startup.names().collect(),
            Phase::Update => self.update.names().collect(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether a pass is in progress, or was interrupted by a panic.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Number of completed ticks.
    pub fn tick_count(&self) -> u64 {
        self.time.tick_count()
    }

    pub fn time(&self) -> &SimulationTime {
        &self.time
    }

    pub fn profiler(&self) -> &SystemProfiler {
        &self.profiler
    }
}

impl<C: Component> Default for World<C> {
    fn default() -> Self {
        Self::new()
    }
}
