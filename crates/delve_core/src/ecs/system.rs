//! Systems: named callbacks driven by the world's scheduler

use crate::ecs::{Commands, Component};
use std::fmt;

/// Outcome of one system run. Any error aborts the rest of the pass.
pub type SystemResult = anyhow::Result<()>;

type SystemFn<C> = dyn for<'w> FnMut(&mut Commands<'w, C>) -> SystemResult;

/// A named system callback.
///
/// The name is the system's identity: registering a second system under a
/// name already present in a phase drops the newcomer with a warning.
pub struct System<C: Component> {
    name: String,
    run: Box<SystemFn<C>>,
}

impl<C: Component> System<C> {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: for<'w> FnMut(&mut Commands<'w, C>) -> SystemResult + 'static,
    {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name and callback, borrowed separately so the scheduler can label a
    /// run while it holds the callback mutably.
    pub(crate) fn split(&mut self) -> (&str, &mut Box<SystemFn<C>>) {
        (&self.name, &mut self.run)
    }
}

impl<C: Component> fmt::Debug for System<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Bind an external resource into a system.
///
/// The resource moves into the system and is handed to `callback` on every
/// run, so the scheduler only ever sees the uniform `Commands -> Result`
/// signature.
///
/// # Example
/// ```ignore
/// let render = make_system("spawn_map", dungeon, |dungeon, commands| {
///     for tile in dungeon.tiles() {
///         commands.spawn([tile.position(), tile.glyph()])?;
///     }
///     Ok(())
/// });
/// world.register_startup_system(render);
/// ```
pub fn make_system<C, R, F>(name: impl Into<String>, mut resource: R, mut callback: F) -> System<C>
where
    C: Component,
    R: 'static,
    F: for<'w> FnMut(&mut R, &mut Commands<'w, C>) -> SystemResult + 'static,
{
    System::new(name, move |commands: &mut Commands<'_, C>| {
        callback(&mut resource, commands)
    })
}
