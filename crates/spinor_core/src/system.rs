//! The [`System`] trait: per-frame behavior over the world.

use spinor_ecs::World;

/// A unit of engine behavior, run once per scene update.
///
/// Only [`System::name`] and [`System::update`] are mandatory. Everything
/// else defaults to the common case: no dependencies, priority 0, always
/// enabled, and empty lifecycle hooks.
///
/// Scheduling: `dependencies` are hard constraints (those systems run
/// earlier in the same scene; names not registered in the scene are
/// ignored). `priority` breaks the remaining ties, higher first; systems
/// equal on both run in registration order.
pub trait System: Send {
    /// Unique name within a scene. Also the handle other systems use in
    /// their `dependencies`.
    fn name(&self) -> &str;

    /// Scheduling weight among systems the dependency graph leaves
    /// unordered. Higher runs earlier.
    fn priority(&self) -> i32 {
        0
    }

    /// Names of systems that must run before this one each update.
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    /// Whether [`System::update`] should run this frame. Checked every
    /// update, so systems can toggle themselves.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Called once when the owning scene starts.
    fn initialize(&mut self, world: &mut World) {
        let _ = world;
    }

    /// Called every scene update with the frame's delta time in seconds.
    fn update(&mut self, world: &mut World, delta_time: f64);

    /// Called once when the owning scene stops or is disposed.
    fn cleanup(&mut self, world: &mut World) {
        let _ = world;
    }

    /// Called when the owning scene pauses.
    fn on_pause(&mut self, world: &mut World) {
        let _ = world;
    }

    /// Called when the owning scene resumes from pause.
    fn on_resume(&mut self, world: &mut World) {
        let _ = world;
    }
}
