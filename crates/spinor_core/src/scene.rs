//! A scene: one world plus an ordered set of systems and its lifecycle.

use spinor_ecs::World;
use tracing::{debug, info};

use crate::error::SceneError;
use crate::schedule::resolve_order;
use crate::system::System;

/// Construction options for a scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub name: String,
    /// Start the scene as soon as it becomes the engine's current scene.
    pub auto_start: bool,
}

impl SceneConfig {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auto_start: true,
        }
    }
}

/// A named world with systems scheduled over it.
///
/// Systems run in an order resolved from their declared dependencies and
/// priorities; the order is recomputed whenever the system set changes,
/// never during an update. Lifecycle: [`Scene::start`] initializes every
/// system, [`Scene::update`] runs enabled systems while started and not
/// paused, and [`Scene::stop`] runs cleanup. Pausing suspends updates
/// without losing the started state.
pub struct Scene {
    name: String,
    world: World,
    systems: Vec<Box<dyn System>>,
    /// Indices into `systems`, in execution order.
    order: Vec<usize>,
    running: bool,
    paused: bool,
    auto_start: bool,
}

impl Scene {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(SceneConfig::new(name))
    }

    #[must_use]
    pub fn from_config(config: SceneConfig) -> Self {
        Self {
            name: config.name,
            world: World::new(),
            systems: Vec::new(),
            order: Vec::new(),
            running: false,
            paused: false,
            auto_start: config.auto_start,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the engine should start this scene on activation.
    #[must_use]
    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Register a system, re-resolving the execution order.
    ///
    /// Fails on a duplicate name or if the system's dependencies would
    /// close a cycle; in both cases the scene is left exactly as it was.
    /// If the scene is already running, the system is initialized
    /// immediately.
    pub fn add_system(&mut self, system: Box<dyn System>) -> Result<(), SceneError> {
        let name = system.name().to_string();
        if self.systems.iter().any(|existing| existing.name() == name) {
            return Err(SceneError::DuplicateSystem {
                system: name,
                scene: self.name.clone(),
            });
        }

        self.systems.push(system);
        match resolve_order(&self.systems) {
            Ok(order) => self.order = order,
            Err(err) => {
                // Evict the newcomer; the previous order is still valid.
                self.systems.pop();
                return Err(err);
            }
        }

        debug!(scene = %self.name, system = %name, "system registered");
        if self.running {
            let index = self.systems.len() - 1;
            self.systems[index].initialize(&mut self.world);
        }
        Ok(())
    }

    /// Deregister a system by name. Returns `false` if no such system.
    ///
    /// The execution order is patched in place: dropping one node from a
    /// valid topological order leaves a valid order for the rest.
    pub fn remove_system(&mut self, name: &str) -> bool {
        let Some(index) = self.systems.iter().position(|system| system.name() == name) else {
            return false;
        };
        if self.running {
            self.systems[index].cleanup(&mut self.world);
        }
        self.systems.remove(index);
        self.order.retain(|&slot| slot != index);
        for slot in &mut self.order {
            if *slot > index {
                *slot -= 1;
            }
        }
        debug!(scene = %self.name, system = name, "system removed");
        true
    }

    /// Borrow a registered system by name.
    #[must_use]
    pub fn get_system(&self, name: &str) -> Option<&dyn System> {
        self.systems
            .iter()
            .find(|system| system.name() == name)
            .map(|system| system.as_ref())
    }

    /// Mutably borrow a registered system by name.
    pub fn get_system_mut(&mut self, name: &str) -> Option<&mut (dyn System + 'static)> {
        self.systems
            .iter_mut()
            .find(|system| system.name() == name)
            .map(|system| system.as_mut())
    }

    /// Start the scene, initializing systems in execution order.
    /// Idempotent while running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.paused = false;
        let order = self.order.clone();
        for index in order {
            self.systems[index].initialize(&mut self.world);
        }
        info!(scene = %self.name, systems = self.systems.len(), "scene started");
    }

    /// Stop the scene, running cleanup in execution order. Idempotent
    /// while stopped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        let order = self.order.clone();
        for index in order {
            self.systems[index].cleanup(&mut self.world);
        }
        self.running = false;
        self.paused = false;
        info!(scene = %self.name, "scene stopped");
    }

    /// Suspend updates without stopping. The scene stays running.
    pub fn pause(&mut self) {
        if !self.running || self.paused {
            return;
        }
        self.paused = true;
        let order = self.order.clone();
        for index in order {
            self.systems[index].on_pause(&mut self.world);
        }
        info!(scene = %self.name, "scene paused");
    }

    /// Resume updates after a pause.
    pub fn resume(&mut self) {
        if !self.running || !self.paused {
            return;
        }
        self.paused = false;
        let order = self.order.clone();
        for index in order {
            self.systems[index].on_resume(&mut self.world);
        }
        info!(scene = %self.name, "scene resumed");
    }

    /// Run one frame: every enabled system, in execution order. Does
    /// nothing unless the scene is running and not paused.
    pub fn update(&mut self, delta_time: f64) {
        if !self.running || self.paused {
            return;
        }
        let order = self.order.clone();
        for index in order {
            if self.systems[index].is_enabled() {
                self.systems[index].update(&mut self.world, delta_time);
            }
        }
    }

    /// Stop the scene and drop all systems and world contents.
    pub fn dispose(&mut self) {
        self.stop();
        self.systems.clear();
        self.order.clear();
        self.world.clear();
        info!(scene = %self.name, "scene disposed");
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("systems", &self.systems.len())
            .field("running", &self.running)
            .field("paused", &self.paused)
            .finish()
    }
}
