//! The engine: a table of named scenes with one current.

use std::collections::HashMap;

use tracing::info;

use crate::error::EngineError;
use crate::scene::Scene;

/// Hosts named scenes and forwards updates to the current one.
///
/// Switching scenes stops the outgoing scene and, unless the incoming
/// scene opted out via its config, starts the incoming one. With no
/// current scene, [`Engine::update`] is a no-op.
#[derive(Debug, Default)]
pub struct Engine {
    scenes: HashMap<String, Scene>,
    current: Option<String>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene under its own name.
    pub fn add_scene(&mut self, scene: Scene) -> Result<(), EngineError> {
        let name = scene.name().to_string();
        if self.scenes.contains_key(&name) {
            return Err(EngineError::DuplicateScene(name));
        }
        info!(scene = %name, "scene registered");
        self.scenes.insert(name, scene);
        Ok(())
    }

    /// Remove a scene, disposing it. Clears the current-scene slot if it
    /// pointed at the removed scene.
    pub fn remove_scene(&mut self, name: &str) -> Result<(), EngineError> {
        let Some(mut scene) = self.scenes.remove(name) else {
            return Err(EngineError::UnknownScene(name.to_string()));
        };
        scene.dispose();
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        Ok(())
    }

    /// Make the named scene current. The previous current scene is
    /// stopped; the new one starts unless its config says otherwise.
    pub fn set_current_scene(&mut self, name: &str) -> Result<(), EngineError> {
        if !self.scenes.contains_key(name) {
            return Err(EngineError::UnknownScene(name.to_string()));
        }
        if self.current.as_deref() == Some(name) {
            return Ok(());
        }

        if let Some(previous) = self.current.take()
            && let Some(scene) = self.scenes.get_mut(&previous)
        {
            scene.stop();
        }

        self.current = Some(name.to_string());
        if let Some(scene) = self.scenes.get_mut(name)
            && scene.auto_start()
        {
            scene.start();
        }
        info!(scene = %name, "current scene switched");
        Ok(())
    }

    /// The current scene, if one is set.
    #[must_use]
    pub fn current_scene(&self) -> Option<&Scene> {
        self.current.as_deref().and_then(|name| self.scenes.get(name))
    }

    pub fn current_scene_mut(&mut self) -> Option<&mut Scene> {
        let name = self.current.as_deref()?;
        self.scenes.get_mut(name)
    }

    #[must_use]
    pub fn get_scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    pub fn get_scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Registered scene names, sorted for determinism.
    #[must_use]
    pub fn scene_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Advance the current scene by one frame.
    pub fn update(&mut self, delta_time: f64) {
        if let Some(scene) = self.current_scene_mut() {
            scene.update(delta_time);
        }
    }

    /// Dispose every scene and forget them all.
    pub fn dispose(&mut self) {
        for scene in self.scenes.values_mut() {
            scene.dispose();
        }
        self.scenes.clear();
        self.current = None;
        info!("engine disposed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use spinor_ecs::World;

    use super::*;
    use crate::system::System;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Tracker {
        label: &'static str,
        log: Log,
    }

    impl System for Tracker {
        fn name(&self) -> &str {
            "tracker"
        }

        fn initialize(&mut self, _world: &mut World) {
            self.log.lock().unwrap().push(format!("{}:init", self.label));
        }

        fn update(&mut self, _world: &mut World, _delta_time: f64) {
            self.log.lock().unwrap().push(format!("{}:update", self.label));
        }

        fn cleanup(&mut self, _world: &mut World) {
            self.log.lock().unwrap().push(format!("{}:cleanup", self.label));
        }
    }

    fn scene_with_tracker(name: &str, label: &'static str, log: &Log) -> Scene {
        let mut scene = Scene::new(name);
        scene
            .add_system(Box::new(Tracker {
                label,
                log: Arc::clone(log),
            }))
            .unwrap();
        scene
    }

    #[test]
    fn test_duplicate_scene_is_rejected() {
        let mut engine = Engine::new();
        engine.add_scene(Scene::new("menu")).unwrap();
        let err = engine.add_scene(Scene::new("menu")).unwrap_err();
        assert_eq!(err, EngineError::DuplicateScene("menu".to_string()));
        assert_eq!(engine.scene_count(), 1);
    }

    #[test]
    fn test_unknown_scene_is_an_error() {
        let mut engine = Engine::new();
        assert_eq!(
            engine.set_current_scene("nowhere").unwrap_err(),
            EngineError::UnknownScene("nowhere".to_string())
        );
        assert_eq!(
            engine.remove_scene("nowhere").unwrap_err(),
            EngineError::UnknownScene("nowhere".to_string())
        );
    }

    #[test]
    fn test_switching_stops_old_and_starts_new() {
        let log: Log = Arc::default();
        let mut engine = Engine::new();
        engine.add_scene(scene_with_tracker("menu", "menu", &log)).unwrap();
        engine.add_scene(scene_with_tracker("game", "game", &log)).unwrap();

        engine.set_current_scene("menu").unwrap();
        engine.update(0.016);
        engine.set_current_scene("game").unwrap();
        engine.update(0.016);

        assert_eq!(
            log.lock().unwrap().clone(),
            [
                "menu:init",
                "menu:update",
                "menu:cleanup",
                "game:init",
                "game:update"
            ]
        );
        assert!(!engine.get_scene("menu").unwrap().is_running());
        assert!(engine.get_scene("game").unwrap().is_running());
    }

    #[test]
    fn test_switching_to_current_scene_is_a_noop() {
        let log: Log = Arc::default();
        let mut engine = Engine::new();
        engine.add_scene(scene_with_tracker("menu", "menu", &log)).unwrap();
        engine.set_current_scene("menu").unwrap();
        engine.set_current_scene("menu").unwrap();
        assert_eq!(log.lock().unwrap().clone(), ["menu:init"]);
    }

    #[test]
    fn test_auto_start_opt_out() {
        use crate::scene::SceneConfig;

        let mut config = SceneConfig::new("loading");
        config.auto_start = false;
        let mut engine = Engine::new();
        engine.add_scene(Scene::from_config(config)).unwrap();

        engine.set_current_scene("loading").unwrap();
        assert!(!engine.current_scene().unwrap().is_running());
    }

    #[test]
    fn test_update_without_current_scene_is_a_noop() {
        let mut engine = Engine::new();
        engine.add_scene(Scene::new("idle")).unwrap();
        engine.update(0.016);
    }

    #[test]
    fn test_remove_current_scene_clears_current() {
        let mut engine = Engine::new();
        engine.add_scene(Scene::new("menu")).unwrap();
        engine.set_current_scene("menu").unwrap();
        engine.remove_scene("menu").unwrap();
        assert!(engine.current_scene().is_none());
        assert_eq!(engine.scene_count(), 0);
    }

    #[test]
    fn test_dispose_cleans_all_scenes() {
        let log: Log = Arc::default();
        let mut engine = Engine::new();
        engine.add_scene(scene_with_tracker("menu", "menu", &log)).unwrap();
        engine.set_current_scene("menu").unwrap();
        engine.dispose();
        assert!(log.lock().unwrap().contains(&"menu:cleanup".to_string()));
        assert_eq!(engine.scene_count(), 0);
        assert!(engine.current_scene().is_none());
    }

    #[test]
    fn test_scene_names_are_sorted() {
        let mut engine = Engine::new();
        engine.add_scene(Scene::new("zeta")).unwrap();
        engine.add_scene(Scene::new("alpha")).unwrap();
        assert_eq!(engine.scene_names(), ["alpha", "zeta"]);
    }
}
