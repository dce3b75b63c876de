//! Fixed-timestep frame loop around the engine.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use spinor_core::Engine;

/// Configuration for the frame loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target frames per second.
    pub tick_rate: f64,
    /// Maximum number of frames to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

/// Drives an [`Engine`] at a fixed timestep.
///
/// Each frame advances the engine by exactly `1 / tick_rate` seconds of
/// simulated time, then sleeps off the remaining wall-clock budget. A
/// frame that overruns its budget is logged and the loop continues
/// without trying to catch up.
#[derive(Debug)]
pub struct TickLoop {
    tick_id: u64,
    config: TickConfig,
    engine: Engine,
}

impl TickLoop {
    #[must_use]
    pub fn new(engine: Engine, config: TickConfig) -> Self {
        Self {
            tick_id: 0,
            config,
            engine,
        }
    }

    /// Frames advanced so far.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Advance the engine by one frame of `dt` simulated seconds.
    pub fn tick(&mut self, dt: f64) {
        self.tick_id += 1;
        debug!(tick_id = self.tick_id, dt, "tick");
        self.engine.update(dt);
    }

    /// Run until `max_ticks` frames have elapsed (forever if 0).
    pub fn run(&mut self) {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting frame loop"
        );

        loop {
            let start = Instant::now();

            self.tick(tick_duration.as_secs_f64());

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "frame loop complete");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "frame exceeded time budget"
                );
            }
        }
    }

    /// Tear the engine down.
    pub fn shutdown(&mut self) {
        self.engine.dispose();
    }
}

#[cfg(test)]
mod tests {
    use spinor_core::Scene;
    use spinor_defaults::{MovementSystem, Transform, Velocity};
    use spinor_math::Vector3;

    use super::*;

    #[test]
    fn test_tick_advances_counter() {
        let mut tick_loop = TickLoop::new(Engine::new(), TickConfig::default());
        assert_eq!(tick_loop.tick_id(), 0);
        tick_loop.tick(1.0 / 60.0);
        tick_loop.tick(1.0 / 60.0);
        assert_eq!(tick_loop.tick_id(), 2);
    }

    #[test]
    fn test_limited_run_moves_entities() {
        let mut scene = Scene::new("sim");
        scene.add_system(Box::new(MovementSystem)).unwrap();
        let entity = scene
            .world_mut()
            .entity()
            .with(Transform::default())
            .with(Velocity::linear(Vector3::new(60.0, 0.0, 0.0)))
            .build();

        let mut engine = Engine::new();
        engine.add_scene(scene).unwrap();
        engine.set_current_scene("sim").unwrap();

        let config = TickConfig {
            tick_rate: 1000.0,
            max_ticks: 10,
        };
        let mut tick_loop = TickLoop::new(engine, config);
        tick_loop.run();

        assert_eq!(tick_loop.tick_id(), 10);
        let world = tick_loop.engine().current_scene().unwrap().world();
        let t = world.get_component::<Transform>(entity).unwrap();
        // 10 frames of 1 ms each at 60 units/s.
        assert!(t.position.approx_eq_eps(Vector3::new(0.6, 0.0, 0.0), 1e-9));
    }
}
