//! # spinor_app — demo driver
//!
//! Builds a small scene with a handful of moving entities, then runs the
//! engine at a fixed timestep for a few seconds and reports where
//! everything ended up.

mod tick;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spinor_core::{Engine, Scene};
use spinor_defaults::{Camera, MovementSystem, Sprite, Transform, Velocity};
use spinor_math::Vector3;
use tick::{TickConfig, TickLoop};

fn build_scene() -> Result<Scene> {
    let mut scene = Scene::new("demo");
    scene.add_system(Box::new(MovementSystem))?;

    let world = scene.world_mut();

    world
        .entity()
        .with(Transform::default())
        .with(Camera::default())
        .build();

    for index in 0..4 {
        let offset = f64::from(index);
        world
            .entity()
            .with(Transform::at(Vector3::new(offset * 2.0, 0.0, 0.0)))
            .with(Velocity::new(
                Vector3::new(1.0 + offset, 0.5, 0.0),
                Vector3::new(0.0, 0.0, 0.4),
            ))
            .with(Sprite::new("demo/ship").with_layer(index))
            .build();
    }

    Ok(scene)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("spinor_app=info".parse()?))
        .init();

    info!("engine demo starting");

    let mut engine = Engine::new();
    engine.add_scene(build_scene()?)?;
    engine.set_current_scene("demo")?;

    let config = TickConfig {
        tick_rate: 60.0,
        max_ticks: 180, // three seconds
    };
    let mut tick_loop = TickLoop::new(engine, config);
    tick_loop.run();

    if let Some(scene) = tick_loop.engine_mut().current_scene_mut() {
        let entities = scene.world_mut().query().with::<Transform>().execute();
        for entity in entities {
            if let Some(t) = scene.world().get_component::<Transform>(entity) {
                info!(
                    entity = entity.id(),
                    x = t.position.x,
                    y = t.position.y,
                    z = t.position.z,
                    "final position"
                );
            }
        }
    }

    tick_loop.shutdown();
    info!("engine demo shut down");
    Ok(())
}
