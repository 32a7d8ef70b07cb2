//! Headless запуск RAMPART
//!
//! Платформа 20×20 со стеной, один патрульный агент, цель в углу.
//! Прогоняет 1000 fixed тиков и печатает состояние каждые 100.

use bevy::prelude::*;
use rampart_simulation::*;

fn main() {
    let seed = 42;
    println!("Starting RAMPART headless simulation (seed: {seed})");

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let mut geometry = WorldGeometry::default();
    geometry.volumes.push(Volume::from_center_size(
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(20.0, 1.0, 20.0),
        SurfaceKind::Ground,
    ));
    geometry.volumes.push(Volume::from_center_size(
        Vec3::new(0.0, 1.0, -9.0),
        Vec3::new(20.0, 2.0, 0.5),
        SurfaceKind::Wall,
    ));
    app.insert_resource(geometry);

    let agent_seed = app
        .world_mut()
        .resource_mut::<DeterministicRng>()
        .derive_seed();
    let sentry = spawn_sentry(
        &mut app.world_mut().commands(),
        Vec3::new(0.0, 0.5, 0.0),
        agent_seed,
    );
    spawn_player(&mut app.world_mut().commands(), Vec3::new(6.0, 0.0, 6.0));
    app.world_mut().flush();

    for tick in 0..1000 {
        advance_one_tick(&mut app);

        if tick % 100 == 0 {
            let world = app.world();
            if let (Some(transform), Some(state)) = (
                world.get::<Transform>(sentry),
                world.get::<BehaviorState>(sentry),
            ) {
                println!(
                    "Tick {tick}: pos=({:.2}, {:.2}, {:.2}) state={state:?}",
                    transform.translation.x, transform.translation.y, transform.translation.z
                );
            }
        }
    }

    println!("Simulation complete!");
}
