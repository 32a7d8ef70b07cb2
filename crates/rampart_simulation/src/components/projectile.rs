//! Типизированный маркер снаряда
//!
//! Замена name-substring matching: спавнер вешает маркер при создании,
//! детектор делает query по маркеру. Это и есть "индексированный набор"
//! снарядов — ECS поддерживает его на spawn/despawn автоматически.

use bevy::prelude::*;

/// Маркер снаряда, летящего по миру
///
/// Владелец lifecycle — внешний спавнер; контроллер агента лишь
/// деспавнит снаряд при первом попадании.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Projectile;

/// Spawn helper для снаряда (тесты, headless binary)
pub fn spawn_projectile(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((Transform::from_translation(position), Projectile))
        .id()
}
