//! Ядро контроллера патрульного агента
//!
//! Порядок выполнения (жёстко chained в SimulationPlugin):
//! 1. ground::stick_to_ground — привязка к поверхности ДО любых решений,
//!    чтобы последующие запросы шли от скорректированной высоты
//! 2. detection::select_behavior_state — Attack/Patrol до локомоции,
//!    гарантия подавления движения в Attack
//! 3. locomotion::patrol_locomotion — turn scheduler + edge guard + шаг
//! 4. sync_heading_to_transform — yaw-only rotation
//! 5. animation::update_animation_flags

use bevy::prelude::*;
use rand::Rng;

use crate::components::{
    AgentRng, AnimationState, BehaviorState, Heading, Sentry, SentryTimers,
};

pub mod animation;
pub mod detection;
pub mod ground;
pub mod locomotion;

// Re-export систем для регистрации в plugin
pub use animation::update_animation_flags;
pub use detection::select_behavior_state;
pub use ground::stick_to_ground;
pub use locomotion::patrol_locomotion;

/// Система: Heading → Transform.rotation
///
/// Единственное место, пишущее rotation агента. Инвариант yaw-only
/// держится конструктивно: всегда чистый from_rotation_y.
pub fn sync_heading_to_transform(
    mut agents: Query<(&Heading, &mut Transform), With<Sentry>>,
) {
    for (heading, mut transform) in agents.iter_mut() {
        transform.rotation = Quat::from_rotation_y(heading.yaw.to_radians());
    }
}

/// Spawn helper для патрульного агента
///
/// Полный набор компонентов; rotate таймер сразу взводится случайным
/// значением из интервала, как при создании на загрузке уровня.
pub fn spawn_sentry(commands: &mut Commands, position: Vec3, seed: u64) -> Entity {
    let sentry = Sentry::default();
    let mut rng = AgentRng::from_seed(seed);
    let rotate = rng
        .0
        .gen_range(sentry.rotate_interval_min..=sentry.rotate_interval_max);

    commands
        .spawn((
            Transform::from_translation(position),
            sentry,
            Heading::default(),
            SentryTimers {
                rotate,
                attack_effect: 0.0,
            },
            BehaviorState::default(),
            AnimationState::default(),
            rng,
        ))
        .id()
}
