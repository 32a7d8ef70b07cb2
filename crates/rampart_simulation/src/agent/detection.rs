//! Player detection: переключение Patrol ↔ Attack по planar distance

use bevy::prelude::*;

use crate::components::{
    planar_distance, yaw_toward, BehaviorState, Heading, Player, Sentry,
};

/// Система: выбор поведенческого состояния
///
/// planar distance ≤ attack_range → Attack: ускоренный разворот на цель
/// (rotate_speed × facing_boost), локомоция этим тиком подавлена.
/// Иначе → Patrol. LostTarget (цель деспавнена/отсутствует) деградирует
/// до patrol-only; реакквизиция — typed query по маркеру Player на
/// следующем тике, без явной отмены.
///
/// Выполняется до локомоции: подавление движения в Attack гарантировано.
pub fn select_behavior_state(
    mut agents: Query<
        (Entity, &Sentry, &Transform, &mut Heading, &mut BehaviorState),
        Without<Player>,
    >,
    players: Query<(Entity, &Transform), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    // Единственная цель; min по Entity ID для детерминизма, если их больше
    let player = players.iter().min_by_key(|(entity, _)| entity.index());

    for (entity, sentry, transform, mut heading, mut state) in agents.iter_mut() {
        let Some((player_entity, player_transform)) = player else {
            if matches!(*state, BehaviorState::Attack { .. }) {
                crate::log_info(&format!(
                    "Sentry {:?}: target lost, falling back to patrol",
                    entity
                ));
                *state = BehaviorState::Patrol;
            }
            continue;
        };

        let distance = planar_distance(transform.translation, player_transform.translation);

        if distance <= sentry.attack_range {
            if !matches!(*state, BehaviorState::Attack { .. }) {
                crate::log_info(&format!(
                    "Sentry {:?}: target in range ({distance:.2}m), attacking",
                    entity
                ));
            }
            *state = BehaviorState::Attack {
                target: player_entity,
            };

            // Разворот на цель с boost; вырожденное направление — не трогаем
            if let Some(yaw) =
                yaw_toward(transform.translation, player_transform.translation)
            {
                heading.target_yaw = yaw;
                heading.rotate_toward(sentry.rotate_speed * sentry.facing_boost * delta);
            }
        } else if matches!(*state, BehaviorState::Attack { .. }) {
            crate::log_info(&format!(
                "Sentry {:?}: target out of range ({distance:.2}m), patrolling",
                entity
            ));
            *state = BehaviorState::Patrol;
        }
    }
}
