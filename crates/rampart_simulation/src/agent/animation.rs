//! Per-tick animation flags

use bevy::prelude::*;

use crate::components::{AnimationState, BehaviorState};

/// Система: animation flags из поведенческого состояния
///
/// Attack → attacking=true, speed=0 (стоим); Patrol → attacking=false,
/// speed=1. Проигрывание — внешний аниматор, симуляция только пишет.
pub fn update_animation_flags(
    mut agents: Query<(&BehaviorState, &mut AnimationState)>,
) {
    for (state, mut animation) in agents.iter_mut() {
        let attacking = matches!(state, BehaviorState::Attack { .. });
        animation.attacking = attacking;
        animation.speed = if attacking { 0.0 } else { 1.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_for_states() {
        let mut animation = AnimationState::default();

        for (state, attacking, speed) in [
            (BehaviorState::Patrol, false, 1.0),
            (
                BehaviorState::Attack {
                    target: Entity::PLACEHOLDER,
                },
                true,
                0.0,
            ),
        ] {
            let is_attack = matches!(state, BehaviorState::Attack { .. });
            animation.attacking = is_attack;
            animation.speed = if is_attack { 0.0 } else { 1.0 };

            assert_eq!(animation.attacking, attacking);
            assert_eq!(animation.speed, speed);
        }
    }
}
