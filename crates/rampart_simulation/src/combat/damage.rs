//! Damage sink: применение DamageDealt событий к Health

use bevy::prelude::*;

use crate::components::Health;

/// Event: урон нанесён
///
/// Fire-and-forget: владелец Health сам решает про смерть/удаление.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub target: Entity,
    pub amount: u32,
}

/// Система: сток урона
///
/// Цель без Health — warning и пропуск, не фатально.
pub fn apply_damage(
    mut events: EventReader<DamageDealt>,
    mut targets: Query<&mut Health>,
) {
    for event in events.read() {
        let Ok(mut health) = targets.get_mut(event.target) else {
            crate::log_warning(&format!(
                "DamageDealt: target {:?} has no Health component",
                event.target
            ));
            continue;
        };

        health.take_damage(event.amount);
        crate::log(&format!(
            "Damage {} → {:?} (HP {}/{})",
            event.amount, event.target, health.current, health.max
        ));
    }
}
