//! Attack effect: cooldown-gated спавн VFX + звука в Attack state

use bevy::prelude::*;

use crate::combat::events::{EffectAssets, EffectRequested, SoundRequested};
use crate::components::{BehaviorState, Sentry, SentryTimers};

/// Проседание точки спавна эффекта к земле
const ATTACK_EFFECT_DROP: f32 = 1.0;

/// Система: эффект атаки по cooldown
///
/// Только в Attack state. Таймер декрементируется тиком; >0 — no-op.
/// По истечению: интент эффекта в offset-трансформе + одноразовый звук,
/// таймер перевзводится. Отсутствующий ассет молча пропускается,
/// cooldown при этом всё равно перевзводится.
pub fn attack_effect_cooldown(
    mut agents: Query<(&Sentry, &Transform, &BehaviorState, &mut SentryTimers)>,
    assets: Res<EffectAssets>,
    time: Res<Time<Fixed>>,
    mut effects: EventWriter<EffectRequested>,
    mut sounds: EventWriter<SoundRequested>,
) {
    let delta = time.delta_secs();

    for (sentry, transform, state, mut timers) in agents.iter_mut() {
        if !matches!(state, BehaviorState::Attack { .. }) {
            continue;
        }

        timers.attack_effect -= delta;
        if timers.attack_effect > 0.0 {
            continue;
        }

        if let Some(effect) = &assets.attack_effect {
            let mut position =
                transform.translation + transform.rotation * sentry.attack_effect_offset;
            position.y -= ATTACK_EFFECT_DROP;

            effects.write(EffectRequested {
                effect: effect.clone(),
                position,
                rotation: transform.rotation,
            });
            crate::log(&format!("Attack effect spawned at {position:?}"));
        }

        if let Some(sound) = &assets.attack_sound {
            sounds.write(SoundRequested {
                sound: sound.clone(),
                volume: assets.attack_volume,
            });
        }

        timers.attack_effect = sentry.attack_effect_cooldown;
    }
}
