//! Попадания снарядов: proximity fallback + контактный путь
//!
//! Два независимых детектора:
//! - proximity: каждый тик, ловит быстрые снаряды, туннелирующие мимо
//!   collision событий
//! - contact: event-driven от внешней физики
//!
//! Оба деспавнят снаряд сразу после первой реакции, поэтому двойная
//! реакция на один снаряд невозможна (в том числе между путями: деспавн
//! флашится до обработки контактов того же тика).

use bevy::prelude::*;

use crate::combat::damage::DamageDealt;
use crate::combat::events::{ContactEvent, EffectAssets, EffectRequested, SoundRequested};
use crate::components::{Player, Projectile, Sentry};

/// Подъём точки спавна крови над точкой попадания
const BLOOD_RISE: f32 = 1.0;

/// Система: proximity-детектор снарядов
///
/// Работает всегда, независимо от состояния. Из снарядов в пределах
/// threshold берётся ближайший (tie-break по Entity ID — детерминизм
/// не зависит от порядка итерации), реакция ровно одна за тик на
/// агента; остальные кандидаты этого тика игнорируются.
pub fn detect_projectile_proximity(
    mut commands: Commands,
    agents: Query<(Entity, &Sentry, &Transform)>,
    projectiles: Query<(Entity, &Transform), With<Projectile>>,
    assets: Res<EffectAssets>,
    mut effects: EventWriter<EffectRequested>,
    mut sounds: EventWriter<SoundRequested>,
) {
    let mut consumed: Vec<Entity> = Vec::new();

    for (agent_entity, sentry, transform) in agents.iter() {
        let nearest = projectiles
            .iter()
            .filter(|(projectile, _)| !consumed.contains(projectile))
            .map(|(projectile, projectile_transform)| {
                (
                    projectile,
                    transform.translation.distance(projectile_transform.translation),
                    projectile_transform.translation,
                )
            })
            .filter(|(_, distance, _)| *distance < sentry.proximity_threshold)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.index().cmp(&b.0.index())));

        let Some((projectile, distance, position)) = nearest else {
            continue;
        };

        crate::log(&format!(
            "Projectile {projectile:?} too close to sentry {agent_entity:?} (dist={distance:.5})"
        ));

        request_hit_reaction(sentry, &assets, position, Quat::IDENTITY, &mut effects, &mut sounds);
        commands.entity(projectile).despawn();
        consumed.push(projectile);
    }
}

/// Система: контактный путь (event-driven)
///
/// Контакт с целью → фиксированный урон в health sink, один раз на
/// событие. Контакт со снарядом → hit-реакция + деспавн. Снаряд, уже
/// снятый proximity-детектором, сюда не доходит (Query::get промахнётся).
pub fn handle_contact_events(
    mut commands: Commands,
    mut contacts: EventReader<ContactEvent>,
    agents: Query<&Sentry>,
    players: Query<(), With<Player>>,
    projectiles: Query<&Transform, With<Projectile>>,
    assets: Res<EffectAssets>,
    mut damage: EventWriter<DamageDealt>,
    mut effects: EventWriter<EffectRequested>,
    mut sounds: EventWriter<SoundRequested>,
) {
    for contact in contacts.read() {
        let Ok(sentry) = agents.get(contact.agent) else {
            continue;
        };

        if players.get(contact.other).is_ok() {
            damage.write(DamageDealt {
                target: contact.other,
                amount: sentry.contact_damage,
            });
            continue;
        }

        if let Ok(projectile_transform) = projectiles.get(contact.other) {
            let point = contact.point.unwrap_or(projectile_transform.translation);
            crate::log(&format!(
                "Contact with projectile {:?} at {point:?}",
                contact.other
            ));

            request_hit_reaction(sentry, &assets, point, Quat::IDENTITY, &mut effects, &mut sounds);
            commands.entity(contact.other).despawn();
        }
    }
}

/// Hit-реакция: кровь в точке попадания + звук
///
/// Каждый ассет пропускается независимо, если не назначен.
fn request_hit_reaction(
    sentry: &Sentry,
    assets: &EffectAssets,
    position: Vec3,
    rotation: Quat,
    effects: &mut EventWriter<EffectRequested>,
    sounds: &mut EventWriter<SoundRequested>,
) {
    if let Some(blood) = &assets.blood {
        let mut spawn_position = position + sentry.blood_offset;
        spawn_position.y += BLOOD_RISE;

        effects.write(EffectRequested {
            effect: blood.clone(),
            position: spawn_position,
            rotation,
        });
    }

    if let Some(sound) = &assets.hit_sound {
        sounds.write(SoundRequested {
            sound: sound.clone(),
            volume: assets.hit_volume,
        });
    }
}
