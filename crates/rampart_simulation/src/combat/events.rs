//! Combat события: интенты side effects и контактные события физики

use bevy::prelude::*;

/// Ссылка на визуальный эффект (asset key хоста)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectRef(pub String);

/// Ссылка на звуковой клип (asset key хоста)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundRef(pub String);

/// Event: запрошен спавн визуального эффекта
///
/// Fire-and-forget интент для effect spawner'а хоста.
#[derive(Event, Debug, Clone)]
pub struct EffectRequested {
    pub effect: EffectRef,
    pub position: Vec3,
    pub rotation: Quat,
}

/// Event: запрошено одноразовое проигрывание звука
#[derive(Event, Debug, Clone)]
pub struct SoundRequested {
    pub sound: SoundRef,
    pub volume: f32,
}

/// Event: физический контакт агента с другим телом
///
/// Доставляется внешней физикой (collision/overlap), не поллится.
/// `point` может отсутствовать — обработчик возьмёт позицию тела.
#[derive(Event, Debug, Clone)]
pub struct ContactEvent {
    /// Агент, получивший контакт
    pub agent: Entity,
    /// Второе тело (цель или снаряд)
    pub other: Entity,
    /// Точка контакта, если физика её дала
    pub point: Option<Vec3>,
}

/// Ссылки на ассеты эффектов агента
///
/// MissingReference tolerated: None — действие молча пропускается,
/// никогда не фатально.
#[derive(Resource, Debug, Clone)]
pub struct EffectAssets {
    pub attack_effect: Option<EffectRef>,
    pub blood: Option<EffectRef>,
    pub attack_sound: Option<SoundRef>,
    pub hit_sound: Option<SoundRef>,
    pub attack_volume: f32,
    pub hit_volume: f32,
}

impl Default for EffectAssets {
    fn default() -> Self {
        Self {
            attack_effect: Some(EffectRef("sentry_attack_effect".to_string())),
            blood: Some(EffectRef("sentry_blood".to_string())),
            attack_sound: Some(SoundRef("fire_explosion_medium".to_string())),
            hit_sound: Some(SoundRef("flee_02".to_string())),
            attack_volume: 1.0,
            hit_volume: 1.0,
        }
    }
}

impl EffectAssets {
    /// Пресет без ассетов (headless тесты деградации)
    pub fn missing() -> Self {
        Self {
            attack_effect: None,
            blood: None,
            attack_sound: None,
            hit_sound: None,
            attack_volume: 1.0,
            hit_volume: 1.0,
        }
    }
}

/// Consumer: дренирует effect/sound интенты вне шага симуляции
///
/// В игре здесь мост в рендер/аудио хоста; headless — structured log.
pub fn drain_effect_requests(
    mut effects: EventReader<EffectRequested>,
    mut sounds: EventReader<SoundRequested>,
) {
    for request in effects.read() {
        crate::log(&format!(
            "[effect] {} at {:?}",
            request.effect.0, request.position
        ));
    }
    for request in sounds.read() {
        crate::log(&format!(
            "[sound] {} (volume {:.2})",
            request.sound.0, request.volume
        ));
    }
}
