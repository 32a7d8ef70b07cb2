//! Combat подсистема агента
//!
//! Симуляция НЕ делает side effects inline: системы генерируют интенты
//! ({EffectRequested, SoundRequested, DamageDealt}), консьюмеры
//! дренируют их после шага симуляции. Детерминизм + тестируемость.
//!
//! Порядок (продолжение цепочки agent-систем):
//! 1. effects::attack_effect_cooldown — эффект атаки (Attack state)
//! 2. projectile::detect_projectile_proximity — fallback для снарядов,
//!    туннелирующих мимо collision событий (всегда)
//! 3. projectile::handle_contact_events — контактный путь (event-driven)
//! 4. damage::apply_damage — сток урона
//! 5. events::drain_effect_requests — консьюмер интентов

pub mod damage;
pub mod effects;
pub mod events;
pub mod projectile;

// Re-export основных типов
pub use damage::{apply_damage, DamageDealt};
pub use effects::attack_effect_cooldown;
pub use events::{
    drain_effect_requests, ContactEvent, EffectAssets, EffectRef, EffectRequested,
    SoundRef, SoundRequested,
};
pub use projectile::{detect_projectile_proximity, handle_contact_events};
