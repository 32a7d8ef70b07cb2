//! RAMPART Simulation Core
//!
//! Headless ECS-симуляция патрульного агента (sentry) на Bevy 0.16.
//! Один fixed tick (60Hz) = полный цикл решения:
//! ground snap → detection → locomotion → animation flags → attack effect →
//! projectile proximity → contact events → consumers.
//!
//! Архитектура:
//! - Вся логика в FixedUpdate, системы .chain()ed для детерминизма
//! - Side effects (VFX/звук/урон) — события, дренируются консьюмером
//!   после шага симуляции, не inline
//! - RNG seedable: world seed → per-agent `AgentRng`

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod agent;
pub mod combat;
pub mod components;
pub mod geometry;
pub mod logger;

// Re-export базовых типов для удобства
pub use agent::spawn_sentry;
pub use combat::{
    apply_damage, ContactEvent, DamageDealt, EffectAssets, EffectRef, EffectRequested,
    SoundRef, SoundRequested,
};
pub use components::*;
pub use geometry::{SurfaceKind, Volume, WorldGeometry};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    LogLevel, LogPrinter,
};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Порядок систем в FixedUpdate (жёсткая цепочка):
/// 1. stick_to_ground — вертикальная привязка к поверхности
/// 2. select_behavior_state — Patrol/Attack по planar distance
/// 3. patrol_locomotion — turn scheduler + edge guard + шаг вперёд
/// 4. sync_heading_to_transform — yaw-only rotation в Transform
/// 5. update_animation_flags — attacking/speed для внешнего аниматора
/// 6. attack_effect_cooldown — cooldown-gated эффект атаки
/// 7. detect_projectile_proximity — fallback для быстрых снарядов
/// 8. handle_contact_events — контактный урон + попадания снарядов
/// 9. apply_damage — сток урона (health sink)
/// 10. drain_effect_requests — консьюмер effect/sound интентов
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // init_resource: не перетираем seed, вставленный create_headless_app
            .init_resource::<DeterministicRng>()
            .init_resource::<WorldGeometry>()
            .init_resource::<EffectAssets>()
            // Регистрация событий
            .add_event::<EffectRequested>()
            .add_event::<SoundRequested>()
            .add_event::<DamageDealt>()
            .add_event::<ContactEvent>()
            // Регистрация систем в FixedUpdate
            .add_systems(
                FixedUpdate,
                (
                    agent::stick_to_ground,
                    agent::select_behavior_state,
                    agent::patrol_locomotion,
                    agent::sync_heading_to_transform,
                    agent::update_animation_flags,
                    combat::attack_effect_cooldown,
                    combat::detect_projectile_proximity,
                    combat::handle_contact_events,
                    combat::apply_damage,
                    combat::drain_effect_requests,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Мировой генератор. Агенты получают собственные seed через
/// `derive_seed`, чтобы поведение каждого агента было воспроизводимо
/// независимо от порядка спавна остальных.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed для per-agent генератора (`AgentRng`)
    pub fn derive_seed(&mut self) -> u64 {
        self.rng.gen()
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время продвигается ManualDuration-стратегией: каждый `app.update()`
/// добавляет ровно один fixed timestep, независимо от wall clock.
/// Иначе скорость машины влияла бы на количество FixedUpdate прогонов
/// и ломала детерминизм.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )));

    // Первый update инициализирует Time с нулевой дельтой (FixedUpdate не
    // выполняется) — прогреваем здесь, чтобы каждый последующий update
    // действительно продвигал ровно один fixed tick.
    app.update();

    app
}

/// Продвигает headless симуляцию ровно на один fixed tick
pub fn advance_one_tick(app: &mut App) {
    app.update();
}

/// Snapshot мира для сравнения детерминизма
///
/// Упрощённая версия: один тип компонента, сериализация через Debug.
/// Интеграционные тесты собирают полный snapshot сами.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
