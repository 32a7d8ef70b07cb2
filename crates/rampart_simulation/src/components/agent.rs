//! Компоненты патрульного агента: конфиг, ориентация, таймеры, state, RNG

use crate::components::actor::AnimationState;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Конфиг патрульного агента (tuning)
///
/// Значения по умолчанию — боевой пресет уровня.
/// Владеет только контроллер; мутируется исключительно внутри тика.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Heading, SentryTimers, BehaviorState, AnimationState)]
pub struct Sentry {
    /// Скорость движения (m/s)
    pub move_speed: f32,
    /// Скорость поворота (градусы/сек)
    pub rotate_speed: f32,
    /// Интервал перепланирования поворота, равномерный (сек)
    pub rotate_interval_min: f32,
    pub rotate_interval_max: f32,
    /// Радиус атаки (planar, метры)
    pub attack_range: f32,
    /// Множитель rotate_speed при развороте на цель в Attack
    pub facing_boost: f32,
    /// Высота запуска ground probe над агентом (метры)
    pub probe_height: f32,
    /// Skin offset над точкой контакта с землёй
    pub ground_skin: f32,
    /// Радиус тела для forward sweep
    pub body_radius: f32,
    /// Запас дистанции forward sweep поверх длины шага
    pub forward_probe_margin: f32,
    /// Минимальная дистанция forward sweep
    pub forward_probe_min: f32,
    /// Порог proximity-детекции снаряда (метры)
    pub proximity_threshold: f32,
    /// Фиксированный контактный урон цели
    pub contact_damage: u32,
    /// Cooldown эффекта атаки (сек)
    pub attack_effect_cooldown: f32,
    /// Offset спавна эффекта атаки (agent-local)
    pub attack_effect_offset: Vec3,
    /// Offset спавна крови относительно точки попадания
    pub blood_offset: Vec3,
}

impl Default for Sentry {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            rotate_speed: 360.0,
            rotate_interval_min: 5.0,
            rotate_interval_max: 8.0,
            attack_range: 2.0,
            facing_boost: 3.0,
            probe_height: 15.0,
            ground_skin: 0.01,
            body_radius: 0.4,
            forward_probe_margin: 0.2,
            forward_probe_min: 0.5,
            proximity_threshold: 0.01,
            contact_damage: 10,
            attack_effect_cooldown: 1.0,
            attack_effect_offset: Vec3::new(0.0, 1.0, 0.5),
            blood_offset: Vec3::new(0.0, 0.05, 0.0),
        }
    }
}

/// Yaw-only ориентация агента
///
/// Инвариант: никакого pitch/roll, Transform.rotation — всегда чистый
/// `Quat::from_rotation_y`. Хранится в градусах.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Heading {
    /// Текущий yaw (градусы)
    pub yaw: f32,
    /// Целевой yaw, к которому идёт ограниченный поворот
    pub target_yaw: f32,
}

impl Heading {
    /// Forward-вектор по Bevy-конвенции (yaw 0 → -Z)
    pub fn forward(&self) -> Vec3 {
        let rad = self.yaw.to_radians();
        Vec3::new(-rad.sin(), 0.0, -rad.cos())
    }

    /// Ограниченный угловой шаг к target_yaw (никогда не мгновенный)
    pub fn rotate_toward(&mut self, max_step_deg: f32) {
        let diff = wrap_degrees(self.target_yaw - self.yaw);
        let step = diff.clamp(-max_step_deg, max_step_deg);
        self.yaw = wrap_degrees(self.yaw + step);
    }
}

/// Tick-декрементируемые таймеры агента
///
/// Инвариант: оба ≥ 0 после обработки тика (сброс при срабатывании).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct SentryTimers {
    /// Countdown до следующего случайного поворота (Patrol)
    pub rotate: f32,
    /// Countdown до следующего эффекта атаки (Attack)
    pub attack_effect: f32,
}

/// Поведенческое состояние агента
///
/// Patrol и Attack взаимоисключающие в пределах тика: в Attack
/// локомоция подавлена полностью.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum BehaviorState {
    /// Patrol — локомоция + случайные повороты, цели в радиусе нет
    Patrol,
    /// Attack — разворот на цель, нулевое смещение
    Attack { target: Entity },
}

impl Default for BehaviorState {
    fn default() -> Self {
        Self::Patrol
    }
}

/// Per-agent детерминистичный генератор
///
/// Seed выдаёт мировой `DeterministicRng::derive_seed`, так что
/// расписание поворотов агента воспроизводимо в тестах.
#[derive(Component)]
pub struct AgentRng(pub ChaCha8Rng);

impl AgentRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Нормализация угла в [-180, 180)
pub fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Planar distance: вертикальная компонента обеих точек обнуляется
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let da = Vec3::new(a.x, 0.0, a.z);
    let db = Vec3::new(b.x, 0.0, b.z);
    da.distance(db)
}

/// Yaw (градусы), при котором forward смотрит из `from` в `to` (planar)
///
/// None при вырожденном направлении (цель прямо над/под агентом).
pub fn yaw_toward(from: Vec3, to: Vec3) -> Option<f32> {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx * dx + dz * dz < 1e-6 {
        return None;
    }
    Some((-dx).atan2(-dz).to_degrees())
}
