//! Цель агента (игрок) и выходные animation flags

use bevy::prelude::*;

/// Маркер трекаемой цели
///
/// Typed-замена tag lookup'а: агент реакквайрит цель запросом по этому
/// маркеру, никаких строковых сравнений.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Здоровье (health sink цели)
///
/// Инвариант: 0 ≤ current ≤ max.
/// Смерть/удаление — ответственность владельца, не симуляции агента.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Per-tick animation flags для внешнего аниматора
///
/// Симуляция только пишет флаги, проигрывание — снаружи.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AnimationState {
    /// Агент в Attack state
    pub attacking: bool,
    /// Скорость локомоции для blend (0 в Attack, 1 в Patrol)
    pub speed: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            attacking: false,
            speed: 1.0,
        }
    }
}

/// Spawn helper для цели
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Player,
            Health::default(),
        ))
        .id()
}
