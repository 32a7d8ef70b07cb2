//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: трекаемая цель (Player, Health) и animation flags
//! - agent: патрульный агент (Sentry config, Heading, таймеры, state, RNG)
//! - projectile: типизированный маркер снаряда (вместо name-matching)

pub mod actor;
pub mod agent;
pub mod projectile;

// Re-exports для удобного импорта
pub use actor::*;
pub use agent::*;
pub use projectile::*;
