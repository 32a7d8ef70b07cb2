//! Геометрия уровня: tagged static volumes + синхронные запросы
//!
//! Headless-замена физического движка для geometry query surface:
//! - `WorldGeometry` resource хранит AABB volumes с типизированным
//!   `SurfaceKind` (резолвится один раз при регистрации, никаких
//!   runtime string comparisons)
//! - raycast / sweep_sphere — синхронные, завершаются в пределах тика,
//!   без retry; промах = None = "no constraint" для вызывающей системы
//!
//! Sphere sweep против AABB считается через Minkowski-инфляцию
//! (консервативно по углам, для капсульных тел уровня достаточно).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Типизированная категория поверхности
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum SurfaceKind {
    /// Walkable поверхность: не препятствие, цель ground snap
    Ground,
    /// Стена/ограждение: блокирует шаг
    Wall,
    /// Прочий статический объект: блокирует шаг
    Prop,
}

/// Статический AABB volume уровня
#[derive(Debug, Clone)]
pub struct Volume {
    pub min: Vec3,
    pub max: Vec3,
    pub kind: SurfaceKind,
}

impl Volume {
    pub fn from_center_size(center: Vec3, size: Vec3, kind: SurfaceKind) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
            kind,
        }
    }
}

/// Результат raycast
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub point: Vec3,
    pub kind: SurfaceKind,
}

/// Результат sweep
#[derive(Debug, Clone, Copy)]
pub struct SweepHit {
    pub kind: SurfaceKind,
    pub distance: f32,
}

/// Статическая геометрия уровня (queried, not owned)
#[derive(Resource, Debug, Clone, Default)]
pub struct WorldGeometry {
    pub volumes: Vec<Volume>,
}

impl WorldGeometry {
    /// Ближайшее пересечение луча со статикой в пределах max_dist
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit> {
        let mut nearest: Option<(f32, SurfaceKind)> = None;

        for volume in &self.volumes {
            if let Some(t) = ray_vs_aabb(origin, dir, volume.min, volume.max) {
                if t <= max_dist && nearest.map_or(true, |(best, _)| t < best) {
                    nearest = Some((t, volume.kind));
                }
            }
        }

        nearest.map(|(t, kind)| RayHit {
            point: origin + dir * t,
            kind,
        })
    }

    /// Вертикальный probe вниз (ground adherence, next-step probe)
    pub fn raycast_down(&self, origin: Vec3, max_dist: f32) -> Option<RayHit> {
        self.raycast(origin, Vec3::NEG_Y, max_dist)
    }

    /// Ближайшее пересечение сферы радиуса radius, летящей вдоль dir
    pub fn sweep_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        dir: Vec3,
        max_dist: f32,
    ) -> Option<SweepHit> {
        let inflate = Vec3::splat(radius);
        let mut nearest: Option<SweepHit> = None;

        for volume in &self.volumes {
            let hit = ray_vs_aabb(origin, dir, volume.min - inflate, volume.max + inflate);
            if let Some(t) = hit {
                if t <= max_dist && nearest.map_or(true, |best| t < best.distance) {
                    nearest = Some(SweepHit {
                        kind: volume.kind,
                        distance: t,
                    });
                }
            }
        }

        nearest
    }
}

/// Sweep сферы против сферы (динамические тела: цель в forward sweep)
///
/// Возвращает дистанцию первого контакта вдоль dir, если он в
/// пределах max_dist.
pub fn sweep_sphere_vs_sphere(
    origin: Vec3,
    dir: Vec3,
    radius: f32,
    center: Vec3,
    other_radius: f32,
    max_dist: f32,
) -> Option<f32> {
    let combined = radius + other_radius;
    let to_center = origin - center;

    // |to_center + t*dir|^2 = combined^2, dir нормализован
    let b = to_center.dot(dir);
    let c = to_center.length_squared() - combined * combined;

    if c <= 0.0 {
        // Уже пересекаемся
        return Some(0.0);
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = -b - discriminant.sqrt();
    (t >= 0.0 && t <= max_dist).then_some(t)
}

/// Slab-пересечение луча с AABB; возвращает дистанцию входа
///
/// Origin внутри AABB даёт t = 0.
fn ray_vs_aabb(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_min: f32 = 0.0;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];

        if d.abs() < 1e-8 {
            // Луч параллелен слэбу: либо внутри диапазона, либо мимо
            if o < min[axis] || o > max[axis] {
                return None;
            }
        } else {
            let inv = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv;
            let mut t1 = (max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
    }

    Some(t_min)
}
