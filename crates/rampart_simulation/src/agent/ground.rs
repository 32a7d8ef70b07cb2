//! Ground adherence: вертикальная привязка агента к walkable поверхности

use bevy::prelude::*;

use crate::components::{Player, Sentry};
use crate::geometry::{SurfaceKind, WorldGeometry};

/// Система: ground snap
///
/// Probe вниз с probe_height над агентом. Попадание в Ground в пределах
/// двух высот probe → y = точка контакта + skin. Промах или не-Ground
/// (QueryMiss) → позиция не трогается, self-heal на следующем тике.
///
/// Выполняется первой в тике: все дальнейшие геометрические запросы
/// идут от скорректированной высоты.
pub fn stick_to_ground(
    mut agents: Query<(&Sentry, &mut Transform), Without<Player>>,
    geometry: Res<WorldGeometry>,
) {
    for (sentry, mut transform) in agents.iter_mut() {
        let origin = transform.translation + Vec3::Y * sentry.probe_height;

        let Some(hit) = geometry.raycast_down(origin, sentry.probe_height * 2.0) else {
            continue;
        };

        if hit.kind == SurfaceKind::Ground {
            transform.translation.y = hit.point.y + sentry.ground_skin;
        }
    }
}
