//! Patrol locomotion: turn scheduler + edge guard
//!
//! Два механизма в одном проходе (только Patrol state):
//! - PatrolTurnScheduler: countdown → случайный yaw в ±120°, rescheduling
//!   равномерно из интервала; каждый тик ограниченный поворот к цели
//! - EdgeGuardLocomotion: forward sphere sweep + next-step ground probe;
//!   блок → BigTurnAway (±90°, случайный знак), иначе шаг вперёд

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::components::{
    AgentRng, BehaviorState, Heading, Player, Sentry, SentryTimers,
};
use crate::geometry::{sweep_sphere_vs_sphere, SurfaceKind, WorldGeometry};

/// Максимальный случайный поворот планировщика (градусы, симметрично)
const MAX_PATROL_TURN_DEG: f32 = 120.0;

/// Фиксированный разворот edge guard (знак случайный)
const BIG_TURN_DEG: f32 = 90.0;

/// Высота запуска forward sweep над позицией агента
const FORWARD_PROBE_HEIGHT: f32 = 1.0;

/// Радиус тела цели для sphere-sphere sweep
const PLAYER_BODY_RADIUS: f32 = 0.4;

/// Доля probe_height: большее проседание к земле на следующем шаге —
/// обрыв, шаг запрещён
const MAX_DROP_FRACTION: f32 = 0.9;

/// Система: патрульная локомоция
///
/// В Attack state не делает ничего — forward displacement строго ноль.
pub fn patrol_locomotion(
    mut agents: Query<
        (
            &Sentry,
            &mut Transform,
            &mut Heading,
            &mut SentryTimers,
            &mut AgentRng,
            &BehaviorState,
        ),
        Without<Player>,
    >,
    players: Query<&Transform, With<Player>>,
    geometry: Res<WorldGeometry>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (sentry, mut transform, mut heading, mut timers, mut rng, state) in
        agents.iter_mut()
    {
        if matches!(state, BehaviorState::Attack { .. }) {
            continue;
        }

        // --- Turn scheduler ---
        timers.rotate -= delta;
        if timers.rotate <= 0.0 {
            let delta_yaw = rng.0.gen_range(-MAX_PATROL_TURN_DEG..=MAX_PATROL_TURN_DEG);
            heading.target_yaw = heading.yaw + delta_yaw;
            timers.rotate = rng
                .0
                .gen_range(sentry.rotate_interval_min..=sentry.rotate_interval_max);
            crate::log(&format!("Patrol turn by timer: delta_yaw={delta_yaw:+.1}"));
        }

        // Ограниченный шаг поворота — каждый тик, не только по истечению
        heading.rotate_toward(sentry.rotate_speed * delta);

        // --- Edge guard ---
        let step = heading.forward() * sentry.move_speed * delta;

        let clear = forward_is_clear(sentry, &transform, &heading, step, &geometry, &players)
            && next_step_stays_on_ground(sentry, &transform, step, &geometry);

        if clear {
            transform.translation += step;
        } else {
            big_turn_away(sentry, &mut heading, &mut timers, &mut rng.0);
        }
    }
}

/// Forward sweep: true — путь чист
///
/// Классификация первого контакта: цель или Ground — не препятствие
/// (self исключён конструктивно — агента нет в статике). Промах =
/// "no constraint". Всё остальное блокирует.
fn forward_is_clear(
    sentry: &Sentry,
    transform: &Transform,
    heading: &Heading,
    step: Vec3,
    geometry: &WorldGeometry,
    players: &Query<&Transform, With<Player>>,
) -> bool {
    let origin = transform.translation + Vec3::Y * FORWARD_PROBE_HEIGHT;
    let dir = heading.forward();
    let check_dist = (step.length() + sentry.forward_probe_margin).max(sentry.forward_probe_min);

    let static_hit = geometry.sweep_sphere(origin, sentry.body_radius, dir, check_dist);

    // Цель тоже участвует в sweep: она может оказаться первым контактом
    // и заслонить стену позади себя — тогда путь считается чистым
    let player_hit = players
        .iter()
        .filter_map(|player_transform| {
            sweep_sphere_vs_sphere(
                origin,
                dir,
                sentry.body_radius,
                player_transform.translation + Vec3::Y * FORWARD_PROBE_HEIGHT,
                PLAYER_BODY_RADIUS,
                check_dist,
            )
        })
        .min_by(|a, b| a.total_cmp(b));

    match (static_hit, player_hit) {
        (None, _) => true,
        (Some(hit), Some(player_dist)) if player_dist < hit.distance => true,
        (Some(hit), _) => hit.kind == SurfaceKind::Ground,
    }
}

/// Next-step ground probe: true — после шага под ногами остаётся земля
///
/// Отклоняет шаг, если probe в кандидатной позиции промахивается, видит
/// не-Ground или проецируемое падение превышает долю probe_height.
/// Ловит высокие обрывы без каких-либо препятствий на пути.
fn next_step_stays_on_ground(
    sentry: &Sentry,
    transform: &Transform,
    step: Vec3,
    geometry: &WorldGeometry,
) -> bool {
    let next = transform.translation + step;
    let probe_start = next + Vec3::Y * sentry.probe_height;
    let ray_len = (sentry.probe_height * 2.0).max(10.0);

    match geometry.raycast_down(probe_start, ray_len) {
        Some(hit) if hit.kind == SurfaceKind::Ground => {
            let drop = transform.translation.y - hit.point.y;
            drop <= sentry.probe_height * MAX_DROP_FRACTION
        }
        _ => false,
    }
}

/// BigTurnAway: целевой yaw = текущий ± 90°, знак монеткой
///
/// rotate таймер перевзводится из интервала, чтобы планировщик не
/// перебил разворот немедленно.
fn big_turn_away(
    sentry: &Sentry,
    heading: &mut Heading,
    timers: &mut SentryTimers,
    rng: &mut ChaCha8Rng,
) {
    let delta_yaw = if rng.gen_bool(0.5) {
        BIG_TURN_DEG
    } else {
        -BIG_TURN_DEG
    };
    heading.target_yaw = heading.yaw + delta_yaw;
    timers.rotate = rng.gen_range(sentry.rotate_interval_min..=sentry.rotate_interval_max);

    crate::log(&format!("Edge guard: turned away, delta_yaw={delta_yaw:+.0}"));
}
