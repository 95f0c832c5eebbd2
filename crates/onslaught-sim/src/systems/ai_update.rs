//! AI update system advances a bounded, wrapping window of the registry
//! through the behaviour FSM each tick.
//!
//! Cost is tied to `updates_per_frame`, not to population size: an entity is
//! revisited at most every `ceil(len / updates_per_frame)` ticks.

use glam::Vec3;
use tracing::trace;

use onslaught_ai::fsm::{evaluate, AiContext, Locomotion};
use onslaught_ai::steering::{look_rotation, repath_interval, rotate_towards};
use onslaught_core::config::AiBudget;
use onslaught_core::enums::AiState;
use onslaught_core::events::EnemyEvent;
use onslaught_core::types::EnemyHandle;

use crate::collaborators::Collaborators;
use crate::lifecycle::LifecycleHooks;
use crate::pool::EnemyPool;
use crate::registry::Registry;
use crate::store::EnemyStore;

/// Run one AI window. Returns the number of registry entries consumed from
/// the budget (skipped entries count).
#[allow(clippy::too_many_arguments)]
pub fn run(
    registry: &mut Registry,
    store: &mut EnemyStore,
    pool: &mut EnemyPool,
    hooks: &mut LifecycleHooks,
    window: &mut Vec<EnemyHandle>,
    budget: &AiBudget,
    now: f64,
    collab: &mut Collaborators,
) -> usize {
    let taken = registry.next_window(budget.updates_per_frame, window);
    trace!(taken, cursor = registry.cursor(), len = registry.len(), "ai window");

    let Some(target_position) = collab.target.as_deref().map(|t| t.position()) else {
        return taken;
    };

    for &handle in window.iter() {
        // Liveness re-checked per entry: earlier entries may have despawned it.
        if !registry.contains(handle) || !pool.is_active(handle) || store.is_dead(handle) {
            continue;
        }
        update_one(handle, store, pool, hooks, budget, now, target_position, collab);
    }
    taken
}

#[allow(clippy::too_many_arguments)]
fn update_one(
    handle: EnemyHandle,
    store: &mut EnemyStore,
    pool: &mut EnemyPool,
    hooks: &mut LifecycleHooks,
    budget: &AiBudget,
    now: f64,
    target_position: Vec3,
    collab: &mut Collaborators,
) {
    let Some(transform) = pool.transform(handle) else {
        return;
    };
    let i = handle.index();
    let stats = store.stats[i];
    let state = store.states[i];
    let position = transform.position;
    let distance_sq = position.distance_squared(target_position);

    let needs_sight = state == AiState::Idle && distance_sq <= stats.detection_range * stats.detection_range;
    let has_line_of_sight = !needs_sight || collab.senses.line_of_sight(position, target_position);

    let ctx = AiContext {
        state,
        distance_sq,
        stats: &stats,
        has_line_of_sight,
        now,
        last_attack_time: store.last_attack[i],
        last_repath_time: store.last_repath[i],
        repath_interval: repath_interval(
            distance_sq,
            budget.near_repath_interval,
            budget.far_repath_interval,
            budget.far_distance,
        ),
    };
    let update = evaluate(&ctx);

    let nav = &mut *collab.navigator;
    match update.locomotion {
        Locomotion::Unchanged => {}
        Locomotion::Chase => {
            nav.set_speed(handle, stats.chase_speed);
            nav.set_stopped(handle, false);
        }
        Locomotion::Patrol => nav.set_speed(handle, stats.patrol_speed),
        Locomotion::Halt => nav.set_stopped(handle, true),
    }

    if update.repath {
        nav.set_destination(handle, target_position);
        store.last_repath[i] = now;
    }

    if update.face_target {
        if let Some(look) = look_rotation(position, target_position) {
            let since_visit = (now - store.last_visit[i]).max(0.0) as f32;
            let turned = rotate_towards(transform.orientation, look, stats.rotation_speed * since_visit);
            pool.set_orientation(handle, turned);
        }
    }

    if update.attack {
        if let Some(target) = collab.target.as_deref_mut() {
            target.apply_damage(stats.attack_damage);
        }
        store.last_attack[i] = now;
        hooks.emit(EnemyEvent::TargetHit {
            handle,
            damage: stats.attack_damage,
        });
    }

    if update.state_changed {
        store.states[i] = update.new_state;
        hooks.emit(EnemyEvent::StateChanged {
            handle,
            from: state,
            to: update.new_state,
        });
    }

    store.last_visit[i] = now;
}
