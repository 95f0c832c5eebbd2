//! Snapshot system: reads the manager's parts and builds a PopulationSnapshot.
//!
//! This system is read-only and never modifies the population.

use onslaught_core::enums::{AiState, EnemyKind, ManagerPhase};
use onslaught_core::events::EnemyEvent;
use onslaught_core::state::{EnemyView, KindCount, PopulationSnapshot, StateCounts};
use onslaught_core::types::{EnemyHandle, SimTime};

use crate::difficulty::DifficultyModel;
use crate::pool::EnemyPool;
use crate::registry::Registry;
use crate::store::EnemyStore;

/// Per-tick counters reported alongside the population state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickCounters {
    pub spawned: usize,
    pub updated: usize,
}

/// Build a complete PopulationSnapshot from the current state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    time: &SimTime,
    phase: ManagerPhase,
    model: &DifficultyModel,
    pool: &EnemyPool,
    store: &EnemyStore,
    registry: &Registry,
    counters: TickCounters,
    events: Vec<EnemyEvent>,
) -> PopulationSnapshot {
    PopulationSnapshot {
        time: *time,
        phase,
        difficulty: model.difficulty_at(time.elapsed_secs),
        target_population: model.target_population(time.elapsed_secs),
        active: pool.total_active(),
        per_kind: EnemyKind::ALL
            .iter()
            .map(|&kind| KindCount {
                kind,
                active: pool.active_count(kind),
            })
            .collect(),
        states: count_states(store, registry),
        spawned_this_tick: counters.spawned,
        updated_this_tick: counters.updated,
        events,
    }
}

fn count_states(store: &EnemyStore, registry: &Registry) -> StateCounts {
    let mut counts = StateCounts::default();
    for handle in registry.iter() {
        match store.state(handle) {
            Some(AiState::Idle) => counts.idle += 1,
            Some(AiState::Chasing) => counts.chasing += 1,
            Some(AiState::Attacking) => counts.attacking += 1,
            None => {}
        }
    }
    counts
}

/// View of one active enemy, `None` for free or unknown handles.
pub fn enemy_view(pool: &EnemyPool, store: &EnemyStore, handle: EnemyHandle) -> Option<EnemyView> {
    if !pool.is_active(handle) {
        return None;
    }
    let (current_health, max_health) = store.health(handle)?;
    Some(EnemyView {
        handle,
        kind: pool.kind_of(handle)?,
        state: store.state(handle)?,
        position: pool.position(handle)?,
        current_health,
        max_health,
    })
}
