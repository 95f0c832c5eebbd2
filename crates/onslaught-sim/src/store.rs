//! Managed entity records stored as dense parallel arrays indexed by handle.
//!
//! Grows alongside the pool's handle space. Slots of free handles hold reset
//! data until the next registration overwrites them.

use onslaught_core::config::EnemyConfig;
use onslaught_core::enums::{AiState, EnemyKind};
use onslaught_core::types::EnemyHandle;

/// SoA storage for per-entity behaviour data.
#[derive(Debug, Default, Clone)]
pub struct EnemyStore {
    pub kinds: Vec<EnemyKind>,
    /// Stat snapshot taken at spawn. Owned by the entity, never shared.
    pub stats: Vec<EnemyConfig>,
    pub states: Vec<AiState>,
    pub last_attack: Vec<f64>,
    pub last_repath: Vec<f64>,
    /// Time of the last AI visit, used to integrate rotation between visits.
    pub last_visit: Vec<f64>,
    pub health: Vec<f32>,
    pub max_health: Vec<f32>,
    pub dead: Vec<bool>,
}

impl EnemyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Write a fresh record for a newly spawned handle. `stats` is the
    /// already-scaled snapshot; health starts full, state Idle, timers zero.
    pub fn register(&mut self, handle: EnemyHandle, kind: EnemyKind, stats: EnemyConfig, now: f64) {
        self.ensure_slot(handle.index());
        let i = handle.index();
        self.kinds[i] = kind;
        self.stats[i] = stats;
        self.states[i] = AiState::Idle;
        self.last_attack[i] = 0.0;
        self.last_repath[i] = 0.0;
        self.last_visit[i] = now;
        self.health[i] = stats.max_health;
        self.max_health[i] = stats.max_health;
        self.dead[i] = false;
    }

    /// Despawn hook: clear behaviour state so nothing leaks into the next occupant.
    /// The dead flag stays set until `register` overwrites the slot.
    pub fn reset(&mut self, handle: EnemyHandle) {
        let i = handle.index();
        if i >= self.len() {
            return;
        }
        self.states[i] = AiState::Idle;
        self.last_attack[i] = 0.0;
        self.last_repath[i] = 0.0;
        self.last_visit[i] = 0.0;
        self.health[i] = 0.0;
    }

    pub fn is_dead(&self, handle: EnemyHandle) -> bool {
        self.dead.get(handle.index()).copied().unwrap_or(false)
    }

    pub fn state(&self, handle: EnemyHandle) -> Option<AiState> {
        self.states.get(handle.index()).copied()
    }

    pub fn stats(&self, handle: EnemyHandle) -> Option<&EnemyConfig> {
        self.stats.get(handle.index())
    }

    pub fn health(&self, handle: EnemyHandle) -> Option<(f32, f32)> {
        let i = handle.index();
        Some((*self.health.get(i)?, *self.max_health.get(i)?))
    }

    fn ensure_slot(&mut self, index: usize) {
        if index < self.len() {
            return;
        }
        let new_len = index + 1;
        let filler = EnemyConfig::baseline(EnemyKind::Basic);
        self.kinds.resize(new_len, EnemyKind::Basic);
        self.stats.resize(new_len, filler);
        self.states.resize(new_len, AiState::Idle);
        self.last_attack.resize(new_len, 0.0);
        self.last_repath.resize(new_len, 0.0);
        self.last_visit.resize(new_len, 0.0);
        self.health.resize(new_len, 0.0);
        self.max_health.resize(new_len, 0.0);
        self.dead.resize(new_len, false);
    }
}
