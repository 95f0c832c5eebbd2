//! Snapshots of the managed population, produced once per tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::EnemyEvent;
use crate::types::{EnemyHandle, SimTime};

/// Population state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub time: SimTime,
    pub phase: ManagerPhase,
    pub difficulty: f32,
    pub target_population: usize,
    pub active: usize,
    /// Active count per kind, in `EnemyKind::ALL` order.
    pub per_kind: Vec<KindCount>,
    pub states: StateCounts,
    pub spawned_this_tick: usize,
    pub updated_this_tick: usize,
    /// Events emitted since the previous snapshot.
    pub events: Vec<EnemyEvent>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KindCount {
    pub kind: EnemyKind,
    pub active: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub idle: usize,
    pub chasing: usize,
    pub attacking: usize,
}

/// Read-only view of one managed enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub handle: EnemyHandle,
    pub kind: EnemyKind,
    pub state: AiState,
    pub position: Vec3,
    pub current_health: f32,
    pub max_health: f32,
}
