//! Fundamental handle and time types.

use serde::{Deserialize, Serialize};

/// Pooled entity handle: an index into the manager's dense per-entity arrays.
///
/// Stable across reuse cycles. After a despawn the same handle may be handed
/// out again for a new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyHandle(u32);

impl EnemyHandle {
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each running tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }

    pub fn elapsed_minutes(&self) -> f64 {
        self.elapsed_secs / 60.0
    }
}

/// Passed once at spawn to seed an entity's stat snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnContext {
    pub difficulty: f32,
    pub elapsed_secs: f64,
}

impl SpawnContext {
    /// Difficulty above the 1.0 baseline, never negative.
    pub fn excess(&self) -> f32 {
        (self.difficulty - 1.0).max(0.0)
    }
}
