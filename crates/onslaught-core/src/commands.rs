//! Commands sent from the host to the manager.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ManagerCommand {
    /// Stop spawning, AI updates and the clock.
    Pause,
    /// Resume after `Pause`.
    Resume,
    /// Set time scale (1.0 = normal, clamped to 0..=4).
    SetTimeScale { scale: f64 },
    /// Return every active enemy to its pool.
    DespawnAll,
    /// Allocate additional inactive bodies for a kind.
    Prewarm { kind: EnemyKind, count: usize },
}
