//! Lifecycle notifications emitted by the manager.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EnemyHandle;

/// Events delivered to observers and buffered into snapshots.
///
/// For a killing blow the order is `Damaged`, `Died`, `Despawned`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EnemyEvent {
    /// A pooled handle was drawn and registered with a fresh stat snapshot.
    Spawned {
        handle: EnemyHandle,
        kind: EnemyKind,
        difficulty: f32,
    },
    /// The behaviour state machine changed state.
    StateChanged {
        handle: EnemyHandle,
        from: AiState,
        to: AiState,
    },
    /// An attacking enemy damaged the tracked target.
    TargetHit { handle: EnemyHandle, damage: f32 },
    /// Health was reduced through the damage API.
    Damaged {
        handle: EnemyHandle,
        amount: f32,
        zone: HitZone,
        remaining_health: f32,
    },
    /// Health reached zero.
    Died { handle: EnemyHandle, kind: EnemyKind },
    /// The handle went back to its pool.
    Despawned { handle: EnemyHandle, kind: EnemyKind },
}

impl EnemyEvent {
    pub fn handle(&self) -> EnemyHandle {
        match *self {
            EnemyEvent::Spawned { handle, .. }
            | EnemyEvent::StateChanged { handle, .. }
            | EnemyEvent::TargetHit { handle, .. }
            | EnemyEvent::Damaged { handle, .. }
            | EnemyEvent::Died { handle, .. }
            | EnemyEvent::Despawned { handle, .. } => handle,
        }
    }
}
