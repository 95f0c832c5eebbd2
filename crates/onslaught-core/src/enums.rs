//! Enumeration types used throughout the manager.

use serde::{Deserialize, Serialize};

/// Enemy archetype. Closed set; each kind has its own baseline config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// The common enemy. Its spawn weight is fixed at 1.
    #[default]
    Basic,
    /// Fast, fragile chaser.
    Runner,
    /// Slow, durable heavy hitter.
    Brute,
}

impl EnemyKind {
    pub const COUNT: usize = 3;

    pub const ALL: [EnemyKind; Self::COUNT] = [EnemyKind::Basic, EnemyKind::Runner, EnemyKind::Brute];

    /// Dense index for per-kind tables.
    pub fn index(self) -> usize {
        match self {
            EnemyKind::Basic => 0,
            EnemyKind::Runner => 1,
            EnemyKind::Brute => 2,
        }
    }
}

/// Coarse behavioral state. No terminal state: loops until death/despawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Idle,
    Chasing,
    Attacking,
}

/// Body region hit by incoming damage. Carried through to notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitZone {
    #[default]
    Body,
    Head,
    Limb,
}

/// Run state of the manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerPhase {
    #[default]
    Running,
    Paused,
}
