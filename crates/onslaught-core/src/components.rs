//! ECS components for pooled hecs bodies.
//!
//! Components are plain data structs with no methods.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;
use crate::types::EnemyHandle;

/// World placement of a pooled body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

/// Back-reference from a body to the pool slot that owns it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pooled {
    pub kind: EnemyKind,
    pub handle: EnemyHandle,
}

/// Marks a body as active (spawned, not sitting in a free list).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Active;
