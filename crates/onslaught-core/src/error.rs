//! Configuration errors. The only fallible surface of the manager.

use thiserror::Error;

use crate::enums::EnemyKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse manager config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read manager config: {0}")]
    Io(#[from] std::io::Error),

    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`ai.updates_per_frame` must be at least 1")]
    ZeroAiBudget,

    #[error("at least one enemy kind must be configured")]
    NoKinds,

    #[error("enemy kind {0:?} is configured more than once")]
    DuplicateKind(EnemyKind),
}
