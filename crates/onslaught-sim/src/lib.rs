//! Enemy population manager.
//!
//! Owns the object pool, the entity registry and the per-tick systems
//! (spawning, budgeted AI, damage and death) and reports the population as
//! a `PopulationSnapshot` each tick.

pub mod collaborators;
pub mod difficulty;
pub mod engine;
pub mod harness;
pub mod lifecycle;
pub mod pool;
pub mod registry;
pub mod store;
pub mod systems;

pub use engine::{DamageOutcome, EnemyManager};
pub use onslaught_core as core;
