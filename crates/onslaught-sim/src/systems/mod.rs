//! Per-tick systems run by the manager.
//!
//! Systems are free functions over the manager's parts. They do not own
//! state beyond what is passed in.

pub mod ai_update;
pub mod placement;
pub mod snapshot;
pub mod spawner;
