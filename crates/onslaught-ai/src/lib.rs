//! Enemy AI for ONSLAUGHT.
//!
//! Implements the shared behaviour state machine and the steering helpers
//! the update scheduler uses to throttle repaths and turn toward the target.

pub mod fsm;
pub mod steering;

pub use onslaught_core as core;

#[cfg(test)]
mod tests;
