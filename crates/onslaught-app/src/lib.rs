//! Headless runner for the enemy population manager.
//!
//! Drives the manager at a fixed tick rate with a scripted gunner so the
//! pool recycles, and reports population statistics.

pub mod game_loop;

pub use onslaught_core as core;
