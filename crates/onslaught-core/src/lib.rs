//! Core types and definitions for the ONSLAUGHT enemy-population manager.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, configuration, commands, snapshots, events, and constants.
//! It has no simulation logic and no dependency on any engine.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
