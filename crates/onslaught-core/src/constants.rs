//! Simulation constants and tuning defaults.

/// Simulation tick rate (Hz) used by the fixed-step harness and runner.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at `TICK_RATE`.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Maximum accepted time scale.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- State machine ---

/// Exit threshold multiplier for Chasing→Idle and Attacking→Chasing.
pub const HYSTERESIS_FACTOR: f32 = 1.5;

// --- Spawn placement ---

/// Candidate positions sampled before the last one is accepted regardless.
pub const SPAWN_POSITION_ATTEMPTS: u32 = 10;

/// Default ring radius around the manager origin (meters).
pub const DEFAULT_SPAWN_RING_RADIUS: f32 = 18.0;

/// Default keep-out radius around the avoid-target (meters).
pub const DEFAULT_MIN_DISTANCE_FROM_TARGET: f32 = 10.0;

// --- Population curve ---

pub const DEFAULT_HARD_CAP: usize = 400;
pub const DEFAULT_POPULATION_BASE: f32 = 20.0;
pub const DEFAULT_POPULATION_GROWTH_PER_MINUTE: f32 = 30.0;
pub const DEFAULT_PER_FRAME_SPAWN_CAP: usize = 8;

// --- Spawn rate curve (entities / second) ---

pub const DEFAULT_SPAWN_RATE_BASE: f32 = 2.0;
pub const DEFAULT_SPAWN_RATE_GROWTH_PER_MINUTE: f32 = 1.5;

// --- Difficulty ---

pub const DEFAULT_DIFFICULTY_GROWTH_PER_MINUTE: f32 = 0.25;

// --- AI budget ---

pub const DEFAULT_UPDATES_PER_FRAME: usize = 64;
/// Seconds between destination requests for enemies near the target.
pub const DEFAULT_NEAR_REPATH_INTERVAL: f64 = 0.25;
/// Seconds between destination requests for enemies beyond `DEFAULT_FAR_DISTANCE`.
pub const DEFAULT_FAR_REPATH_INTERVAL: f64 = 1.0;
pub const DEFAULT_FAR_DISTANCE: f32 = 30.0;

// --- Baseline archetype stats ---

pub const BASIC_MAX_HEALTH: f32 = 100.0;
pub const BASIC_CHASE_SPEED: f32 = 3.5;
pub const BASIC_PATROL_SPEED: f32 = 1.5;
/// Radians per second.
pub const BASIC_ROTATION_SPEED: f32 = 6.0;
pub const BASIC_DETECTION_RANGE: f32 = 20.0;
pub const BASIC_ATTACK_RANGE: f32 = 2.0;
pub const BASIC_ATTACK_DAMAGE: f32 = 10.0;
pub const BASIC_ATTACK_COOLDOWN: f32 = 1.5;

/// Runner: fragile, fast, short cooldown.
pub const RUNNER_SPEED_FACTOR: f32 = 1.8;
pub const RUNNER_HEALTH_FACTOR: f32 = 0.6;

/// Brute: slow, heavy hitting, long reach.
pub const BRUTE_SPEED_FACTOR: f32 = 0.7;
pub const BRUTE_HEALTH_FACTOR: f32 = 3.0;
pub const BRUTE_DAMAGE_FACTOR: f32 = 2.5;
