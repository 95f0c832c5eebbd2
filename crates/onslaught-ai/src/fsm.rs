//! Enemy behaviour finite state machine.
//!
//! Pure functions that compute state transitions and the side effects an
//! update should issue. No ECS dependency; operates on plain data.

use onslaught_core::config::EnemyConfig;
use onslaught_core::constants::HYSTERESIS_FACTOR;
use onslaught_core::enums::AiState;

/// Input to the FSM for a single entity.
pub struct AiContext<'a> {
    pub state: AiState,
    /// Squared distance to the tracked target.
    pub distance_sq: f32,
    /// The entity's own stat snapshot.
    pub stats: &'a EnemyConfig,
    pub has_line_of_sight: bool,
    pub now: f64,
    pub last_attack_time: f64,
    pub last_repath_time: f64,
    /// Minimum seconds between destination requests at this distance.
    pub repath_interval: f64,
}

/// What the navigation agent should do with its speed and stop flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locomotion {
    Unchanged,
    /// Chase speed, movement resumed.
    Chase,
    /// Patrol speed.
    Patrol,
    /// Movement stopped.
    Halt,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiUpdate {
    pub new_state: AiState,
    pub state_changed: bool,
    pub locomotion: Locomotion,
    /// Issue a destination request toward the target and stamp the repath time.
    pub repath: bool,
    /// Apply `stats.attack_damage` to the target and stamp the attack time.
    pub attack: bool,
    /// Turn toward the target at `stats.rotation_speed`.
    pub face_target: bool,
}

impl AiUpdate {
    fn stay(state: AiState) -> Self {
        Self {
            new_state: state,
            state_changed: false,
            locomotion: Locomotion::Unchanged,
            repath: false,
            attack: false,
            face_target: false,
        }
    }

    fn transition(to: AiState, locomotion: Locomotion) -> Self {
        Self {
            new_state: to,
            state_changed: true,
            locomotion,
            ..Self::stay(to)
        }
    }
}

/// Evaluate the FSM for one entity.
pub fn evaluate(ctx: &AiContext) -> AiUpdate {
    match ctx.state {
        AiState::Idle => evaluate_idle(ctx),
        AiState::Chasing => evaluate_chasing(ctx),
        AiState::Attacking => evaluate_attacking(ctx),
    }
}

/// Whether the repath interval has elapsed.
pub fn repath_due(ctx: &AiContext) -> bool {
    ctx.now - ctx.last_repath_time >= ctx.repath_interval
}

fn evaluate_idle(ctx: &AiContext) -> AiUpdate {
    let detection = ctx.stats.detection_range;
    if ctx.distance_sq <= detection * detection && ctx.has_line_of_sight {
        return AiUpdate {
            repath: repath_due(ctx),
            ..AiUpdate::transition(AiState::Chasing, Locomotion::Chase)
        };
    }
    AiUpdate::stay(AiState::Idle)
}

fn evaluate_chasing(ctx: &AiContext) -> AiUpdate {
    let attack = ctx.stats.attack_range;
    if ctx.distance_sq <= attack * attack {
        return AiUpdate::transition(AiState::Attacking, Locomotion::Halt);
    }

    let give_up = ctx.stats.detection_range * HYSTERESIS_FACTOR;
    if ctx.distance_sq > give_up * give_up {
        return AiUpdate::transition(AiState::Idle, Locomotion::Patrol);
    }

    AiUpdate {
        repath: repath_due(ctx),
        ..AiUpdate::stay(AiState::Chasing)
    }
}

fn evaluate_attacking(ctx: &AiContext) -> AiUpdate {
    let attack = ctx.stats.attack_range;
    let in_reach = ctx.distance_sq <= attack * attack;
    let cooled_down = ctx.now >= ctx.last_attack_time + ctx.stats.attack_cooldown as f64;

    let release = attack * HYSTERESIS_FACTOR;
    if ctx.distance_sq > release * release {
        return AiUpdate {
            repath: repath_due(ctx),
            ..AiUpdate::transition(AiState::Chasing, Locomotion::Chase)
        };
    }

    AiUpdate {
        attack: in_reach && cooled_down,
        face_target: true,
        ..AiUpdate::stay(AiState::Attacking)
    }
}
