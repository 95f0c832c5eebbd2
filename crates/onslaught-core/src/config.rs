//! Configuration surface. Plain numeric/enum knobs, loadable from JSON.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::EnemyKind;
use crate::error::ConfigError;

/// Baseline stats for one kind. Immutable template; entities get a scaled copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub max_health: f32,
    pub chase_speed: f32,
    pub patrol_speed: f32,
    /// Radians per second.
    pub rotation_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    /// Seconds between attacks.
    pub attack_cooldown: f32,
}

impl EnemyConfig {
    /// Baseline template for a kind.
    pub fn baseline(kind: EnemyKind) -> Self {
        let basic = Self {
            max_health: BASIC_MAX_HEALTH,
            chase_speed: BASIC_CHASE_SPEED,
            patrol_speed: BASIC_PATROL_SPEED,
            rotation_speed: BASIC_ROTATION_SPEED,
            detection_range: BASIC_DETECTION_RANGE,
            attack_range: BASIC_ATTACK_RANGE,
            attack_damage: BASIC_ATTACK_DAMAGE,
            attack_cooldown: BASIC_ATTACK_COOLDOWN,
        };
        match kind {
            EnemyKind::Basic => basic,
            EnemyKind::Runner => Self {
                max_health: basic.max_health * RUNNER_HEALTH_FACTOR,
                chase_speed: basic.chase_speed * RUNNER_SPEED_FACTOR,
                patrol_speed: basic.patrol_speed * RUNNER_SPEED_FACTOR,
                rotation_speed: basic.rotation_speed * 1.5,
                detection_range: basic.detection_range * 1.25,
                attack_cooldown: basic.attack_cooldown * 0.6,
                ..basic
            },
            EnemyKind::Brute => Self {
                max_health: basic.max_health * BRUTE_HEALTH_FACTOR,
                chase_speed: basic.chase_speed * BRUTE_SPEED_FACTOR,
                patrol_speed: basic.patrol_speed * BRUTE_SPEED_FACTOR,
                rotation_speed: basic.rotation_speed * 0.5,
                attack_range: basic.attack_range * 1.5,
                attack_damage: basic.attack_damage * BRUTE_DAMAGE_FACTOR,
                attack_cooldown: basic.attack_cooldown * 1.6,
                ..basic
            },
        }
    }
}

/// Per-kind multipliers applied per unit of difficulty above 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatScaling {
    pub move_speed_per_diff: f32,
    pub damage_per_diff: f32,
    pub detection_per_diff: f32,
    pub health_per_diff: f32,
}

impl Default for StatScaling {
    fn default() -> Self {
        Self {
            move_speed_per_diff: 0.1,
            damage_per_diff: 0.25,
            detection_per_diff: 0.1,
            health_per_diff: 0.5,
        }
    }
}

/// Everything the manager knows about one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindConfig {
    pub kind: EnemyKind,
    /// `None` leaves the kind without a backing template: its spawns are no-ops.
    pub template: Option<EnemyConfig>,
    #[serde(default)]
    pub scaling: StatScaling,
    /// Inactive bodies allocated up front.
    #[serde(default)]
    pub prewarm: usize,
    /// Ignored for `EnemyKind::Basic`, whose weight is fixed at 1.
    #[serde(default)]
    pub base_weight: f32,
    #[serde(default)]
    pub weight_per_difficulty: f32,
}

impl KindConfig {
    pub fn new(kind: EnemyKind, base_weight: f32, weight_per_difficulty: f32) -> Self {
        Self {
            kind,
            template: Some(EnemyConfig::baseline(kind)),
            scaling: StatScaling::default(),
            prewarm: 0,
            base_weight,
            weight_per_difficulty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationCurve {
    pub hard_cap: usize,
    pub base: f32,
    pub growth_per_minute: f32,
}

impl Default for PopulationCurve {
    fn default() -> Self {
        Self {
            hard_cap: DEFAULT_HARD_CAP,
            base: DEFAULT_POPULATION_BASE,
            growth_per_minute: DEFAULT_POPULATION_GROWTH_PER_MINUTE,
        }
    }
}

/// Entities per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRateCurve {
    pub base: f32,
    pub growth_per_minute: f32,
}

impl Default for SpawnRateCurve {
    fn default() -> Self {
        Self {
            base: DEFAULT_SPAWN_RATE_BASE,
            growth_per_minute: DEFAULT_SPAWN_RATE_GROWTH_PER_MINUTE,
        }
    }
}

/// Axis-aligned box, sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnVolume {
    pub center: Vec3,
    pub half_extents: Vec3,
}

/// Where new enemies may appear. Priority: `points`, then `volume`, then the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnArea {
    pub points: Vec<Vec3>,
    pub volume: Option<SpawnVolume>,
    /// Center of the fallback ring.
    pub origin: Vec3,
    pub ring_radius: f32,
    pub min_distance_from_target: f32,
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            volume: None,
            origin: Vec3::ZERO,
            ring_radius: DEFAULT_SPAWN_RING_RADIUS,
            min_distance_from_target: DEFAULT_MIN_DISTANCE_FROM_TARGET,
        }
    }
}

/// Per-frame AI cost caps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiBudget {
    pub updates_per_frame: usize,
    pub near_repath_interval: f64,
    pub far_repath_interval: f64,
    pub far_distance: f32,
}

impl Default for AiBudget {
    fn default() -> Self {
        Self {
            updates_per_frame: DEFAULT_UPDATES_PER_FRAME,
            near_repath_interval: DEFAULT_NEAR_REPATH_INTERVAL,
            far_repath_interval: DEFAULT_FAR_REPATH_INTERVAL,
            far_distance: DEFAULT_FAR_DISTANCE,
        }
    }
}

/// Complete manager configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub difficulty_growth_per_minute: f32,
    pub per_frame_spawn_cap: usize,
    pub population: PopulationCurve,
    pub spawn_rate: SpawnRateCurve,
    pub area: SpawnArea,
    pub ai: AiBudget,
    pub kinds: Vec<KindConfig>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            difficulty_growth_per_minute: DEFAULT_DIFFICULTY_GROWTH_PER_MINUTE,
            per_frame_spawn_cap: DEFAULT_PER_FRAME_SPAWN_CAP,
            population: PopulationCurve::default(),
            spawn_rate: SpawnRateCurve::default(),
            area: SpawnArea::default(),
            ai: AiBudget::default(),
            kinds: vec![
                KindConfig {
                    prewarm: 64,
                    ..KindConfig::new(EnemyKind::Basic, 1.0, 0.0)
                },
                KindConfig {
                    prewarm: 16,
                    ..KindConfig::new(EnemyKind::Runner, 0.25, 0.2)
                },
                KindConfig {
                    prewarm: 8,
                    ..KindConfig::new(EnemyKind::Brute, 0.05, 0.15)
                },
            ],
        }
    }
}

impl ManagerConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn kind(&self, kind: EnemyKind) -> Option<&KindConfig> {
        self.kinds.iter().find(|k| k.kind == kind)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kinds.is_empty() {
            return Err(ConfigError::NoKinds);
        }
        for (i, kind) in self.kinds.iter().enumerate() {
            if self.kinds[..i].iter().any(|k| k.kind == kind.kind) {
                return Err(ConfigError::DuplicateKind(kind.kind));
            }
            non_negative("kinds.base_weight", kind.base_weight as f64)?;
            non_negative("kinds.weight_per_difficulty", kind.weight_per_difficulty as f64)?;
        }
        if self.ai.updates_per_frame == 0 {
            return Err(ConfigError::ZeroAiBudget);
        }

        non_negative("time_scale", self.time_scale)?;
        non_negative("difficulty_growth_per_minute", self.difficulty_growth_per_minute as f64)?;
        non_negative("population.base", self.population.base as f64)?;
        non_negative("population.growth_per_minute", self.population.growth_per_minute as f64)?;
        non_negative("spawn_rate.base", self.spawn_rate.base as f64)?;
        non_negative("spawn_rate.growth_per_minute", self.spawn_rate.growth_per_minute as f64)?;
        non_negative("area.ring_radius", self.area.ring_radius as f64)?;
        non_negative("area.min_distance_from_target", self.area.min_distance_from_target as f64)?;
        non_negative("ai.near_repath_interval", self.ai.near_repath_interval)?;
        non_negative("ai.far_repath_interval", self.ai.far_repath_interval)?;
        non_negative("ai.far_distance", self.ai.far_distance as f64)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}
