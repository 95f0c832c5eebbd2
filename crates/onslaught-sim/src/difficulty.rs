//! Difficulty model: monotonic curves over elapsed time, plus the one-time
//! stat scaling applied when an entity is registered.

use onslaught_core::config::{EnemyConfig, ManagerConfig, PopulationCurve, SpawnRateCurve, StatScaling};
use onslaught_core::types::SpawnContext;

/// Time-based curves driving population, spawn rate and per-entity stats.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyModel {
    pub growth_per_minute: f32,
    pub population: PopulationCurve,
    pub spawn_rate: SpawnRateCurve,
}

impl DifficultyModel {
    pub fn from_config(config: &ManagerConfig) -> Self {
        Self {
            growth_per_minute: config.difficulty_growth_per_minute,
            population: config.population,
            spawn_rate: config.spawn_rate,
        }
    }

    /// `1 + growth * minutes`.
    pub fn difficulty_at(&self, elapsed_secs: f64) -> f32 {
        1.0 + self.growth_per_minute * minutes(elapsed_secs)
    }

    /// `min(hard_cap, base + growth * minutes)`, floored to whole entities.
    pub fn target_population(&self, elapsed_secs: f64) -> usize {
        let raw = self.population.base + self.population.growth_per_minute * minutes(elapsed_secs);
        (raw.max(0.0).floor() as usize).min(self.population.hard_cap)
    }

    /// Entities per second.
    pub fn spawn_rate(&self, elapsed_secs: f64) -> f32 {
        self.spawn_rate.base + self.spawn_rate.growth_per_minute * minutes(elapsed_secs)
    }

    pub fn spawn_context(&self, elapsed_secs: f64) -> SpawnContext {
        SpawnContext {
            difficulty: self.difficulty_at(elapsed_secs),
            elapsed_secs,
        }
    }
}

fn minutes(elapsed_secs: f64) -> f32 {
    (elapsed_secs / 60.0) as f32
}

/// Snapshot a baseline template at the spawn-time difficulty.
///
/// Speeds, damage, detection range and health scale linearly with the
/// difficulty above 1.0. The result is owned by one entity and never
/// revisited when global difficulty changes later.
pub fn scale_stats(base: &EnemyConfig, scaling: &StatScaling, ctx: &SpawnContext) -> EnemyConfig {
    let d = ctx.excess();
    let speed = 1.0 + scaling.move_speed_per_diff * d;
    EnemyConfig {
        chase_speed: base.chase_speed * speed,
        patrol_speed: base.patrol_speed * speed,
        attack_damage: base.attack_damage * (1.0 + scaling.damage_per_diff * d),
        detection_range: base.detection_range * (1.0 + scaling.detection_per_diff * d),
        max_health: base.max_health * (1.0 + scaling.health_per_diff * d),
        ..*base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onslaught_core::enums::EnemyKind;

    fn model() -> DifficultyModel {
        DifficultyModel {
            growth_per_minute: 0.5,
            population: PopulationCurve {
                hard_cap: 100,
                base: 10.0,
                growth_per_minute: 20.0,
            },
            spawn_rate: SpawnRateCurve {
                base: 1.0,
                growth_per_minute: 2.0,
            },
        }
    }

    #[test]
    fn test_difficulty_curve() {
        let m = model();
        assert_eq!(m.difficulty_at(0.0), 1.0);
        assert!((m.difficulty_at(120.0) - 2.0).abs() < 1e-6);
        assert!(m.difficulty_at(61.0) > m.difficulty_at(60.0), "monotonic");
    }

    #[test]
    fn test_target_population_caps() {
        let m = model();
        assert_eq!(m.target_population(0.0), 10);
        assert_eq!(m.target_population(90.0), 40);
        assert_eq!(m.target_population(60.0 * 60.0), 100, "hard cap applies");
    }

    #[test]
    fn test_spawn_rate_curve() {
        let m = model();
        assert!((m.spawn_rate(30.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_stats_at_baseline_is_identity() {
        let base = EnemyConfig::baseline(EnemyKind::Basic);
        let ctx = SpawnContext {
            difficulty: 1.0,
            elapsed_secs: 0.0,
        };
        assert_eq!(scale_stats(&base, &StatScaling::default(), &ctx), base);
    }

    #[test]
    fn test_scale_stats_applies_each_factor() {
        let base = EnemyConfig::baseline(EnemyKind::Basic);
        let scaling = StatScaling {
            move_speed_per_diff: 0.1,
            damage_per_diff: 0.2,
            detection_per_diff: 0.3,
            health_per_diff: 0.5,
        };
        let ctx = SpawnContext {
            difficulty: 3.0,
            elapsed_secs: 240.0,
        };
        let scaled = scale_stats(&base, &scaling, &ctx);
        assert!((scaled.chase_speed - base.chase_speed * 1.2).abs() < 1e-4);
        assert!((scaled.patrol_speed - base.patrol_speed * 1.2).abs() < 1e-4);
        assert!((scaled.attack_damage - base.attack_damage * 1.4).abs() < 1e-4);
        assert!((scaled.detection_range - base.detection_range * 1.6).abs() < 1e-4);
        assert!((scaled.max_health - base.max_health * 2.0).abs() < 1e-4);
        assert_eq!(scaled.attack_range, base.attack_range, "unscaled stats untouched");
        assert_eq!(scaled.attack_cooldown, base.attack_cooldown);
    }

    #[test]
    fn test_difficulty_below_one_does_not_shrink_stats() {
        let base = EnemyConfig::baseline(EnemyKind::Runner);
        let ctx = SpawnContext {
            difficulty: 0.2,
            elapsed_secs: 0.0,
        };
        assert_eq!(scale_stats(&base, &StatScaling::default(), &ctx), base);
    }
}
