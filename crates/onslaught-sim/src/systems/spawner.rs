//! Spawn scheduler: turns the population and spawn-rate curves into a
//! bounded number of spawns per tick and performs them.

use glam::{Quat, Vec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use onslaught_ai::steering::look_rotation;
use onslaught_core::config::{KindConfig, ManagerConfig};
use onslaught_core::enums::EnemyKind;
use onslaught_core::types::{EnemyHandle, SpawnContext};

use crate::difficulty::DifficultyModel;
use crate::lifecycle::{self, LifecycleHooks};
use crate::pool::EnemyPool;
use crate::registry::Registry;
use crate::store::EnemyStore;
use crate::systems::placement;

/// How many entities to create this tick, and why.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnPlan {
    pub difficulty: f32,
    pub target_population: usize,
    pub deficit: usize,
    pub count: usize,
}

/// Carries the fractional spawn budget between ticks.
#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    accumulator: f64,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Overwrite the fractional budget (fixed-step tests, save/restore).
    pub fn set_accumulator(&mut self, value: f64) {
        self.accumulator = value.max(0.0);
    }

    /// Compute this tick's spawn count and consume it from the budget.
    ///
    /// `count = min(deficit, per_frame_cap, floor(accumulator))`. Unspent
    /// budget carries over in full; the per-frame cap bounds any burst.
    pub fn plan(
        &mut self,
        model: &DifficultyModel,
        elapsed_secs: f64,
        dt: f64,
        active: usize,
        per_frame_cap: usize,
    ) -> SpawnPlan {
        let difficulty = model.difficulty_at(elapsed_secs);
        let target_population = model.target_population(elapsed_secs);
        let deficit = target_population.saturating_sub(active);

        self.accumulator += (model.spawn_rate(elapsed_secs).max(0.0) as f64) * dt.max(0.0);
        let budget = self.accumulator.floor() as usize;
        let count = deficit.min(per_frame_cap).min(budget);
        self.accumulator -= count as f64;

        SpawnPlan {
            difficulty,
            target_population,
            deficit,
            count,
        }
    }
}

/// Spawn weight for a kind at `excess` difficulty above 1.0. Basic is fixed at 1.
pub fn kind_weight(kind: &KindConfig, excess: f32) -> f32 {
    if kind.kind == EnemyKind::Basic {
        return 1.0;
    }
    (kind.base_weight + kind.weight_per_difficulty * excess).max(0.0)
}

/// Weighted draw over the configured kinds.
pub fn choose_kind<R: Rng>(rng: &mut R, kinds: &[KindConfig], difficulty: f32) -> Option<EnemyKind> {
    let excess = (difficulty - 1.0).max(0.0);
    let total: f32 = kinds.iter().map(|k| kind_weight(k, excess)).sum();
    if total <= 0.0 {
        return None;
    }

    let mut roll = rng.gen::<f32>() * total;
    for kind in kinds {
        let weight = kind_weight(kind, excess);
        if roll < weight {
            return Some(kind.kind);
        }
        roll -= weight;
    }
    kinds.iter().rev().find(|k| kind_weight(k, excess) > 0.0).map(|k| k.kind)
}

/// Execute a plan: pick kinds and positions, draw from the pool, register.
/// Newly spawned handles are appended to `fresh`. Returns the number spawned.
#[allow(clippy::too_many_arguments)]
pub fn run(
    pool: &mut EnemyPool,
    store: &mut EnemyStore,
    registry: &mut Registry,
    hooks: &mut LifecycleHooks,
    rng: &mut ChaCha8Rng,
    config: &ManagerConfig,
    plan: &SpawnPlan,
    ctx: &SpawnContext,
    avoid: Option<Vec3>,
    fresh: &mut Vec<EnemyHandle>,
) -> usize {
    let mut spawned = 0;
    for _ in 0..plan.count {
        let Some(kind) = choose_kind(rng, &config.kinds, plan.difficulty) else {
            break;
        };
        let position = placement::resolve(rng, &config.area, avoid);
        if let Some(handle) = spawn_one(pool, store, registry, hooks, config, kind, position, avoid, ctx) {
            fresh.push(handle);
            spawned += 1;
        }
    }
    if spawned > 0 {
        debug!(spawned, planned = plan.count, deficit = plan.deficit, "spawn tick");
    }
    spawned
}

/// Spawn and register a single enemy. `None` when the kind is unconfigured
/// or has no template.
#[allow(clippy::too_many_arguments)]
pub fn spawn_one(
    pool: &mut EnemyPool,
    store: &mut EnemyStore,
    registry: &mut Registry,
    hooks: &mut LifecycleHooks,
    config: &ManagerConfig,
    kind: EnemyKind,
    position: Vec3,
    face: Option<Vec3>,
    ctx: &SpawnContext,
) -> Option<EnemyHandle> {
    let kind_config = config.kind(kind)?;
    let orientation = face
        .and_then(|target| look_rotation(position, target))
        .unwrap_or(Quat::IDENTITY);
    let handle = pool.spawn(kind, position, orientation)?;
    lifecycle::register_spawned(store, registry, hooks, handle, kind_config, ctx);
    Some(handle)
}

#[cfg(test)]
mod tests {
    use onslaught_core::config::{PopulationCurve, SpawnRateCurve};
    use rand::SeedableRng;

    use super::*;

    fn model(base: f32, rate: f32) -> DifficultyModel {
        DifficultyModel {
            growth_per_minute: 0.0,
            population: PopulationCurve {
                hard_cap: 1000,
                base,
                growth_per_minute: 0.0,
            },
            spawn_rate: SpawnRateCurve {
                base: rate,
                growth_per_minute: 0.0,
            },
        }
    }

    #[test]
    fn test_plan_is_capped_per_frame() {
        let mut scheduler = SpawnScheduler::new();
        scheduler.set_accumulator(40.0);
        let plan = scheduler.plan(&model(50.0, 0.0), 0.0, 1.0 / 60.0, 10, 10);
        assert_eq!(plan.deficit, 40);
        assert_eq!(plan.count, 10);
    }

    #[test]
    fn test_plan_limited_by_deficit() {
        let mut scheduler = SpawnScheduler::new();
        scheduler.set_accumulator(40.0);
        let plan = scheduler.plan(&model(12.0, 0.0), 0.0, 1.0 / 60.0, 10, 10);
        assert_eq!(plan.count, 2);
    }

    #[test]
    fn test_accumulator_carries_fractions() {
        let mut scheduler = SpawnScheduler::new();
        let m = model(100.0, 3.0);
        let mut total = 0;
        // 3/s for 2s at 60 Hz should yield 6 spawns.
        for _ in 0..120 {
            total += scheduler.plan(&m, 0.0, 1.0 / 60.0, 0, 10).count;
        }
        assert!((5..=6).contains(&total), "expected ~6 spawns, got {total}");
    }

    #[test]
    fn test_no_spawns_at_target() {
        let mut scheduler = SpawnScheduler::new();
        scheduler.set_accumulator(5.0);
        let plan = scheduler.plan(&model(10.0, 100.0), 0.0, 1.0, 10, 8);
        assert_eq!(plan.count, 0);
        assert_eq!(scheduler.accumulator(), 105.0, "unspent budget is kept");
    }

    #[test]
    fn test_banked_budget_refills_at_frame_cap() {
        let model = model(20.0, 1.0);
        let mut scheduler = SpawnScheduler::new();
        for _ in 0..60 {
            let plan = scheduler.plan(&model, 0.0, 1.0, 20, 8);
            assert_eq!(plan.count, 0);
        }
        assert_eq!(scheduler.accumulator(), 60.0);

        // A wave of kills: the bank drains at the cap, not at the raw rate.
        let first = scheduler.plan(&model, 0.0, 1.0 / 60.0, 4, 8);
        let second = scheduler.plan(&model, 0.0, 1.0 / 60.0, 12, 8);
        assert_eq!(first.count + second.count, 16);
    }

    #[test]
    fn test_basic_weight_is_fixed() {
        let mut basic = KindConfig::new(EnemyKind::Basic, 50.0, 50.0);
        basic.base_weight = 50.0;
        assert_eq!(kind_weight(&basic, 0.0), 1.0);
        assert_eq!(kind_weight(&basic, 10.0), 1.0);

        let brute = KindConfig::new(EnemyKind::Brute, 0.1, 0.2);
        assert!((kind_weight(&brute, 2.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_choose_kind_distribution_at_baseline() {
        let kinds = vec![
            KindConfig::new(EnemyKind::Basic, 1.0, 0.0),
            KindConfig::new(EnemyKind::Runner, 0.5, 1.0),
            KindConfig::new(EnemyKind::Brute, 0.25, 1.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let samples = 20_000;
        let mut counts = [0usize; EnemyKind::COUNT];
        for _ in 0..samples {
            let kind = choose_kind(&mut rng, &kinds, 1.0).unwrap();
            counts[kind.index()] += 1;
        }
        let total_weight = 1.75;
        for (kind, expected_weight) in [
            (EnemyKind::Basic, 1.0),
            (EnemyKind::Runner, 0.5),
            (EnemyKind::Brute, 0.25),
        ] {
            let share = counts[kind.index()] as f64 / samples as f64;
            let expected = expected_weight / total_weight;
            assert!(
                (share - expected).abs() < 0.02,
                "{kind:?} share {share:.3} vs expected {expected:.3}"
            );
        }
    }

    #[test]
    fn test_rarer_kinds_grow_with_difficulty() {
        let kinds = vec![
            KindConfig::new(EnemyKind::Basic, 1.0, 0.0),
            KindConfig::new(EnemyKind::Brute, 0.05, 0.5),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let count_brutes = |rng: &mut ChaCha8Rng, difficulty: f32| {
            (0..5_000)
                .filter(|_| choose_kind(rng, &kinds, difficulty) == Some(EnemyKind::Brute))
                .count()
        };
        let early = count_brutes(&mut rng, 1.0);
        let late = count_brutes(&mut rng, 5.0);
        assert!(late > early * 5, "brutes early {early}, late {late}");
    }

    #[test]
    fn test_choose_kind_with_no_weight() {
        let kinds = vec![KindConfig::new(EnemyKind::Runner, 0.0, 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(choose_kind(&mut rng, &kinds, 3.0), None);
    }
}
