//! Fixed-step harness: stand-in collaborators so the manager can run
//! end-to-end without a game engine.
//!
//! `SteeringNavigator` moves bodies in straight lines toward their last
//! destination, `TrainingTarget` records the hits it takes and `OpenField`
//! never blocks line of sight.

use std::collections::HashMap;

use glam::Vec3;

use onslaught_core::config::ManagerConfig;
use onslaught_core::constants::DT;
use onslaught_core::enums::ManagerPhase;
use onslaught_core::error::ConfigError;
use onslaught_core::state::PopulationSnapshot;
use onslaught_core::types::EnemyHandle;

use crate::collaborators::{Collaborators, Navigator, OpenField, Target};
use crate::engine::EnemyManager;

/// Movement intent recorded for one handle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    pub speed: f32,
    pub destination: Option<Vec3>,
    pub stopped: bool,
}

/// Navigator that steers straight at the destination, ignoring obstacles.
#[derive(Debug, Default, Clone)]
pub struct SteeringNavigator {
    intents: HashMap<EnemyHandle, Intent>,
    /// Total `set_destination` calls, for repath throttling checks.
    pub destination_requests: u64,
}

impl SteeringNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intent(&self, handle: EnemyHandle) -> Option<&Intent> {
        self.intents.get(&handle)
    }

    /// Move every active body by `speed * dt` toward its destination.
    /// Intents of bodies that went back to the pool are dropped.
    pub fn advance(&mut self, manager: &mut EnemyManager, dt: f64) {
        self.intents.retain(|&handle, _| manager.pool().is_active(handle));
        for (&handle, intent) in &self.intents {
            let (Some(destination), false) = (intent.destination, intent.stopped) else {
                continue;
            };
            let Some(position) = manager.pool().position(handle) else {
                continue;
            };
            let offset = destination - position;
            let step = intent.speed * dt as f32;
            let next = if offset.length() <= step {
                destination
            } else {
                position + offset.normalize_or_zero() * step
            };
            manager.set_enemy_position(handle, next);
        }
    }

    fn entry(&mut self, handle: EnemyHandle) -> &mut Intent {
        self.intents.entry(handle).or_default()
    }
}

impl Navigator for SteeringNavigator {
    fn set_speed(&mut self, handle: EnemyHandle, speed: f32) {
        self.entry(handle).speed = speed;
    }

    fn set_destination(&mut self, handle: EnemyHandle, destination: Vec3) {
        self.destination_requests += 1;
        self.entry(handle).destination = Some(destination);
    }

    fn set_stopped(&mut self, handle: EnemyHandle, stopped: bool) {
        self.entry(handle).stopped = stopped;
    }

    fn reset(&mut self, handle: EnemyHandle) {
        self.intents.remove(&handle);
    }
}

/// Stationary target that never dies and counts incoming attacks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrainingTarget {
    pub position: Vec3,
    pub damage_taken: f32,
    pub hits: u32,
}

impl TrainingTarget {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl Target for TrainingTarget {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn apply_damage(&mut self, amount: f32) {
        self.damage_taken += amount;
        self.hits += 1;
    }
}

/// Manager plus harness collaborators, stepped at a fixed `dt`.
pub struct FixedStepHarness {
    pub manager: EnemyManager,
    pub navigator: SteeringNavigator,
    pub target: TrainingTarget,
    pub senses: OpenField,
    /// Set to `false` to run with no target at all.
    pub target_present: bool,
    pub dt: f64,
}

impl FixedStepHarness {
    pub fn new(config: ManagerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            manager: EnemyManager::new(config)?,
            navigator: SteeringNavigator::new(),
            target: TrainingTarget::default(),
            senses: OpenField,
            target_present: true,
            dt: DT,
        })
    }

    /// One manager tick followed by one movement step.
    pub fn step(&mut self) -> PopulationSnapshot {
        let snapshot = {
            let mut collab = Collaborators {
                navigator: &mut self.navigator,
                target: if self.target_present {
                    Some(&mut self.target as &mut dyn Target)
                } else {
                    None
                },
                senses: &self.senses,
            };
            self.manager.tick(self.dt, &mut collab)
        };
        if self.manager.phase() == ManagerPhase::Running {
            let dt = self.dt * self.manager.time_scale();
            self.navigator.advance(&mut self.manager, dt);
        }
        snapshot
    }

    /// Step `ticks` times, returning the last snapshot.
    pub fn run_ticks(&mut self, ticks: usize) -> Option<PopulationSnapshot> {
        (0..ticks).map(|_| self.step()).last()
    }

    /// Step for `seconds` of simulated time at the harness rate.
    pub fn run_for(&mut self, seconds: f64) -> Option<PopulationSnapshot> {
        let ticks = (seconds / self.dt).round().max(0.0) as usize;
        self.run_ticks(ticks)
    }
}

#[cfg(test)]
mod tests {
    use onslaught_core::enums::{EnemyKind, HitZone};

    use super::*;

    fn quiet_manager() -> EnemyManager {
        let mut config = ManagerConfig::default();
        config.population.base = 0.0;
        config.population.growth_per_minute = 0.0;
        config.spawn_rate.base = 0.0;
        config.spawn_rate.growth_per_minute = 0.0;
        EnemyManager::new(config).unwrap()
    }

    #[test]
    fn test_navigator_moves_toward_destination_and_stops() {
        let mut manager = quiet_manager();
        let handle = manager.spawn_enemy(EnemyKind::Basic, Vec3::new(10.0, 0.0, 0.0)).unwrap();

        let mut nav = SteeringNavigator::new();
        nav.set_speed(handle, 2.0);
        nav.set_destination(handle, Vec3::ZERO);
        nav.advance(&mut manager, 1.0);
        assert!((manager.pool().position(handle).unwrap().x - 8.0).abs() < 1e-5);

        nav.set_stopped(handle, true);
        nav.advance(&mut manager, 1.0);
        assert!((manager.pool().position(handle).unwrap().x - 8.0).abs() < 1e-5, "stopped body moved");
    }

    #[test]
    fn test_navigator_drops_intents_of_pooled_bodies() {
        let mut manager = quiet_manager();
        let handle = manager.spawn_enemy(EnemyKind::Basic, Vec3::ZERO).unwrap();

        let mut nav = SteeringNavigator::new();
        nav.set_destination(handle, Vec3::X);
        manager.take_damage(handle, 1_000.0, HitZone::Body);
        nav.advance(&mut manager, 1.0);
        assert!(nav.intent(handle).is_none());
    }

    #[test]
    fn test_training_target_counts_hits() {
        let mut target = TrainingTarget::at(Vec3::Y);
        target.apply_damage(10.0);
        target.apply_damage(2.5);
        assert_eq!(target.hits, 2);
        assert_eq!(target.damage_taken, 12.5);
        assert_eq!(target.position(), Vec3::Y);
    }
}
