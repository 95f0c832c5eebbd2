//! Fixed-rate loop: steps the harness at `TICK_RATE`, fires the gunner,
//! emits periodic reports and collects a run summary.
//!
//! With `realtime` set, ticks are paced to the wall clock and the schedule
//! resets instead of spiralling when the loop falls far behind.

use std::time::{Duration, Instant};

use glam::Vec3;
use serde::Serialize;
use tracing::{debug, info};

use onslaught_core::config::ManagerConfig;
use onslaught_core::constants::TICK_RATE;
use onslaught_core::enums::HitZone;
use onslaught_core::error::ConfigError;
use onslaught_core::events::EnemyEvent;
use onslaught_core::state::PopulationSnapshot;
use onslaught_core::types::EnemyHandle;
use onslaught_sim::harness::FixedStepHarness;
use onslaught_sim::{DamageOutcome, EnemyManager};

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How a run is driven and reported.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Simulated seconds to run.
    pub seconds: f64,
    pub realtime: bool,
    /// Simulated seconds between reports. Zero disables reports.
    pub report_every: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seconds: 60.0,
            realtime: false,
            report_every: 10.0,
        }
    }
}

/// Turret on the target that shoots the nearest enemy in range.
#[derive(Debug, Clone, Copy)]
pub struct Gunner {
    pub range: f32,
    pub damage: f32,
    /// Seconds between shots.
    pub interval: f64,
    next_shot: f64,
    shots: u64,
}

impl Default for Gunner {
    fn default() -> Self {
        Self {
            range: 25.0,
            damage: 35.0,
            interval: 0.25,
            next_shot: 0.0,
            shots: 0,
        }
    }
}

impl Gunner {
    /// Fire once if the interval has elapsed and something is in range.
    pub fn fire(&mut self, manager: &mut EnemyManager, origin: Vec3) -> Option<DamageOutcome> {
        let now = manager.time().elapsed_secs;
        if now < self.next_shot {
            return None;
        }
        let handle = nearest_in_range(manager, origin, self.range)?;
        self.next_shot = now + self.interval;
        self.shots += 1;
        // Every third shot is a headshot.
        let zone = if self.shots % 3 == 0 { HitZone::Head } else { HitZone::Body };
        let outcome = manager.take_damage(handle, self.damage, zone);
        debug!(?handle, ?zone, ?outcome, "gunner fired");
        Some(outcome)
    }

    pub fn shots(&self) -> u64 {
        self.shots
    }
}

/// Nearest active enemy within `range` of `origin`. Ties keep registry order.
pub fn nearest_in_range(manager: &EnemyManager, origin: Vec3, range: f32) -> Option<EnemyHandle> {
    let pool = manager.pool();
    manager
        .registry()
        .iter()
        .filter_map(|handle| Some((handle, pool.position(handle)?.distance_squared(origin))))
        .filter(|&(_, d2)| d2 <= range * range)
        .fold(None, |best: Option<(EnemyHandle, f32)>, candidate| match best {
            Some(b) if b.1 <= candidate.1 => Some(b),
            _ => Some(candidate),
        })
        .map(|(handle, _)| handle)
}

/// Aggregate statistics over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub simulated_secs: f64,
    pub peak_population: usize,
    pub spawned: u64,
    pub killed: u64,
    pub target_hits: u32,
    pub shots: u64,
    pub final_difficulty: f32,
}

impl RunSummary {
    fn observe(&mut self, snapshot: &PopulationSnapshot) {
        self.ticks = snapshot.time.tick;
        self.simulated_secs = snapshot.time.elapsed_secs;
        self.peak_population = self.peak_population.max(snapshot.active);
        self.final_difficulty = snapshot.difficulty;
        self.spawned += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, EnemyEvent::Spawned { .. }))
            .count() as u64;
    }
}

/// Run the manager for `options.seconds` of simulated time.
///
/// `report` receives a snapshot every `options.report_every` simulated seconds.
pub fn run(
    config: ManagerConfig,
    options: &RunOptions,
    mut report: impl FnMut(&PopulationSnapshot),
) -> Result<RunSummary, ConfigError> {
    let mut harness = FixedStepHarness::new(config)?;
    let mut gunner = Gunner::default();
    let mut summary = RunSummary::default();

    let total_ticks = (options.seconds.max(0.0) * TICK_RATE as f64).round() as u64;
    let mut next_report = options.report_every;
    let mut next_tick_time = Instant::now();
    info!(ticks = total_ticks, realtime = options.realtime, "run started");

    for _ in 0..total_ticks {
        let snapshot = harness.step();
        summary.observe(&snapshot);

        if let Some(DamageOutcome::Killed) = gunner.fire(&mut harness.manager, harness.target.position) {
            summary.killed += 1;
        }

        if options.report_every > 0.0 && snapshot.time.elapsed_secs + 1e-6 >= next_report {
            next_report += options.report_every;
            info!(
                t = snapshot.time.elapsed_secs,
                active = snapshot.active,
                target = snapshot.target_population,
                difficulty = snapshot.difficulty,
                idle = snapshot.states.idle,
                chasing = snapshot.states.chasing,
                attacking = snapshot.states.attacking,
                "population report"
            );
            report(&snapshot);
        }

        if options.realtime {
            next_tick_time = pace(next_tick_time, harness.manager.time_scale());
        }
    }

    summary.target_hits = harness.target.hits;
    summary.shots = gunner.shots();
    info!(
        spawned = summary.spawned,
        killed = summary.killed,
        peak = summary.peak_population,
        "run finished"
    );
    Ok(summary)
}

/// Sleep until the next tick, adjusting for time scale. Returns the new deadline.
fn pace(mut next_tick_time: Instant, time_scale: f64) -> Instant {
    let effective_tick_duration = if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    };

    next_tick_time += effective_tick_duration;
    let now = Instant::now();
    if next_tick_time > now {
        std::thread::sleep(next_tick_time - now);
    } else if now - next_tick_time > effective_tick_duration * 2 {
        // Too far behind: reset to avoid a catch-up spiral.
        next_tick_time = now;
    }
    next_tick_time
}
