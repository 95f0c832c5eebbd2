//! Population manager: the single owner of every enemy-related system.
//!
//! `EnemyManager` owns the pool, the per-entity store, the registry and the
//! schedulers, processes queued commands, runs the per-tick systems and
//! produces `PopulationSnapshot`s. Fully headless; the outside world is
//! reached only through the `Collaborators` passed to `tick`.

use std::collections::VecDeque;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use onslaught_core::commands::ManagerCommand;
use onslaught_core::config::ManagerConfig;
use onslaught_core::constants::MAX_TIME_SCALE;
use onslaught_core::enums::{EnemyKind, HitZone, ManagerPhase};
use onslaught_core::error::ConfigError;
use onslaught_core::events::EnemyEvent;
use onslaught_core::state::{EnemyView, PopulationSnapshot};
use onslaught_core::types::{EnemyHandle, SimTime};

use crate::collaborators::Collaborators;
use crate::difficulty::DifficultyModel;
use crate::lifecycle::{self, EnemyObserver, LifecycleHooks, ObserverId};
use crate::pool::EnemyPool;
use crate::registry::Registry;
use crate::store::EnemyStore;
use crate::systems;
use crate::systems::snapshot::TickCounters;
use crate::systems::spawner::SpawnScheduler;

/// Result of `EnemyManager::take_damage`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Unknown, inactive or already-dead target, or an invalid amount.
    Ignored,
    Wounded { remaining: f32 },
    /// Killing blow. The handle is already back in its pool.
    Killed,
}

/// The enemy population manager.
pub struct EnemyManager {
    config: ManagerConfig,
    model: DifficultyModel,
    time: SimTime,
    phase: ManagerPhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    pool: EnemyPool,
    store: EnemyStore,
    registry: Registry,
    spawner: SpawnScheduler,
    hooks: LifecycleHooks,
    command_queue: VecDeque<ManagerCommand>,
    /// Reused scratch buffer for the AI window.
    window: Vec<EnemyHandle>,
    /// Handles spawned since the last AI phase; their navigator state is reset first.
    fresh: Vec<EnemyHandle>,
}

impl EnemyManager {
    /// Validate the config, bind templates and prewarm every kind's pool.
    pub fn new(config: ManagerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut pool = EnemyPool::new();
        for kind in &config.kinds {
            pool.set_template(kind.kind, kind.template);
            pool.prewarm(kind.kind, kind.prewarm);
        }
        info!(
            seed = config.seed,
            kinds = config.kinds.len(),
            capacity = pool.capacity(),
            "enemy manager ready"
        );

        Ok(Self {
            model: DifficultyModel::from_config(&config),
            time: SimTime::default(),
            phase: ManagerPhase::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            pool,
            store: EnemyStore::new(),
            registry: Registry::new(),
            spawner: SpawnScheduler::new(),
            hooks: LifecycleHooks::new(),
            command_queue: VecDeque::new(),
            window: Vec::with_capacity(config.ai.updates_per_frame),
            fresh: Vec::new(),
            config,
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: ManagerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ManagerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the population by one frame of `dt` real seconds.
    ///
    /// Order: commands, spawning, navigator resets for fresh handles, the AI
    /// window, then the clock. Newly spawned entities are registered before
    /// the AI window runs.
    pub fn tick(&mut self, dt: f64, collab: &mut Collaborators) -> PopulationSnapshot {
        self.process_commands();

        let mut counters = TickCounters::default();
        if self.phase == ManagerPhase::Running {
            let dt = dt.max(0.0) * self.time_scale;
            let now = self.time.elapsed_secs;
            let avoid = collab.target.as_deref().map(|t| t.position());

            let plan = self.spawner.plan(
                &self.model,
                now,
                dt,
                self.pool.total_active(),
                self.config.per_frame_spawn_cap,
            );
            if plan.count > 0 {
                let ctx = self.model.spawn_context(now);
                counters.spawned = systems::spawner::run(
                    &mut self.pool,
                    &mut self.store,
                    &mut self.registry,
                    &mut self.hooks,
                    &mut self.rng,
                    &self.config,
                    &plan,
                    &ctx,
                    avoid,
                    &mut self.fresh,
                );
            }

            for handle in self.fresh.drain(..) {
                if self.pool.is_active(handle) {
                    collab.navigator.reset(handle);
                }
            }

            counters.updated = systems::ai_update::run(
                &mut self.registry,
                &mut self.store,
                &mut self.pool,
                &mut self.hooks,
                &mut self.window,
                &self.config.ai,
                now,
                collab,
            );

            self.time.advance(dt);
        }

        let events = self.hooks.drain();
        systems::snapshot::build_snapshot(
            &self.time,
            self.phase,
            &self.model,
            &self.pool,
            &self.store,
            &self.registry,
            counters,
            events,
        )
    }

    /// Apply damage to one enemy.
    ///
    /// Fires `Damaged`, and on a killing blow `Died` then `Despawned`, in that
    /// order. Damage to a free or already-dead handle is a no-op.
    pub fn take_damage(&mut self, handle: EnemyHandle, amount: f32, zone: HitZone) -> DamageOutcome {
        if !amount.is_finite() || amount < 0.0 {
            return DamageOutcome::Ignored;
        }
        if !self.pool.is_active(handle) || self.store.is_dead(handle) {
            return DamageOutcome::Ignored;
        }
        let i = handle.index();
        let Some(health) = self.store.health.get_mut(i) else {
            return DamageOutcome::Ignored;
        };
        *health -= amount;
        let remaining = *health;

        self.hooks.emit(EnemyEvent::Damaged {
            handle,
            amount,
            zone,
            remaining_health: remaining,
        });
        if remaining > 0.0 {
            return DamageOutcome::Wounded { remaining };
        }

        self.store.dead[i] = true;
        let kind = self.store.kinds[i];
        debug!(?handle, ?kind, ?zone, "enemy killed");
        self.hooks.emit(EnemyEvent::Died { handle, kind });
        self.release(handle);
        DamageOutcome::Killed
    }

    /// Explicit despawn without a death notification. `false` when the
    /// handle is not active.
    pub fn despawn(&mut self, handle: EnemyHandle) -> bool {
        self.release(handle)
    }

    /// Spawn one enemy outside the scheduler at the current difficulty.
    /// Bounded by the hard cap; `None` when full or the kind has no template.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec3) -> Option<EnemyHandle> {
        if self.pool.total_active() >= self.config.population.hard_cap {
            debug!(?kind, "manual spawn refused at hard cap");
            return None;
        }
        let ctx = self.model.spawn_context(self.time.elapsed_secs);
        let handle = systems::spawner::spawn_one(
            &mut self.pool,
            &mut self.store,
            &mut self.registry,
            &mut self.hooks,
            &self.config,
            kind,
            position,
            None,
            &ctx,
        )?;
        self.fresh.push(handle);
        Some(handle)
    }

    /// Add an observer. Returns `false` if `id` is already subscribed.
    pub fn subscribe(&mut self, id: ObserverId, observer: Box<dyn EnemyObserver>) -> bool {
        self.hooks.subscribe(id, observer)
    }

    /// Remove an observer. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.hooks.unsubscribe(id)
    }

    pub fn enemy(&self, handle: EnemyHandle) -> Option<EnemyView> {
        systems::snapshot::enemy_view(&self.pool, &self.store, handle)
    }

    /// Current global difficulty.
    pub fn difficulty(&self) -> f32 {
        self.model.difficulty_at(self.time.elapsed_secs)
    }

    pub fn active_count(&self) -> usize {
        self.pool.total_active()
    }

    pub fn phase(&self) -> ManagerPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &EnemyStore {
        &self.store
    }

    pub fn pool(&self) -> &EnemyPool {
        &self.pool
    }

    /// Move an active enemy's body. `false` for free or unknown handles.
    pub fn set_enemy_position(&mut self, handle: EnemyHandle, position: Vec3) -> bool {
        if !self.pool.is_active(handle) {
            return false;
        }
        self.pool.set_position(handle, position);
        true
    }

    fn release(&mut self, handle: EnemyHandle) -> bool {
        let Some(kind) = self.pool.despawn(handle) else {
            return false;
        };
        lifecycle::release_despawned(&mut self.store, &mut self.registry, &mut self.hooks, handle, kind);
        true
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: ManagerCommand) {
        match command {
            ManagerCommand::Pause => {
                if self.phase == ManagerPhase::Running {
                    info!(tick = self.time.tick, "manager paused");
                    self.phase = ManagerPhase::Paused;
                }
            }
            ManagerCommand::Resume => {
                if self.phase == ManagerPhase::Paused {
                    info!(tick = self.time.tick, "manager resumed");
                    self.phase = ManagerPhase::Running;
                }
            }
            ManagerCommand::SetTimeScale { scale } => {
                self.time_scale = if scale.is_finite() {
                    scale.clamp(0.0, MAX_TIME_SCALE)
                } else {
                    self.time_scale
                };
                info!(time_scale = self.time_scale, "time scale set");
            }
            ManagerCommand::DespawnAll => {
                let handles: Vec<EnemyHandle> = self.registry.iter().collect();
                let count = handles.iter().filter(|&&h| self.release(h)).count();
                info!(count, "despawned all enemies");
            }
            ManagerCommand::Prewarm { kind, count } => {
                let created = self.pool.prewarm(kind, count);
                info!(?kind, requested = count, created, "prewarm command");
            }
        }
    }
}
