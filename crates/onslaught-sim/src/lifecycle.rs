//! Lifecycle hooks: observer list for enemy events and the registration /
//! despawn hooks that tie pool, registry and difficulty together.

use tracing::debug;

use onslaught_core::config::KindConfig;
use onslaught_core::enums::EnemyKind;
use onslaught_core::events::EnemyEvent;
use onslaught_core::types::{EnemyHandle, SpawnContext};

use crate::difficulty::scale_stats;
use crate::registry::Registry;
use crate::store::EnemyStore;

/// Caller-chosen key for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u32);

/// Receives every event synchronously, in emission order.
pub trait EnemyObserver {
    fn on_event(&mut self, event: &EnemyEvent);
}

impl<F: FnMut(&EnemyEvent)> EnemyObserver for F {
    fn on_event(&mut self, event: &EnemyEvent) {
        self(event)
    }
}

/// Ordered observer list plus a buffer of events for the next snapshot.
#[derive(Default)]
pub struct LifecycleHooks {
    observers: Vec<(ObserverId, Box<dyn EnemyObserver>)>,
    pending: Vec<EnemyEvent>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer. A second subscription under the same id is ignored.
    pub fn subscribe(&mut self, id: ObserverId, observer: Box<dyn EnemyObserver>) -> bool {
        if self.observers.iter().any(|(existing, _)| *existing == id) {
            return false;
        }
        self.observers.push((id, observer));
        true
    }

    /// Remove an observer. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver to observers in subscription order, then buffer.
    pub fn emit(&mut self, event: EnemyEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer.on_event(&event);
        }
        self.pending.push(event);
    }

    pub fn drain(&mut self) -> Vec<EnemyEvent> {
        std::mem::take(&mut self.pending)
    }
}

/// Registration hook: snapshot scaled stats, reset health/timers/state and
/// add the handle to the registry.
pub fn register_spawned(
    store: &mut EnemyStore,
    registry: &mut Registry,
    hooks: &mut LifecycleHooks,
    handle: EnemyHandle,
    kind: &KindConfig,
    ctx: &SpawnContext,
) {
    let Some(template) = kind.template.as_ref() else {
        return;
    };
    let stats = scale_stats(template, &kind.scaling, ctx);
    store.register(handle, kind.kind, stats, ctx.elapsed_secs);
    registry.register(handle);
    debug!(?handle, kind = ?kind.kind, difficulty = ctx.difficulty, "registered enemy");
    hooks.emit(EnemyEvent::Spawned {
        handle,
        kind: kind.kind,
        difficulty: ctx.difficulty,
    });
}

/// Despawn hook: unregister (cursor-corrected) and clear the record before
/// the handle can be reused.
pub fn release_despawned(
    store: &mut EnemyStore,
    registry: &mut Registry,
    hooks: &mut LifecycleHooks,
    handle: EnemyHandle,
    kind: EnemyKind,
) {
    registry.unregister(handle);
    store.reset(handle);
    debug!(?handle, ?kind, "despawned enemy");
    hooks.emit(EnemyEvent::Despawned { handle, kind });
}
