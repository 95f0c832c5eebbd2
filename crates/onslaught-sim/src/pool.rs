//! Object pool: reusable enemy bodies stored in a hecs world.
//!
//! Every handle owns exactly one hecs entity for the pool's lifetime. A
//! handle is either active (carries the `Active` component) or free (sits on
//! its kind's free list). Bodies are never despawned from the world.

use glam::{Quat, Vec3};
use hecs::{Entity, World};
use tracing::{debug, info, warn};

use onslaught_core::components::{Active, Pooled, Transform};
use onslaught_core::config::EnemyConfig;
use onslaught_core::enums::EnemyKind;
use onslaught_core::types::EnemyHandle;

/// World parenting for a body (e.g. attached to a spawner or a vehicle).
#[derive(Debug, Clone, Copy)]
pub struct Parent(pub Entity);

#[derive(Debug, Clone, Copy)]
struct Slot {
    kind: EnemyKind,
    body: Entity,
    active: bool,
}

/// Per-kind pools sharing one handle space and one body world.
pub struct EnemyPool {
    bodies: World,
    slots: Vec<Slot>,
    free: [Vec<EnemyHandle>; EnemyKind::COUNT],
    active: [usize; EnemyKind::COUNT],
    templates: [Option<EnemyConfig>; EnemyKind::COUNT],
    warned_missing: [bool; EnemyKind::COUNT],
}

impl EnemyPool {
    pub fn new() -> Self {
        Self {
            bodies: World::new(),
            slots: Vec::new(),
            free: Default::default(),
            active: [0; EnemyKind::COUNT],
            templates: [None; EnemyKind::COUNT],
            warned_missing: [false; EnemyKind::COUNT],
        }
    }

    /// Bind the baseline template a kind spawns from. `None` unbinds it.
    pub(crate) fn set_template(&mut self, kind: EnemyKind, template: Option<EnemyConfig>) {
        self.templates[kind.index()] = template;
    }

    pub fn template(&self, kind: EnemyKind) -> Option<&EnemyConfig> {
        self.templates[kind.index()].as_ref()
    }

    /// Pre-allocate `count` inactive bodies. Returns how many were created.
    pub(crate) fn prewarm(&mut self, kind: EnemyKind, count: usize) -> usize {
        if self.template(kind).is_none() {
            return 0;
        }
        self.slots.reserve(count);
        self.free[kind.index()].reserve(count);
        for _ in 0..count {
            let handle = self.allocate(kind, Transform::default(), false);
            self.free[kind.index()].push(handle);
        }
        info!(?kind, count, "prewarmed pool");
        count
    }

    /// Activate a body of `kind` at the given placement.
    ///
    /// Reuses a free handle when one exists. No-op (`None`) when the kind has
    /// no backing template.
    pub(crate) fn spawn(&mut self, kind: EnemyKind, position: Vec3, orientation: Quat) -> Option<EnemyHandle> {
        if self.template(kind).is_none() {
            if !self.warned_missing[kind.index()] {
                warn!(?kind, "spawn requested for a kind with no template; ignoring");
                self.warned_missing[kind.index()] = true;
            }
            return None;
        }

        let transform = Transform {
            position,
            orientation,
        };
        let handle = match self.free[kind.index()].pop() {
            Some(handle) => {
                let slot = &mut self.slots[handle.index()];
                slot.active = true;
                let body = slot.body;
                if let Ok(mut current) = self.bodies.get::<&mut Transform>(body) {
                    *current = transform;
                }
                let _ = self.bodies.insert_one(body, Active);
                handle
            }
            None => self.allocate(kind, transform, true),
        };
        self.active[kind.index()] += 1;
        debug!(?handle, ?kind, "pool spawn");
        Some(handle)
    }

    /// Deactivate a body, detach it from any parent and push it back on its
    /// free list. Returns the kind for an active handle, `None` otherwise
    /// (double despawn is a no-op).
    ///
    /// The caller must run the state-reset hook before handing the handle out again.
    pub(crate) fn despawn(&mut self, handle: EnemyHandle) -> Option<EnemyKind> {
        let slot = self.slots.get_mut(handle.index())?;
        if !slot.active {
            return None;
        }
        slot.active = false;
        let (kind, body) = (slot.kind, slot.body);

        let _ = self.bodies.remove_one::<Active>(body);
        let _ = self.bodies.remove_one::<Parent>(body);
        self.active[kind.index()] = self.active[kind.index()].saturating_sub(1);
        self.free[kind.index()].push(handle);
        Some(kind)
    }

    /// Parent an active body to another world entity.
    pub fn attach(&mut self, handle: EnemyHandle, parent: Entity) -> bool {
        match self.body(handle) {
            Some(body) if self.is_active(handle) => self.bodies.insert_one(body, Parent(parent)).is_ok(),
            _ => false,
        }
    }

    pub fn is_active(&self, handle: EnemyHandle) -> bool {
        self.slots.get(handle.index()).is_some_and(|s| s.active)
    }

    pub fn kind_of(&self, handle: EnemyHandle) -> Option<EnemyKind> {
        self.slots.get(handle.index()).map(|s| s.kind)
    }

    /// The hecs entity backing a handle.
    pub fn body(&self, handle: EnemyHandle) -> Option<Entity> {
        self.slots.get(handle.index()).map(|s| s.body)
    }

    pub fn transform(&self, handle: EnemyHandle) -> Option<Transform> {
        let body = self.body(handle)?;
        self.bodies.get::<&Transform>(body).ok().map(|t| *t)
    }

    pub fn position(&self, handle: EnemyHandle) -> Option<Vec3> {
        self.transform(handle).map(|t| t.position)
    }

    pub fn set_position(&mut self, handle: EnemyHandle, position: Vec3) {
        if let Some(body) = self.body(handle) {
            if let Ok(mut t) = self.bodies.get::<&mut Transform>(body) {
                t.position = position;
            }
        }
    }

    pub fn set_orientation(&mut self, handle: EnemyHandle, orientation: Quat) {
        if let Some(body) = self.body(handle) {
            if let Ok(mut t) = self.bodies.get::<&mut Transform>(body) {
                t.orientation = orientation;
            }
        }
    }

    pub fn active_count(&self, kind: EnemyKind) -> usize {
        self.active[kind.index()]
    }

    pub fn total_active(&self) -> usize {
        self.active.iter().sum()
    }

    pub fn free_count(&self, kind: EnemyKind) -> usize {
        self.free[kind.index()].len()
    }

    /// Number of handles ever allocated (active + free).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Read-only access to the body world.
    pub fn bodies(&self) -> &World {
        &self.bodies
    }

    fn allocate(&mut self, kind: EnemyKind, transform: Transform, active: bool) -> EnemyHandle {
        let handle = EnemyHandle::from_index(self.slots.len());
        let body = self.bodies.spawn((transform, Pooled { kind, handle }));
        if active {
            let _ = self.bodies.insert_one(body, Active);
        }
        self.slots.push(Slot { kind, body, active });
        handle
    }
}

impl Default for EnemyPool {
    fn default() -> Self {
        Self::new()
    }
}
