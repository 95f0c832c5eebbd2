//! External services the manager drives but does not implement.
//!
//! Pathfinding, physics and the player live outside this crate; the manager
//! only talks to them through these traits during `EnemyManager::tick`.

use glam::Vec3;

use onslaught_core::types::EnemyHandle;

/// Navigation/movement agent for pooled bodies. Never asked to plan paths
/// itself by this crate; `set_destination` is the expensive call that the
/// AI scheduler throttles.
pub trait Navigator {
    fn set_speed(&mut self, handle: EnemyHandle, speed: f32);
    fn set_destination(&mut self, handle: EnemyHandle, destination: Vec3);
    fn set_stopped(&mut self, handle: EnemyHandle, stopped: bool);
    /// Forget any movement intent left over from a previous occupant.
    fn reset(&mut self, _handle: EnemyHandle) {}
}

/// The tracked target (typically the player).
pub trait Target {
    fn position(&self) -> Vec3;
    fn apply_damage(&mut self, amount: f32);
}

/// Spatial queries used to gate detection.
pub trait Senses {
    fn line_of_sight(&self, from: Vec3, to: Vec3) -> bool;
}

/// Everything `EnemyManager::tick` needs from the outside world for one frame.
pub struct Collaborators<'a> {
    pub navigator: &'a mut dyn Navigator,
    /// `None` disables spawn keep-out and leaves every enemy idle.
    pub target: Option<&'a mut dyn Target>,
    pub senses: &'a dyn Senses,
}

/// Navigator that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn set_speed(&mut self, _handle: EnemyHandle, _speed: f32) {}
    fn set_destination(&mut self, _handle: EnemyHandle, _destination: Vec3) {}
    fn set_stopped(&mut self, _handle: EnemyHandle, _stopped: bool) {}
}

/// Senses with nothing blocking line of sight.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenField;

impl Senses for OpenField {
    fn line_of_sight(&self, _from: Vec3, _to: Vec3) -> bool {
        true
    }
}
