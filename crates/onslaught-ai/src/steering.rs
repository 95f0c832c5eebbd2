//! Steering helpers: repath throttling and turning toward the target.

use glam::{Quat, Vec3};

/// Repath interval for an entity at `distance_sq` from the target.
///
/// Near entities replan at `near`, anything beyond `far_distance` at `far`.
pub fn repath_interval(distance_sq: f32, near: f64, far: f64, far_distance: f32) -> f64 {
    if distance_sq <= far_distance * far_distance {
        near
    } else {
        far
    }
}

/// Yaw-only orientation looking from `from` toward `to` (y-up, -Z forward).
/// `None` when the points coincide on the ground plane.
pub fn look_rotation(from: Vec3, to: Vec3) -> Option<Quat> {
    let flat = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if flat.length_squared() < 1e-8 {
        return None;
    }
    let dir = flat.normalize();
    Some(Quat::from_rotation_y((-dir.x).atan2(-dir.z)))
}

/// Turn `current` toward `target` by at most `max_radians`.
pub fn rotate_towards(current: Quat, target: Quat, max_radians: f32) -> Quat {
    let angle = current.angle_between(target);
    if angle <= max_radians || angle <= f32::EPSILON {
        return target;
    }
    current.slerp(target, (max_radians / angle).clamp(0.0, 1.0))
}
