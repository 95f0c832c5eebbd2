//! Spawn position resolution.
//!
//! Candidates come from the fixed point list, else the spawn volume, else a
//! ring around the manager origin. A candidate too close to the avoid-target
//! is retried; when the attempts run out the last candidate is used anyway.

use glam::Vec3;
use rand::Rng;
use tracing::warn;

use onslaught_core::config::SpawnArea;
use onslaught_core::constants::SPAWN_POSITION_ATTEMPTS;

/// Pick a spawn position, keeping clear of `avoid` when possible.
pub fn resolve<R: Rng>(rng: &mut R, area: &SpawnArea, avoid: Option<Vec3>) -> Vec3 {
    let min_sq = area.min_distance_from_target * area.min_distance_from_target;
    let mut candidate = area.origin;
    for _ in 0..SPAWN_POSITION_ATTEMPTS {
        candidate = sample(rng, area);
        match avoid {
            Some(target) if candidate.distance_squared(target) < min_sq => continue,
            _ => return candidate,
        }
    }
    warn!(?candidate, "no spawn position cleared the avoid radius; using last candidate");
    candidate
}

/// One uniformly sampled candidate from the highest-priority source.
pub fn sample<R: Rng>(rng: &mut R, area: &SpawnArea) -> Vec3 {
    if !area.points.is_empty() {
        return area.points[rng.gen_range(0..area.points.len())];
    }
    if let Some(volume) = area.volume {
        let h = volume.half_extents.abs();
        return volume.center
            + Vec3::new(
                rng.gen_range(-h.x..=h.x),
                rng.gen_range(-h.y..=h.y),
                rng.gen_range(-h.z..=h.z),
            );
    }
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    area.origin + Vec3::new(angle.cos(), 0.0, angle.sin()) * area.ring_radius
}
