//! Collision detection
//!
//! Two tests with different precision:
//! - projectiles sweep the whole segment they travelled this tick, so a fast
//!   shot can't skip over a hazard between two ticks
//! - hazards test the player with a plain point-distance check

use glam::Vec3;

use crate::tuning::Tuning;

/// Result of a swept segment test
#[derive(Debug, Clone, Copy)]
pub struct SweepResult {
    /// Whether the segment passed inside the radius
    pub hit: bool,
    /// Segment parameter of the closest point, in [0, 1]
    pub t: f32,
    /// Closest point on the segment to the target center
    pub closest: Vec3,
    /// Distance from the closest point to the target center
    pub distance: f32,
}

/// Closest point on segment [p0, p1] to `center`, with its parameter `t`.
///
/// A zero-length segment divides by 1 instead, which collapses to `p0`.
pub fn closest_point_on_segment(p0: Vec3, p1: Vec3, center: Vec3) -> (Vec3, f32) {
    let v = p1 - p0;
    let w = center - p0;
    let len_sq = v.length_squared();
    let denom = if len_sq > 0.0 { len_sq } else { 1.0 };
    let t = (v.dot(w) / denom).clamp(0.0, 1.0);
    (p0 + v * t, t)
}

/// Swept test of a moving point against a sphere
pub fn swept_sphere(p0: Vec3, p1: Vec3, center: Vec3, radius: f32) -> SweepResult {
    let (closest, t) = closest_point_on_segment(p0, p1, center);
    let distance = closest.distance(center);
    SweepResult {
        hit: distance < radius,
        t,
        closest,
        distance,
    }
}

/// Discrete proximity test (no sweep)
#[inline]
pub fn within_distance(a: Vec3, b: Vec3, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Collision radius of a projectile target.
///
/// Sizeless targets use the default radius; sized ones get padded and
/// floored so small targets stay hittable.
pub fn collision_radius(size: Option<f32>, tuning: &Tuning) -> f32 {
    match size {
        Some(size) if size > 0.0 => (size + tuning.collision_padding).max(tuning.min_collision_radius),
        _ => tuning.default_collision_radius,
    }
}

/// Unit direction from `from` toward `to`.
///
/// Coincident points divide by 1 and give a zero vector rather than NaN.
pub fn direction_away(from: Vec3, to: Vec3) -> Vec3 {
    let d = to - from;
    let len = d.length();
    let denom = if len > 0.0 { len } else { 1.0 };
    d / denom
}
