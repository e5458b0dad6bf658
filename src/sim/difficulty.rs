//! Difficulty ramp
//!
//! Maps cumulative distance to the current scroll speed and gap height.
//! Pure: the parameters are derived on demand, never stored.

use crate::consts::*;

/// Parameters in effect at a given distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParams {
    /// Horizontal scroll speed (units/s)
    pub speed: f32,
    /// Gap height for newly spawned pylons
    pub gap_height: f32,
}

/// Compute the ramp parameters for a distance.
///
/// Quadratic ease-in over [0, MAX_DISTANCE]: the ramp starts gentle and
/// steepens, then holds at the maximum. Distance never decreases within a
/// run, so the clamp only matters past the ramp end.
pub fn params_for_distance(distance: f32) -> DifficultyParams {
    let t = (distance / MAX_DISTANCE).clamp(0.0, 1.0);
    let eased = t * t;
    DifficultyParams {
        speed: BASE_SPEED + (MAX_SPEED - BASE_SPEED) * eased,
        gap_height: BASE_GAP + (MIN_GAP - BASE_GAP) * eased,
    }
}
