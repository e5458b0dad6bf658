//! Obstacle pipeline
//!
//! Maintains a sliding window of pylons ahead of the play field: culls the
//! ones that have scrolled out behind it and spawns new ones at the tail
//! until the lookahead buffer is full again.

use rand::Rng;

use super::state::Pylon;
use crate::consts::*;

/// Window size the pipeline maintains: the visible span plus lookahead.
pub fn required_count() -> usize {
    (FIELD_WIDTH / PYLON_SPACING).ceil() as usize + LOOKAHEAD
}

/// Cull passed pylons and top the window back up.
///
/// New pylons spawn one spacing beyond the rightmost survivor, or at
/// `SPAWN_X` when the window is empty. The gap's top edge is drawn
/// uniformly from the band that keeps `GAP_MARGIN` clear at both field
/// extremes; a gap too tall for the band is pinned at the top margin.
pub fn refill<R: Rng>(pylons: &mut Vec<Pylon>, next_id: &mut u32, gap_height: f32, rng: &mut R) {
    pylons.retain(|p| p.trailing_edge() >= CULL_X);

    while pylons.len() < required_count() {
        let x = pylons
            .iter()
            .map(|p| p.x)
            .fold(f32::NEG_INFINITY, f32::max);
        let x = if x.is_finite() { x + PYLON_SPACING } else { SPAWN_X };

        let lo = GAP_MARGIN;
        let hi = FIELD_HEIGHT - GAP_MARGIN - gap_height;
        let gap_top = if hi > lo { rng.random_range(lo..hi) } else { lo };
        let gap_center = gap_top + gap_height / 2.0;

        let id = *next_id;
        *next_id += 1;
        pylons.push(Pylon {
            id,
            x,
            gap_center,
            gap_height,
            passed: false,
        });
    }
}
