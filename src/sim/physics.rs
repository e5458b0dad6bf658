//! Vertical physics integration
//!
//! Advances the craft under gravity and thrust with a per-step drag term,
//! then clamps against the field bounds. Deterministic given its inputs;
//! no hidden state.

use crate::consts::*;

/// Vertical extent the craft is clamped into
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub ceiling: f32,
    pub floor: f32,
}

impl Bounds {
    /// The full play field
    pub fn field() -> Self {
        Self {
            ceiling: 0.0,
            floor: FIELD_HEIGHT,
        }
    }
}

/// Outcome of one integration step
#[derive(Debug, Clone, Copy)]
pub struct StepResult {
    /// Post-clamp position
    pub pos: f32,
    /// New velocity
    pub vel: f32,
    /// Intended position before the bound clamp; collision runs against
    /// this so a frame that crosses a bound still registers where the
    /// craft was headed
    pub raw_pos: f32,
    /// Whether the clamp fired on either bound
    pub hit_bound: bool,
}

/// Integrate one step.
///
/// `vel' = (vel + accel * dt) * VEL_DAMPING`, `pos' = pos + vel' * dt`, then
/// clamp `pos'` so the craft circle stays inside `bounds`.
pub fn step(pos: f32, vel: f32, dt: f32, thrusting: bool, bounds: Bounds) -> StepResult {
    let accel = GRAVITY + if thrusting { THRUST_ACCEL } else { 0.0 };
    let vel = (vel + accel * dt) * VEL_DAMPING;
    let raw_pos = pos + vel * dt;

    let mut pos = raw_pos;
    let mut hit_bound = false;
    if pos + CRAFT_RADIUS >= bounds.floor {
        pos = bounds.floor - CRAFT_RADIUS;
        hit_bound = true;
    }
    if pos - CRAFT_RADIUS <= bounds.ceiling {
        pos = bounds.ceiling + CRAFT_RADIUS;
        hit_bound = true;
    }

    StepResult {
        pos,
        vel,
        raw_pos,
        hit_bound,
    }
}
