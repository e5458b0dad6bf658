//! Gap Glider - a hold-to-thrust arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipeline, collisions, game state)
//! - `renderer`: Canvas-2D rendering (wasm only)
//! - `bestscore`: Persisted best score

pub mod bestscore;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod sim;

pub use bestscore::BestScore;

/// Game configuration constants
///
/// World units: y = 0 at the ceiling, y grows downward, x grows rightward.
/// The craft sits at a fixed x; pylons scroll toward it.
pub mod consts {
    /// Visible play field size in world units
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Craft's fixed horizontal anchor
    pub const CRAFT_X: f32 = 180.0;
    /// Craft collision radius
    pub const CRAFT_RADIUS: f32 = 14.0;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 1500.0;
    /// Upward acceleration while thrust is held (units/s²).
    /// Must outweigh GRAVITY so holding thrust climbs.
    pub const THRUST_ACCEL: f32 = -3400.0;
    /// Per-step velocity damping, a drag term bounding terminal velocity
    pub const VEL_DAMPING: f32 = 0.995;

    /// Scroll speed at distance 0
    pub const BASE_SPEED: f32 = 240.0;
    /// Scroll speed at MAX_DISTANCE and beyond
    pub const MAX_SPEED: f32 = 520.0;
    /// Gap height at distance 0
    pub const BASE_GAP: f32 = 210.0;
    /// Gap height at MAX_DISTANCE and beyond
    pub const MIN_GAP: f32 = 130.0;
    /// Distance over which the difficulty ramp runs
    pub const MAX_DISTANCE: f32 = 4500.0;

    /// Pylon width
    pub const PYLON_WIDTH: f32 = 72.0;
    /// Horizontal spacing between consecutive pylon spawn positions
    pub const PYLON_SPACING: f32 = 320.0;
    /// Pylons whose trailing edge scrolls past this are culled
    pub const CULL_X: f32 = -60.0;
    /// Vertical margin reserved at the field extremes; gaps never touch it
    pub const GAP_MARGIN: f32 = 80.0;
    /// Spawn x for the first pylon of an empty window
    pub const SPAWN_X: f32 = FIELD_WIDTH + 80.0;
    /// Lookahead pylons beyond the visible span
    pub const LOOKAHEAD: usize = 3;

    /// Pre-run countdown duration (seconds)
    pub const COUNTDOWN_SECS: f32 = 3.0;
    /// Slow scroll speed during the countdown lead-in
    pub const WARMUP_SPEED: f32 = 110.0;

    /// Maximum frame delta integrated per tick; larger host stalls are
    /// truncated so the craft cannot tunnel through pylons or bounds
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;
}
