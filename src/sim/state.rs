//! Game state and core simulation types
//!
//! The whole run lives in one [`GameState`] value owned by the simulation;
//! the shell only ever sees it by shared reference plus the terminal
//! report handed out at game over.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::pipeline;
use crate::consts::*;

/// Sub-state of an active run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunMode {
    /// Pre-play lead-in: input ignored, collision off, slow scroll
    Countdown { remaining: f32 },
    /// Active play
    Airborne,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Waiting for the first start
    Idle,
    /// A run is in progress (counting down or airborne)
    Running(RunMode),
    /// Frozen mid-run; the mode is kept so resume restores it exactly
    Paused(RunMode),
    /// Run ended; terminal report has been emitted
    Over,
}

impl Phase {
    /// Countdown label for the HUD: "3" / "2" / "1" / "GO", or None
    /// outside the countdown.
    pub fn countdown_label(&self) -> Option<&'static str> {
        match self {
            Phase::Running(RunMode::Countdown { remaining })
            | Phase::Paused(RunMode::Countdown { remaining }) => Some(if *remaining > 2.8 {
                "3"
            } else if *remaining > 1.8 {
                "2"
            } else if *remaining > 0.8 {
                "1"
            } else {
                "GO"
            }),
            _ => None,
        }
    }
}

/// The player's craft
#[derive(Debug, Clone, Copy)]
pub struct Craft {
    /// Vertical position of the craft center (world units)
    pub y: f32,
    /// Vertical velocity (units/s, positive = downward)
    pub vy: f32,
}

impl Craft {
    /// Craft at rest in the vertical center of the field
    pub fn centered() -> Self {
        Self {
            y: FIELD_HEIGHT / 2.0,
            vy: 0.0,
        }
    }
}

/// One scrolling pylon: a full-height column with a gap cut out of it
#[derive(Debug, Clone)]
pub struct Pylon {
    pub id: u32,
    /// Left edge x; decreases as the world scrolls
    pub x: f32,
    /// Vertical center of the gap, fixed at spawn
    pub gap_center: f32,
    /// Gap height, fixed at spawn
    pub gap_height: f32,
    /// Whether this pylon has been scored (one-way false → true)
    pub passed: bool,
}

impl Pylon {
    /// Right edge x
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + PYLON_WIDTH
    }

    /// Bottom of the upper segment
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    /// Top of the lower segment
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap placement RNG (seeded; tests get identical runs from equal seeds)
    pub rng: Pcg32,
    /// Current phase
    pub phase: Phase,
    /// Player craft
    pub craft: Craft,
    /// Active pylon window, ordered by non-decreasing x
    pub pylons: Vec<Pylon>,
    /// Gaps cleared this run
    pub score: u32,
    /// Distance traveled this run (world units)
    pub distance: f32,
    /// Next pylon ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game state with the given seed.
    ///
    /// Tuning invariants are programming-time constraints, not runtime
    /// conditions, so they are asserted once here.
    pub fn new(seed: u64) -> Self {
        assert!(MIN_GAP < BASE_GAP, "gap must shrink as difficulty ramps");
        assert!(BASE_SPEED < MAX_SPEED, "speed must grow as difficulty ramps");
        assert!(
            THRUST_ACCEL < 0.0 && -THRUST_ACCEL > GRAVITY,
            "held thrust must climb"
        );
        assert!(FIELD_HEIGHT > 2.0 * GAP_MARGIN, "margins must leave a playable band");

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Idle,
            craft: Craft::centered(),
            pylons: Vec::new(),
            score: 0,
            distance: 0.0,
            next_id: 1,
        }
    }

    /// Cull and top up the pylon window at the given gap height, drawing
    /// placements from this state's own RNG.
    pub fn refill_window(&mut self, gap_height: f32) {
        pipeline::refill(&mut self.pylons, &mut self.next_id, gap_height, &mut self.rng);
    }

    /// Reset run state and arm the countdown. Valid from any phase; used
    /// for both the first start and restarts after game over.
    pub fn start_run(&mut self) {
        self.craft = Craft::centered();
        self.score = 0;
        self.distance = 0.0;
        self.pylons.clear();

        // Pre-populate the window through the same refill path the loop
        // uses, at the distance-0 gap height.
        self.refill_window(super::params_for_distance(0.0).gap_height);

        self.phase = Phase::Running(RunMode::Countdown {
            remaining: COUNTDOWN_SECS,
        });
    }
}
