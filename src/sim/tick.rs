//! Per-frame simulation step
//!
//! `tick` is the phase controller: it owns every transition between idle,
//! running, paused, and over, plus the countdown/airborne sub-state inside
//! a run, and it is the only place run state mutates.

use glam::Vec2;

use super::collision::craft_hits_pylons;
use super::difficulty::params_for_distance;
use super::physics::{self, Bounds};
use super::state::{GameState, Phase, RunMode};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Thrust held (level-triggered; true while the key/pointer is down)
    pub thrust: bool,
    /// Start or restart a run (one-shot)
    pub start: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Terminal pair handed to the shell when a run ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub score: u32,
    pub distance: f32,
}

/// Advance the game by one frame.
///
/// Returns the terminal report exactly once, on the frame the run ends;
/// `None` otherwise.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Option<RunReport> {
    if input.pause {
        match state.phase {
            Phase::Running(mode) => {
                state.phase = Phase::Paused(mode);
                return None;
            }
            Phase::Paused(mode) => {
                // Resume restores the frozen mode; nothing is integrated
                // this frame so no paused wall-clock leaks into physics.
                state.phase = Phase::Running(mode);
                return None;
            }
            _ => {}
        }
    }

    if input.start && matches!(state.phase, Phase::Idle | Phase::Over) {
        state.start_run();
        log::info!("run started (seed {})", state.seed);
        return None;
    }

    let mode = match state.phase {
        Phase::Running(mode) => mode,
        _ => return None,
    };

    // Degenerate frame (duplicate callback, clock hiccup): no-op rather
    // than corrupting velocity/position.
    if dt <= 0.0 {
        return None;
    }
    let dt = dt.min(MAX_FRAME_DT);

    match mode {
        RunMode::Countdown { remaining } => {
            countdown_frame(state, remaining, dt);
            None
        }
        RunMode::Airborne => airborne_frame(state, input.thrust, dt),
    }
}

/// Countdown lead-in: input ignored, collision off, slow scroll.
fn countdown_frame(state: &mut GameState, remaining: f32, dt: f32) {
    // Ease toward vertical center. 1 - 0.25^dt gives the same convergence
    // per simulated second at any frame rate.
    let center = FIELD_HEIGHT / 2.0;
    let blend = 1.0 - 0.25f32.powf(dt);
    state.craft.y += (center - state.craft.y) * blend;
    state.craft.vy = 0.0;

    for pylon in &mut state.pylons {
        pylon.x -= WARMUP_SPEED * dt;
    }
    // Warm-up drift keeps the pipeline continuous but is not reported
    // distance; it is zeroed at the transition below.
    state.distance += WARMUP_SPEED * dt;
    state.refill_window(params_for_distance(0.0).gap_height);

    let remaining = remaining - dt;
    if remaining <= 0.0 {
        state.distance = 0.0;
        state.phase = Phase::Running(RunMode::Airborne);
    } else {
        state.phase = Phase::Running(RunMode::Countdown { remaining });
    }
}

/// One frame of active play.
fn airborne_frame(state: &mut GameState, thrusting: bool, dt: f32) -> Option<RunReport> {
    let params = params_for_distance(state.distance);

    for pylon in &mut state.pylons {
        pylon.x -= params.speed * dt;
    }
    state.refill_window(params.gap_height);

    for pylon in &mut state.pylons {
        if !pylon.passed && pylon.trailing_edge() < CRAFT_X {
            pylon.passed = true;
            state.score += 1;
        }
    }

    state.distance += params.speed * dt;

    let step = physics::step(state.craft.y, state.craft.vy, dt, thrusting, Bounds::field());
    // The clamped position is committed even on the terminal frame so the
    // craft is drawn where it struck.
    state.craft.y = step.pos;
    state.craft.vy = step.vel;

    let hit = step.hit_bound
        || craft_hits_pylons(
            Vec2::new(CRAFT_X, step.raw_pos),
            CRAFT_RADIUS,
            &state.pylons,
            FIELD_HEIGHT,
        );

    if hit {
        state.phase = Phase::Over;
        log::info!(
            "run over: score {} distance {:.0}",
            state.score,
            state.distance
        );
        return Some(RunReport {
            score: state.score,
            distance: state.distance,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Pylon;

    const DT: f32 = 1.0 / 60.0;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &TickInput { start: true, ..Default::default() }, DT);
        state
    }

    /// Run the full countdown at 60 Hz.
    fn finish_countdown(state: &mut GameState) {
        let input = TickInput::default();
        for _ in 0..200 {
            if matches!(state.phase, Phase::Running(RunMode::Airborne)) {
                return;
            }
            tick(state, &input, DT);
        }
        panic!("countdown never finished");
    }

    /// An airborne state with a wide-open gap in front of the craft.
    fn airborne(seed: u64) -> GameState {
        let mut state = started(seed);
        state.phase = Phase::Running(RunMode::Airborne);
        state.distance = 0.0;
        state
    }

    #[test]
    fn test_start_resets_and_arms_countdown() {
        let mut state = GameState::new(1);
        state.score = 9; // stale values must not survive a start
        state.distance = 123.0;
        tick(&mut state, &TickInput { start: true, ..Default::default() }, DT);

        assert!(matches!(state.phase, Phase::Running(RunMode::Countdown { .. })));
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.craft.y, FIELD_HEIGHT / 2.0);
        assert!(!state.pylons.is_empty());
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut state = started(1);
        let before = state.phase;
        tick(&mut state, &TickInput { start: true, ..Default::default() }, DT);
        // Another frame of countdown elapsed, but no reset happened
        assert!(matches!(before, Phase::Running(RunMode::Countdown { .. })));
        assert!(matches!(state.phase, Phase::Running(RunMode::Countdown { .. })));
    }

    #[test]
    fn test_countdown_ignores_thrust_and_converges_to_center() {
        let mut state = started(1);
        state.craft.y = FIELD_HEIGHT / 2.0 - 40.0;

        let input = TickInput { thrust: true, ..Default::default() };
        let mut frames = 0;
        while matches!(state.phase, Phase::Running(RunMode::Countdown { .. })) {
            assert!(tick(&mut state, &input, DT).is_none());
            frames += 1;
            assert!(frames < 200);
        }

        // Thrust was ignored: no game-over, and after 3 s of easing the
        // craft is within a unit of center (0.25^3 of a 40-unit offset).
        assert!(matches!(state.phase, Phase::Running(RunMode::Airborne)));
        assert!((state.craft.y - FIELD_HEIGHT / 2.0).abs() < 1.0);
        assert_eq!(state.craft.vy, 0.0);
    }

    #[test]
    fn test_countdown_scrolls_at_warmup_speed() {
        let mut state = started(1);
        let x0 = state.pylons[0].x;
        tick(&mut state, &TickInput::default(), DT);
        let moved = x0 - state.pylons[0].x;
        assert!((moved - WARMUP_SPEED * DT).abs() < 1e-3);
    }

    #[test]
    fn test_warmup_distance_not_reported() {
        let mut state = started(1);
        finish_countdown(&mut state);
        // The slow lead-in scrolled the world, but reported distance
        // starts at zero when play begins.
        assert_eq!(state.distance, 0.0);
    }

    #[test]
    fn test_pause_preserves_countdown_remaining() {
        let mut state = started(1);
        tick(&mut state, &TickInput::default(), DT);
        let Phase::Running(RunMode::Countdown { remaining: before }) = state.phase else {
            panic!("expected running countdown, got {:?}", state.phase);
        };

        tick(&mut state, &TickInput { pause: true, ..Default::default() }, DT);
        let Phase::Paused(RunMode::Countdown { remaining: frozen }) = state.phase else {
            panic!("expected paused countdown, got {:?}", state.phase);
        };
        assert_eq!(frozen, before);

        tick(&mut state, &TickInput { pause: true, ..Default::default() }, DT);
        let Phase::Running(RunMode::Countdown { remaining: resumed }) = state.phase else {
            panic!("expected resumed countdown, got {:?}", state.phase);
        };
        assert_eq!(resumed, frozen);
    }

    #[test]
    fn test_paused_frames_mutate_nothing() {
        let mut state = airborne(1);
        tick(&mut state, &TickInput::default(), DT);

        tick(&mut state, &TickInput { pause: true, ..Default::default() }, DT);
        assert!(matches!(state.phase, Phase::Paused(RunMode::Airborne)));

        let y = state.craft.y;
        let x = state.pylons[0].x;
        let distance = state.distance;
        for _ in 0..30 {
            assert!(tick(&mut state, &TickInput { thrust: true, ..Default::default() }, DT).is_none());
        }
        assert_eq!(state.craft.y, y);
        assert_eq!(state.pylons[0].x, x);
        assert_eq!(state.distance, distance);

        // Resume picks up where it froze
        tick(&mut state, &TickInput { pause: true, ..Default::default() }, DT);
        assert!(matches!(state.phase, Phase::Running(RunMode::Airborne)));
        assert_eq!(state.craft.y, y);
    }

    #[test]
    fn test_degenerate_dt_is_noop() {
        let mut state = airborne(1);
        let snapshot = (state.craft.y, state.craft.vy, state.distance, state.pylons[0].x);
        assert!(tick(&mut state, &TickInput::default(), 0.0).is_none());
        assert!(tick(&mut state, &TickInput::default(), -0.5).is_none());
        assert_eq!(
            snapshot,
            (state.craft.y, state.craft.vy, state.distance, state.pylons[0].x)
        );
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut state = airborne(1);
        tick(&mut state, &TickInput::default(), 10.0);
        // Only MAX_FRAME_DT was integrated
        assert!((state.distance - BASE_SPEED * MAX_FRAME_DT).abs() < 1e-2);
    }

    /// Place one pylon so its trailing edge sits just right of the craft,
    /// gap wide open around the craft's row.
    fn plant_pylon_near_craft(state: &mut GameState) {
        state.pylons.clear();
        state.pylons.push(Pylon {
            id: 1000,
            x: CRAFT_X - PYLON_WIDTH + 10.0,
            gap_center: FIELD_HEIGHT / 2.0,
            gap_height: 400.0,
            passed: false,
        });
    }

    #[test]
    fn test_scoring_is_frame_rate_invariant() {
        // Fine steps
        let mut fine = airborne(1);
        plant_pylon_near_craft(&mut fine);
        for _ in 0..20 {
            tick(&mut fine, &TickInput::default(), 0.016);
        }

        // One coarse stall per frame, clamped internally
        let mut coarse = airborne(1);
        plant_pylon_near_craft(&mut coarse);
        for _ in 0..10 {
            tick(&mut coarse, &TickInput::default(), 0.2);
        }

        assert_eq!(fine.score, 1);
        assert_eq!(coarse.score, 1);
        assert!(fine.pylons.iter().find(|p| p.id == 1000).unwrap().passed);
        assert!(coarse.pylons.iter().find(|p| p.id == 1000).unwrap().passed);
    }

    #[test]
    fn test_passed_flag_never_reverts() {
        let mut state = airborne(1);
        plant_pylon_near_craft(&mut state);
        for _ in 0..60 {
            if !matches!(state.phase, Phase::Running(_)) {
                break;
            }
            tick(&mut state, &TickInput::default(), 0.016);
        }
        assert_eq!(state.score, 1);
        if let Some(p) = state.pylons.iter().find(|p| p.id == 1000) {
            assert!(p.passed);
        }
    }

    #[test]
    fn test_floor_hit_ends_run_and_reports_once() {
        let mut state = airborne(1);

        let mut report = None;
        for _ in 0..600 {
            if let Some(r) = tick(&mut state, &TickInput::default(), DT) {
                report = Some(r);
                break;
            }
        }

        // With thrust never held the craft free-falls into the floor
        let report = report.expect("free fall never ended the run");
        assert_eq!(state.phase, Phase::Over);
        assert_eq!(report.score, state.score);
        assert_eq!(state.craft.y, FIELD_HEIGHT - CRAFT_RADIUS);

        // Emitted exactly once; later frames are inert
        let y = state.craft.y;
        for _ in 0..10 {
            assert!(tick(&mut state, &TickInput { thrust: true, ..Default::default() }, DT).is_none());
        }
        assert_eq!(state.craft.y, y);
    }

    #[test]
    fn test_held_thrust_hits_ceiling_within_bounded_time() {
        let mut state = started(2);
        finish_countdown(&mut state);

        let input = TickInput { thrust: true, ..Default::default() };
        let mut report = None;
        for _ in 0..120 {
            if let Some(r) = tick(&mut state, &input, DT) {
                report = Some(r);
                break;
            }
        }

        assert!(report.is_some(), "ceiling never reached under held thrust");
        assert_eq!(state.craft.y, CRAFT_RADIUS);
    }

    #[test]
    fn test_restart_from_over() {
        let mut state = airborne(1);
        while tick(&mut state, &TickInput::default(), DT).is_none() {}
        assert_eq!(state.phase, Phase::Over);

        tick(&mut state, &TickInput { start: true, ..Default::default() }, DT);
        assert!(matches!(state.phase, Phase::Running(RunMode::Countdown { .. })));
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.craft.vy, 0.0);
    }

    #[test]
    fn test_determinism() {
        let script = |state: &mut GameState| {
            tick(state, &TickInput { start: true, ..Default::default() }, DT);
            finish_countdown(state);
            for i in 0..120 {
                let thrust = (i / 10) % 2 == 0;
                tick(state, &TickInput { thrust, ..Default::default() }, DT);
            }
        };

        let mut a = GameState::new(424242);
        let mut b = GameState::new(424242);
        script(&mut a);
        script(&mut b);

        assert_eq!(a.score, b.score);
        assert_eq!(a.distance, b.distance);
        assert_eq!(a.craft.y, b.craft.y);
        assert_eq!(a.pylons.len(), b.pylons.len());
        for (pa, pb) in a.pylons.iter().zip(&b.pylons) {
            assert_eq!(pa.gap_center, pb.gap_center);
            assert_eq!(pa.x, pb.x);
        }
    }
}
