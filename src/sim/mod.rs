//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Clamped per-frame timestep
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod pipeline;
pub mod state;
pub mod tick;

pub use collision::craft_hits_pylons;
pub use difficulty::{DifficultyParams, params_for_distance};
pub use physics::{Bounds, StepResult, step};
pub use state::{Craft, GameState, Phase, Pylon, RunMode};
pub use tick::{RunReport, TickInput, tick};
