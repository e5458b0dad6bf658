//! Persistent best score
//!
//! A single integer surviving across runs, persisted to LocalStorage on
//! wasm. The shell loads it at startup and writes it back exactly once
//! per run, at the moment a run ends with a new best.

use serde::{Deserialize, Serialize};

/// Best score across all runs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BestScore {
    pub score: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gap_glider_best";

    pub fn new() -> Self {
        Self { score: 0 }
    }

    /// Record a finished run. Returns true when the run set a new best,
    /// which is the shell's cue to persist.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.score {
            self.score = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<BestScore>(&json) {
                    log::info!("Loaded best score: {}", best.score);
                    return best;
                }
            }
        }

        log::info!("No best score found, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best score saved: {}", self.score);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
