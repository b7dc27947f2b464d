//! Platform abstraction layer
//!
//! One-way sinks the core reports into. None of them can fail the game:
//! implementations swallow their own errors.

#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::Serialize;

use crate::sim::Session;

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub best_score: u64,
    pub lives: u32,
    pub combo: u32,
}

impl From<&Session> for HudSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            score: session.score,
            best_score: session.best_score,
            lives: session.lives,
            combo: session.combo,
        }
    }
}

/// Score/lives/combo widgets
pub trait Hud {
    fn update(&mut self, snapshot: HudSnapshot);
    /// Show or hide the restart affordance
    fn set_game_over(&mut self, _game_over: bool) {}
    fn set_fps(&mut self, _fps: Option<u32>) {}
}

/// Vibration feedback
pub trait Haptics {
    fn pulse(&mut self, duration_ms: u32);
}

/// Discards every pulse
#[derive(Debug, Default)]
pub struct NullHaptics;

impl Haptics for NullHaptics {
    fn pulse(&mut self, _duration_ms: u32) {}
}

/// Logs HUD changes; used by the headless runner
#[derive(Debug, Default)]
pub struct LogHud {
    last: Option<HudSnapshot>,
}

impl Hud for LogHud {
    fn update(&mut self, snapshot: HudSnapshot) {
        if self.last != Some(snapshot) {
            log::debug!(
                "HUD score={} best={} lives={} combo={}",
                snapshot.score,
                snapshot.best_score,
                snapshot.lives,
                snapshot.combo
            );
            self.last = Some(snapshot);
        }
    }

    fn set_game_over(&mut self, game_over: bool) {
        if game_over {
            log::info!("Restart available");
        }
    }
}
