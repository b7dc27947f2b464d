//! Headless session runner
//!
//! Plays a session under autopilot at a fixed 60 Hz frame rate with no
//! browser attached. Used by the native binary and for balance checks.

use serde::Serialize;

use crate::game::{Game, Platform};
use crate::input::Key;
use crate::persistence::MemoryStore;
use crate::platform::{LogHud, NullHaptics};
use crate::settings::Settings;
use crate::sim::{Arena, Session};
use crate::tuning::Tuning;

/// Host frames per second
const FRAME_RATE: f64 = 60.0;

/// Default portrait viewport for headless runs
pub const DEFAULT_ARENA: (f32, f32) = (480.0, 800.0);

/// How a headless run ended
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub frames: u64,
    /// Simulated play time in seconds
    pub elapsed: f32,
    pub session: Session,
}

/// Simulate up to `seconds` of play, stopping early on game over
pub fn run_headless(seed: u64, seconds: f32, tuning: Tuning) -> RunReport {
    let platform = Platform {
        store: Box::new(MemoryStore::new()),
        hud: Box::new(LogHud::default()),
        haptics: Box::new(NullHaptics),
    };
    let (w, h) = DEFAULT_ARENA;
    let mut game = Game::new(seed, tuning, Arena::new(w, h), Settings::default(), platform);
    game.input.key_down(Key::ToggleAutopilot);
    game.start();

    let max_frames = (seconds.max(0.0) as f64 * FRAME_RATE).ceil() as u64;
    let mut frames = 0;
    while frames < max_frames && !game.state.session.game_over() {
        game.frame(frames as f64 * 1000.0 / FRAME_RATE);
        frames += 1;
    }

    RunReport {
        seed: game.state.seed,
        frames,
        elapsed: game.state.progression.elapsed,
        session: game.state.session.clone(),
    }
}
