//! Frame driver
//!
//! Owns the simulation plus the platform sinks and runs one
//! input → tick → events cycle per host frame. Identical on wasm and native;
//! only the sinks differ.

use crate::clock::{FpsCounter, FrameClock};
use crate::input::InputState;
use crate::persistence::BestScoreStore;
use crate::platform::{Haptics, Hud, HudSnapshot};
use crate::renderer::FrameView;
use crate::settings::Settings;
use crate::sim::{Arena, GameEvent, GameState, tick};
use crate::tuning::Tuning;

/// Vibration per life lost
const HAPTIC_MS_PER_LIFE: u32 = 60;

/// Collaborators the core reports into
pub struct Platform {
    pub store: Box<dyn BestScoreStore>,
    pub hud: Box<dyn Hud>,
    pub haptics: Box<dyn Haptics>,
}

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub input: InputState,
    pub settings: Settings,
    clock: FrameClock,
    fps: FpsCounter,
    platform: Platform,
}

impl Game {
    /// Build a game that waits for `start`; the best score comes from the store
    pub fn new(seed: u64, tuning: Tuning, arena: Arena, settings: Settings, platform: Platform) -> Self {
        let best = platform.store.load();
        let clock = FrameClock::new(tuning.max_frame_dt);
        log::info!("Game initialized with seed {} (best {})", seed, best);
        Self {
            state: GameState::new(seed, tuning, arena, best),
            input: InputState::default(),
            settings,
            clock,
            fps: FpsCounter::default(),
            platform,
        }
    }

    /// Begin the first session once assets are ready
    pub fn start(&mut self) {
        self.begin_session();
    }

    /// Fresh session, keeping the best score
    pub fn restart(&mut self) {
        log::info!("Restarting");
        self.begin_session();
    }

    fn begin_session(&mut self) {
        self.state.reset();
        self.clock.reset();
        self.input.clear_held();
        self.platform.hud.set_game_over(false);
        self.sync_hud();
    }

    /// One host frame at timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.advance(now_ms);
        self.fps.record(now_ms);

        if self.input.take_restart() && self.state.session.game_over() {
            self.restart();
            return;
        }

        // A zero-length frame would swallow a pending pointer move
        if self.state.session.running() && dt > 0.0 {
            let input = self.input.sample();
            tick(&mut self.state, &input, dt);
        }
        self.handle_events();

        if self.settings.show_fps {
            self.platform.hud.set_fps(Some(self.fps.fps()));
        }
    }

    /// Route this tick's events to the sinks
    fn handle_events(&mut self) {
        let events = self.state.drain_events();
        if events.is_empty() {
            return;
        }

        for event in &events {
            match *event {
                GameEvent::HazardHit { kind, lives_lost } if lives_lost > 0 => {
                    log::debug!("Hit by {:?}, lost {}", kind, lives_lost);
                    if self.settings.haptics {
                        self.platform.haptics.pulse(lives_lost * HAPTIC_MS_PER_LIFE);
                    }
                }
                GameEvent::NewBest { score } => {
                    match self.platform.store.save(score) {
                        Ok(()) => log::info!("New best score {} saved", score),
                        Err(e) => log::warn!("Failed to save best score: {}", e),
                    }
                }
                GameEvent::GameOver { .. } => {
                    self.platform.hud.set_game_over(true);
                }
                _ => {}
            }
        }

        self.sync_hud();
    }

    fn sync_hud(&mut self) {
        let snapshot = self.snapshot();
        self.platform.hud.update(snapshot);
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot::from(&self.state.session)
    }

    /// Viewport changed (CSS pixels)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
        log::debug!(
            "Resized to {}x{}",
            self.state.arena.width,
            self.state.arena.height
        );
    }

    pub fn toggle_fps(&mut self) {
        self.settings.show_fps = !self.settings.show_fps;
        if !self.settings.show_fps {
            self.platform.hud.set_fps(None);
        }
        if let Err(e) = self.settings.save() {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    /// Read-only view for the renderer
    pub fn view(&self) -> FrameView<'_> {
        FrameView::new(&self.state, self.settings.reduced_motion)
    }
}
