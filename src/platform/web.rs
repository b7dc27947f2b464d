//! Browser implementations of the platform sinks

use web_sys::Document;

use super::{Haptics, Hud, HudSnapshot};

/// Writes into the DOM score widgets
pub struct DomHud {
    document: Document,
}

impl DomHud {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }
}

impl Hud for DomHud {
    fn update(&mut self, snapshot: HudSnapshot) {
        self.set_text("score", &snapshot.score.to_string());
        self.set_text("highscore", &snapshot.best_score.to_string());
        self.set_text("lives", &snapshot.lives.to_string());
        self.set_text("combo", &snapshot.combo.to_string());
    }

    fn set_game_over(&mut self, game_over: bool) {
        self.set_hidden("btn-restart", !game_over);
    }

    fn set_fps(&mut self, fps: Option<u32>) {
        match fps {
            Some(fps) => {
                self.set_hidden("fps", false);
                self.set_text("fps", &fps.to_string());
            }
            None => self.set_hidden("fps", true),
        }
    }
}

/// `navigator.vibrate`; silently does nothing where unsupported
#[derive(Default)]
pub struct VibrationHaptics;

impl Haptics for VibrationHaptics {
    fn pulse(&mut self, duration_ms: u32) {
        if let Some(window) = web_sys::window() {
            // Returns false when blocked or unsupported; nothing to do either way
            let _ = window.navigator().vibrate_with_duration(duration_ms);
        }
    }
}
