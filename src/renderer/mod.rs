//! Rendering module
//!
//! Renderers see a borrowed, read-only view of the simulation and never
//! feed anything back into it.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::{Arena, Entity, GameState, Player, Session};

/// Everything a frame needs
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub arena: &'a Arena,
    pub player: &'a Player,
    pub entities: &'a [Entity],
    pub session: &'a Session,
    /// Seconds of play; drives animation, frozen after game over
    pub time: f32,
    /// Seconds a telegraphed hazard spends arming after it spawns
    pub telegraph_window: f32,
    pub reduced_motion: bool,
}

impl<'a> FrameView<'a> {
    pub fn new(state: &'a GameState, reduced_motion: bool) -> Self {
        Self {
            arena: &state.arena,
            player: &state.player,
            entities: &state.entities,
            session: &state.session,
            time: state.progression.elapsed,
            telegraph_window: state.tuning.telegraph_window,
            reduced_motion,
        }
    }
}

/// Draws a frame
pub trait RenderAdapter {
    fn render(&mut self, view: &FrameView<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_view_carries_telegraph_window() {
        let tuning = Tuning {
            telegraph_window: 0.5,
            ..Tuning::default()
        };
        let state = GameState::new(3, tuning, Arena::new(480.0, 800.0), 0);
        let view = FrameView::new(&state, true);
        assert_eq!(view.telegraph_window, 0.5);
        assert!(view.reduced_motion);
        assert_eq!(view.time, 0.0);
    }
}
