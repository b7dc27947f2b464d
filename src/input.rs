//! Input aggregation
//!
//! Browser event handlers write into `InputState`; the frame driver samples it
//! once per tick into a `TickInput`. Held keys and an active pointer drag can
//! coexist: each pointer move sets the target once, keys nudge it in between.

use glam::Vec2;

use crate::sim::TickInput;

/// Logical key actions we care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Restart,
    ToggleAutopilot,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "Enter" => Some(Key::Restart),
            "i" | "I" => Some(Key::ToggleAutopilot),
            _ => None,
        }
    }
}

/// Current directional intent
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    dragging: bool,
    /// Latest drag position not yet handed to a tick
    pointer: Option<Vec2>,
    autopilot: bool,
    restart_requested: bool,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            Key::Restart => self.restart_requested = true,
            Key::ToggleAutopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Idle mode: {}", self.autopilot);
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Up => self.up = false,
            Key::Down => self.down = false,
            Key::Restart | Key::ToggleAutopilot => {}
        }
    }

    /// Pointer pressed at arena coordinates; starts a drag
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.set_pointer(x, y);
    }

    /// Pointer moved; only tracked while dragging
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.dragging {
            self.set_pointer(x, y);
        }
    }

    /// Pointer released or cancelled
    pub fn pointer_up(&mut self) {
        self.dragging = false;
        self.pointer = None;
    }

    fn set_pointer(&mut self, x: f32, y: f32) {
        // Out-of-range values are clamped later by the controller; NaN is dropped here
        if x.is_finite() && y.is_finite() {
            self.pointer = Some(Vec2::new(x, y));
        }
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Consume a pending restart request
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    /// Release everything (e.g. on window blur)
    pub fn clear_held(&mut self) {
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
        self.pointer_up();
    }

    /// Snapshot for one tick; a pending pointer position is consumed
    pub fn sample(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            pointer: self.pointer.take(),
            autopilot: self.autopilot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom("Enter"), Some(Key::Restart));
        assert_eq!(Key::from_dom("Escape"), None);
    }

    #[test]
    fn test_held_keys() {
        let mut input = InputState::default();
        input.key_down(Key::Left);
        input.key_down(Key::Right);
        assert!(input.sample().left && input.sample().right);
        input.key_up(Key::Left);
        assert!(!input.sample().left);
    }

    #[test]
    fn test_pointer_only_while_dragging() {
        let mut input = InputState::default();
        input.pointer_move(10.0, 10.0);
        assert_eq!(input.sample().pointer, None);
        input.pointer_down(50.0, 60.0);
        input.pointer_move(70.0, 60.0);
        assert_eq!(input.sample().pointer, Some(Vec2::new(70.0, 60.0)));
        input.pointer_move(f32::NAN, 1.0);
        assert_eq!(input.sample().pointer, None);
        input.pointer_move(90.0, 60.0);
        input.pointer_up();
        assert_eq!(input.sample().pointer, None);
        input.pointer_move(95.0, 60.0);
        assert_eq!(input.sample().pointer, None);
    }

    #[test]
    fn test_pointer_handed_over_once_per_move() {
        let mut input = InputState::default();
        input.pointer_down(50.0, 60.0);
        input.key_down(Key::Right);
        let first = input.sample();
        assert_eq!(first.pointer, Some(Vec2::new(50.0, 60.0)));
        let second = input.sample();
        assert_eq!(second.pointer, None);
        assert!(second.right);
        input.pointer_move(80.0, 60.0);
        assert_eq!(input.sample().pointer, Some(Vec2::new(80.0, 60.0)));
    }

    #[test]
    fn test_restart_is_one_shot() {
        let mut input = InputState::default();
        input.key_down(Key::Restart);
        assert!(input.take_restart());
        assert!(!input.take_restart());
    }

    #[test]
    fn test_autopilot_toggle() {
        let mut input = InputState::default();
        input.key_down(Key::ToggleAutopilot);
        assert!(input.sample().autopilot);
        input.key_down(Key::ToggleAutopilot);
        assert!(!input.autopilot());
    }
}
