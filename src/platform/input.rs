//! Keyboard input
//!
//! Front ends translate their native key events into `Key`s; `InputState`
//! folds them into the `TickInput` each simulation step sees.

use crate::sim::TickInput;

/// Game-level keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Restart,
    Quit,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_web_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "r" | "R" | " " | "Enter" => Some(Key::Restart),
            "Escape" => Some(Key::Quit),
            _ => None,
        }
    }
}

/// Held and one-shot key state between simulation steps
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left_held: bool,
    right_held: bool,
    restart_pressed: bool,
    quit_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = true,
            Key::Right => self.right_held = true,
            Key::Restart => self.restart_pressed = true,
            Key::Quit => self.quit_requested = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = false,
            Key::Right => self.right_held = false,
            Key::Restart | Key::Quit => {}
        }
    }

    /// Release everything held (window lost focus)
    pub fn release_all(&mut self) {
        self.left_held = false;
        self.right_held = false;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Input for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_left: self.left_held,
            move_right: self.right_held,
            restart: self.restart_pressed,
        }
    }

    /// Clear one-shot inputs after a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.restart_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_key_mapping() {
        assert_eq!(Key::from_web_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_web_key("D"), Some(Key::Right));
        assert_eq!(Key::from_web_key(" "), Some(Key::Restart));
        assert_eq!(Key::from_web_key("Escape"), Some(Key::Quit));
        assert_eq!(Key::from_web_key("q"), None);
    }

    #[test]
    fn test_held_keys() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        assert_eq!(input.tick_input().direction(), -1.0);
        input.key_down(Key::Right);
        assert_eq!(input.tick_input().direction(), 0.0);
        input.key_up(Key::Left);
        assert_eq!(input.tick_input().direction(), 1.0);
        input.release_all();
        assert_eq!(input.tick_input().direction(), 0.0);
    }

    #[test]
    fn test_restart_is_one_shot() {
        let mut input = InputState::new();
        input.key_down(Key::Restart);
        assert!(input.tick_input().restart);
        // Releasing before the tick still delivers the press
        input.key_up(Key::Restart);
        assert!(input.tick_input().restart);
        input.clear_one_shots();
        assert!(!input.tick_input().restart);
    }

    #[test]
    fn test_quit_latches() {
        let mut input = InputState::new();
        assert!(!input.quit_requested());
        input.key_down(Key::Quit);
        input.key_up(Key::Quit);
        assert!(input.quit_requested());
    }
}
