//! Keyboard → control snapshot
//!
//! Tracks which keys are held and produces one [`ControlInput`] per frame.
//! With debouncing on, a jump fires once per key press instead of every
//! frame the key is held.

use crate::sim::ControlInput;

/// Logical game control a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Jump,
}

impl Control {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Control::Left),
            "ArrowRight" | "d" | "D" => Some(Control::Right),
            " " | "Spacebar" | "ArrowUp" | "w" | "W" => Some(Control::Jump),
            _ => None,
        }
    }
}

/// Held-key state
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    left: bool,
    right: bool,
    jump_held: bool,
    /// Press not yet consumed by a snapshot (debounce mode)
    jump_pending: bool,
    debounce_jump: bool,
}

impl KeyboardInput {
    pub fn new(debounce_jump: bool) -> Self {
        Self {
            debounce_jump,
            ..Default::default()
        }
    }

    /// Returns true if the key is a game control (caller should
    /// `preventDefault` so Space doesn't scroll the page)
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(control) = Control::from_key(key) else {
            return false;
        };
        match control {
            Control::Left => self.left = true,
            Control::Right => self.right = true,
            Control::Jump => {
                // Auto-repeat keydowns while held are not new presses
                if !self.jump_held {
                    self.jump_pending = true;
                }
                self.jump_held = true;
            }
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        let Some(control) = Control::from_key(key) else {
            return false;
        };
        match control {
            Control::Left => self.left = false,
            Control::Right => self.right = false,
            Control::Jump => self.jump_held = false,
        }
        true
    }

    /// Drop all held keys (window lost focus; keyups will never arrive)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.jump_held = false;
        self.jump_pending = false;
    }

    /// Sample the controls for the next frame
    pub fn snapshot(&mut self) -> ControlInput {
        let jump = if self.debounce_jump {
            std::mem::take(&mut self.jump_pending)
        } else {
            self.jump_held
        };
        ControlInput {
            left: self.left,
            right: self.right,
            jump,
        }
    }
}
