//! Player input state
//!
//! Event handlers write here whenever the host delivers a key or pointer
//! event; the engine reads a [`TickInput`] snapshot once per frame. Writes are
//! last-write-wins: nothing is queued.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Logical actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    MoveLeft,
    MoveRight,
    TogglePause,
    ToggleContrast,
}

/// Anything the engine can poll for per-frame input
pub trait InputSource {
    /// Snapshot the current input. Called exactly once per advanced frame.
    fn poll(&mut self) -> TickInput;
}

/// Held-key flags plus the latest pointer position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Last pointer x not yet consumed by a frame
    pointer_x: Option<f32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true when the press is a one-shot
    /// command, which the caller must forward to the loop owner.
    pub fn key_down(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::MoveLeft => self.left = true,
            KeyAction::MoveRight => self.right = true,
            KeyAction::TogglePause | KeyAction::ToggleContrast => return true,
        }
        false
    }

    pub fn key_up(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveLeft => self.left = false,
            KeyAction::MoveRight => self.right = false,
            KeyAction::TogglePause | KeyAction::ToggleContrast => {}
        }
    }

    /// Pointer moved to `x` in virtual field coordinates
    pub fn pointer_moved(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    /// Drop all held keys (focus loss, reset)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.pointer_x = None;
    }
}

impl InputSource for InputState {
    fn poll(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            pointer_x: self.pointer_x.take(),
        }
    }
}
