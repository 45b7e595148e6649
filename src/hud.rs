//! HUD observables
//!
//! The engine publishes a [`HudSnapshot`] after every reset and every advanced
//! frame. Whatever displays it (DOM text, a log line, a test recorder) plugs
//! in as a [`HudObserver`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Score, lives and level as shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            lives: state.lives,
            level: state.level,
        }
    }

    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn lives_label(&self) -> String {
        format!("Lives: {}", self.lives)
    }

    pub fn level_label(&self) -> String {
        format!("Level: {}", self.level)
    }
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.score_label(),
            self.lives_label(),
            self.level_label()
        )
    }
}

/// Receives HUD updates and the terminal game-over signal
pub trait HudObserver {
    fn on_hud(&mut self, hud: &HudSnapshot);

    /// Lives exhausted; the loop has already stopped
    fn on_game_over(&mut self, _final_hud: &HudSnapshot) {}
}
