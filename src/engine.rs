//! Simulation loop engine
//!
//! Owns the game state, input and HUD observers, and exposes the lifecycle
//! the host UI drives. It never schedules frames itself; a
//! [`Driver`](crate::driver::Driver) does that, which keeps `advance` and
//! `render` testable with synthetic time.

use crate::clamp_dt;
use crate::hud::{HudObserver, HudSnapshot};
use crate::input::{InputSource, InputState};
use crate::renderer::{Palette, Surface, draw_frame};
use crate::sim::{self, GameEvent, GameState};
use crate::tuning::Tuning;

pub struct Engine<I: InputSource = InputState> {
    state: GameState,
    input: I,
    palette: Palette,
    observers: Vec<Box<dyn HudObserver>>,
}

impl Default for Engine<InputState> {
    fn default() -> Self {
        Self::new(Tuning::default(), InputState::new())
    }
}

impl<I: InputSource> Engine<I> {
    pub fn new(tuning: Tuning, input: I) -> Self {
        Self {
            state: GameState::new(tuning),
            input,
            palette: Palette::standard(),
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts that restore snapshots and for tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn add_observer(&mut self, observer: Box<dyn HudObserver>) {
        self.observers.push(observer);
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::from_state(&self.state)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Back to score 0, 3 lives, level 1 with a fresh grid
    pub fn reset(&mut self) {
        self.state.reset();
        log::info!("Game reset");
        self.notify_hud();
    }

    /// Mark the loop running. Returns false if it already was, in which
    /// case nothing changes.
    pub fn start(&mut self) -> bool {
        if self.state.running {
            return false;
        }
        if self.state.is_game_over() {
            log::warn!("Start requested after game over; resetting first");
            self.state.reset();
            self.notify_hud();
        }
        self.state.running = true;
        log::info!("Loop started (level {})", self.state.level);
        true
    }

    /// Mark the loop stopped. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.running = false;
        log::info!("Loop stopped");
        true
    }

    /// Flip the paused flag and return the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.state.paused = !self.state.paused;
        log::info!(
            "{}",
            if self.state.paused { "Paused" } else { "Resumed" }
        );
        self.state.paused
    }

    /// Advance one frame by `dt` seconds (clamped). Skipped entirely while
    /// stopped or paused.
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        if !self.state.running || self.state.paused {
            return Vec::new();
        }

        let dt = clamp_dt(dt, self.state.tuning.max_frame_dt);
        let input = self.input.poll();
        let events = sim::advance(&mut self.state, &input, dt);

        for event in &events {
            match event {
                GameEvent::LevelCleared { level } => {
                    log::info!("Grid cleared, level {}", level)
                }
                GameEvent::GameOver { score, level } => {
                    log::info!("Game over: score {} on level {}", score, level)
                }
                GameEvent::LifeLost { lives_left } => {
                    log::debug!("Ball lost, {} lives left", lives_left)
                }
                other => log::debug!("{:?}", other),
            }
        }

        let hud = self.hud();
        for observer in &mut self.observers {
            observer.on_hud(&hud);
        }
        if self.state.is_game_over() {
            for observer in &mut self.observers {
                observer.on_game_over(&hud);
            }
        }

        events
    }

    /// Draw the current state. Never mutates the game.
    pub fn render(&self, surface: &mut dyn Surface) {
        draw_frame(&self.state, &self.palette, surface);
    }

    fn notify_hud(&mut self) {
        let hud = self.hud();
        for observer in &mut self.observers {
            observer.on_hud(&hud);
        }
    }
}
