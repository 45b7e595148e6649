//! Brick Breaker - a single-screen paddle/ball/brick arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `engine`: Simulation loop engine (lifecycle, advance, render, HUD)
//! - `driver`: Frame scheduling abstraction around the engine
//! - `input`: Held-key and pointer input state
//! - `renderer`: 2D drawing surface, viewport mapping, palette
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod driver;
pub mod engine;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{Driver, FrameHandle, FrameScheduler, ManualScheduler};
pub use engine::Engine;
pub use hud::{HudObserver, HudSnapshot};
pub use input::{InputSource, InputState, KeyAction};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Virtual field dimensions (all physics happens in this space)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Largest frame slice fed to the simulation (prevents tunneling after stalls)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    /// Distance from the paddle top to the bottom of the field
    pub const PADDLE_BOTTOM_OFFSET: f32 = 60.0;
    pub const PADDLE_SPEED: f32 = 700.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_VX: f32 = 240.0;
    pub const BALL_START_VY: f32 = -240.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_WIDTH: f32 = 64.0;
    pub const BRICK_HEIGHT: f32 = 22.0;
    pub const BRICK_GAP: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 64.0;

    /// Progression
    pub const START_LIVES: u8 = 3;
    pub const SCORE_PER_BRICK: u64 = 10;
    /// Velocity multiplier applied on every grid clear
    pub const LEVEL_SPEEDUP: f32 = 1.1;
    /// Maximum paddle deflection from straight up (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
}

/// Clamp a raw frame delta into the range the simulation accepts
///
/// Negative or non-finite deltas become zero; anything above
/// [`consts::MAX_FRAME_DT`] is capped.
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(max_dt)
}
