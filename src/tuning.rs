//! Data-driven game balance
//!
//! Every gameplay number lives here so a level designer can tweak the feel
//! from JSON without touching the simulation. `Tuning::default()` is the
//! canonical arcade layout.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Virtual field size (physics space)
    pub field_width: f32,
    pub field_height: f32,
    /// Cap on a single frame's delta time (seconds)
    pub max_frame_dt: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Paddle top sits this far above the bottom edge
    pub paddle_bottom_offset: f32,
    /// Horizontal speed while a direction key is held (px/s)
    pub paddle_speed: f32,

    pub ball_radius: f32,
    /// Velocity given to the ball on reset and after every lost life
    pub ball_start_velocity: Vec2,

    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_gap: f32,
    pub brick_offset_top: f32,

    pub start_lives: u8,
    pub score_per_brick: u64,
    pub level_speedup: f32,
    /// Paddle deflection at the very edge (radians from straight up)
    pub max_bounce_angle: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            max_frame_dt: MAX_FRAME_DT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_start_velocity: Vec2::new(BALL_START_VX, BALL_START_VY),

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_gap: BRICK_GAP,
            brick_offset_top: BRICK_OFFSET_TOP,

            start_lives: START_LIVES,
            score_per_brick: SCORE_PER_BRICK,
            level_speedup: LEVEL_SPEEDUP,
            max_bounce_angle: MAX_BOUNCE_ANGLE,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: {}x{} grid, paddle speed {}",
            tuning.brick_rows,
            tuning.brick_cols,
            tuning.paddle_speed
        );
        Ok(tuning)
    }

    /// Field size as a vector
    #[inline]
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Field center (ball spawn point)
    #[inline]
    pub fn field_center(&self) -> Vec2 {
        self.field() / 2.0
    }

    /// Total width of one brick row including inner gaps
    pub fn grid_width(&self) -> f32 {
        let cols = self.brick_cols as f32;
        cols * (self.brick_width + self.brick_gap) - self.brick_gap
    }

    /// Y of the paddle's top edge
    pub fn paddle_top(&self) -> f32 {
        self.field_height - self.paddle_bottom_offset
    }

    /// Y of the bottom edge of the last brick row
    pub fn grid_bottom(&self) -> f32 {
        let rows = self.brick_rows as f32;
        self.brick_offset_top + rows * (self.brick_height + self.brick_gap) - self.brick_gap
    }

    /// Left offset that horizontally centers the grid
    pub fn grid_offset_left(&self) -> f32 {
        (self.field_width - self.grid_width()) / 2.0
    }

    /// Reject values that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), TuningError> {
        fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be zero or a positive number",
                })
            }
        }

        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("max_frame_dt", self.max_frame_dt)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_speed", self.paddle_speed)?;
        positive("ball_radius", self.ball_radius)?;
        positive("brick_width", self.brick_width)?;
        positive("brick_height", self.brick_height)?;
        positive("level_speedup", self.level_speedup)?;
        positive("max_bounce_angle", self.max_bounce_angle)?;
        non_negative("brick_gap", self.brick_gap)?;
        non_negative("brick_offset_top", self.brick_offset_top)?;

        if self.paddle_width > self.field_width {
            return Err(TuningError::Invalid {
                field: "paddle_width",
                reason: "paddle is wider than the field",
            });
        }
        if !(self.paddle_bottom_offset.is_finite()
            && self.paddle_bottom_offset >= self.paddle_height
            && self.paddle_bottom_offset <= self.field_height)
        {
            return Err(TuningError::Invalid {
                field: "paddle_bottom_offset",
                reason: "paddle must sit inside the field",
            });
        }
        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(TuningError::Invalid {
                field: "brick_rows",
                reason: "grid must contain at least one brick",
            });
        }
        if self.grid_width() > self.field_width {
            return Err(TuningError::Invalid {
                field: "brick_cols",
                reason: "grid is wider than the field",
            });
        }
        // Room for the ball to pass between the last row and the paddle
        if self.grid_bottom() + 2.0 * self.ball_radius >= self.paddle_top() {
            return Err(TuningError::Invalid {
                field: "brick_rows",
                reason: "grid reaches down to the paddle",
            });
        }
        if self.start_lives == 0 {
            return Err(TuningError::Invalid {
                field: "start_lives",
                reason: "must start with at least one life",
            });
        }
        if self.max_bounce_angle >= std::f32::consts::FRAC_PI_2 {
            return Err(TuningError::Invalid {
                field: "max_bounce_angle",
                reason: "must be below 90 degrees",
            });
        }
        if self.ball_start_velocity.y >= 0.0 {
            return Err(TuningError::Invalid {
                field: "ball_start_velocity",
                reason: "ball must launch upward",
            });
        }
        Ok(())
    }
}
