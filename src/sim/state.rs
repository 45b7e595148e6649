//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]. There are no
//! globals, so any number of independent games can run side by side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Something notable that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball reflected off the left, right or top wall
    WallBounce,
    /// Ball reflected off the paddle
    PaddleBounce,
    /// Brick at this grid index (row-major) was destroyed
    BrickDestroyed { index: usize },
    /// Ball fell past the bottom edge; `lives_left` remain
    LifeLost { lives_left: u8 },
    /// Grid cleared, now playing `level`
    LevelCleared { level: u32 },
    /// Last life lost
    GameOver { score: u64, level: u32 },
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner. `y` never changes during a session.
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed while a direction is held (px/s)
    pub speed: f32,
}

impl Paddle {
    /// Paddle centered horizontally at its fixed height
    pub fn centered(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.field_width / 2.0 - tuning.paddle_width / 2.0,
                tuning.paddle_top(),
            ),
            size: Vec2::new(tuning.paddle_width, tuning.paddle_height),
            speed: tuning.paddle_speed,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    /// Whether `x` lies within the paddle's horizontal span (inclusive)
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x >= self.pos.x && x <= self.pos.x + self.size.x
    }

    /// Keep the paddle inside `[0, field_width - width]`
    pub fn clamp_to_field(&mut self, field_width: f32) {
        self.pos.x = self.pos.x.clamp(0.0, (field_width - self.size.x).max(0.0));
    }

    /// Slide by `direction * speed * dt` (direction is -1, 0 or 1)
    pub fn slide(&mut self, direction: f32, dt: f32, field_width: f32) {
        self.pos.x += direction * self.speed * dt;
        self.clamp_to_field(field_width);
    }

    /// Center the paddle under a pointer x (virtual coordinates)
    pub fn follow_pointer(&mut self, pointer_x: f32, field_width: f32) {
        if !pointer_x.is_finite() {
            return;
        }
        self.pos.x = pointer_x - self.half_width();
        self.clamp_to_field(field_width);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the field center with the base launch velocity
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.field_center(),
            vel: tuning.ball_start_velocity,
            radius: tuning.ball_radius,
        }
    }

    /// Put the ball back at the spawn point with base velocity.
    /// Any level speed-up accumulated so far is discarded.
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = tuning.field_center();
        self.vel = tuning.ball_start_velocity;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }
}

/// A single brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub alive: bool,
}

/// Fixed rows x cols collection of bricks, stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    pub rows: usize,
    pub cols: usize,
    pub bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Build a fresh, fully alive grid
    pub fn build(tuning: &Tuning) -> Self {
        let left = tuning.grid_offset_left();
        let size = Vec2::new(tuning.brick_width, tuning.brick_height);
        let step = size + Vec2::splat(tuning.brick_gap);

        let mut bricks = Vec::with_capacity(tuning.brick_rows * tuning.brick_cols);
        for row in 0..tuning.brick_rows {
            for col in 0..tuning.brick_cols {
                bricks.push(Brick {
                    pos: Vec2::new(
                        left + col as f32 * step.x,
                        tuning.brick_offset_top + row as f32 * step.y,
                    ),
                    size,
                    alive: true,
                });
            }
        }

        Self {
            rows: tuning.brick_rows,
            cols: tuning.brick_cols,
            bricks,
        }
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// A grid is cleared once no brick is alive
    pub fn is_cleared(&self) -> bool {
        !self.bricks.iter().any(|b| b.alive)
    }

    /// Brick at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.bricks.get(row * self.cols + col)
    }

    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.alive)
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Score, +`score_per_brick` per destroyed brick
    pub score: u64,
    pub lives: u8,
    /// Current level (1-based)
    pub level: u32,
    pub running: bool,
    pub paused: bool,
    pub paddle: Paddle,
    pub ball: Ball,
    pub grid: BrickGrid,
    /// Frames advanced since the last reset
    pub frames: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Create a session in its canonical starting layout
    pub fn new(tuning: Tuning) -> Self {
        let paddle = Paddle::centered(&tuning);
        let ball = Ball::spawn(&tuning);
        let grid = BrickGrid::build(&tuning);
        Self {
            score: 0,
            lives: tuning.start_lives,
            level: 1,
            running: false,
            paused: false,
            paddle,
            ball,
            grid,
            frames: 0,
            tuning,
        }
    }

    /// Reinitialize score, lives, level, paddle, ball and grid.
    /// The running flag is left alone; only the loop owner changes it.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.tuning.start_lives;
        self.level = 1;
        self.paused = false;
        self.paddle = Paddle::centered(&self.tuning);
        self.ball = Ball::spawn(&self.tuning);
        self.grid = BrickGrid::build(&self.tuning);
        self.frames = 0;
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Rebuild the grid for the next level
    pub fn rebuild_grid(&mut self) {
        self.grid = BrickGrid::build(&self.tuning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let state = GameState::default();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert!(!state.running);
        assert!(!state.paused);
        assert_eq!(state.paddle.pos, Vec2::new(340.0, 540.0));
        assert_eq!(state.paddle.center_x(), 400.0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(240.0, -240.0));
        assert_eq!(state.grid.len(), 50);
        assert_eq!(state.grid.alive_count(), 50);
    }

    #[test]
    fn test_grid_is_row_major() {
        let grid = BrickGrid::build(&Tuning::default());
        let first = grid.get(0, 0).unwrap();
        let second = grid.get(0, 1).unwrap();
        let next_row = grid.get(1, 0).unwrap();
        assert_eq!(first.pos, Vec2::new(35.0, 64.0));
        assert_eq!(second.pos, Vec2::new(109.0, 64.0));
        assert_eq!(next_row.pos, Vec2::new(35.0, 96.0));
        assert_eq!(grid.bricks[1], *second);
        assert!(grid.get(5, 0).is_none());
        assert!(grid.get(0, 10).is_none());
    }

    #[test]
    fn test_grid_cleared() {
        let mut grid = BrickGrid::build(&Tuning::default());
        assert!(!grid.is_cleared());
        for brick in &mut grid.bricks {
            brick.alive = false;
        }
        assert!(grid.is_cleared());
        assert_eq!(grid.alive().count(), 0);
    }

    #[test]
    fn test_paddle_clamps() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::centered(&tuning);
        paddle.slide(-1.0, 10.0, tuning.field_width);
        assert_eq!(paddle.pos.x, 0.0);
        paddle.slide(1.0, 10.0, tuning.field_width);
        assert_eq!(paddle.pos.x, 680.0);
        paddle.follow_pointer(400.0, tuning.field_width);
        assert_eq!(paddle.pos.x, 340.0);
        paddle.follow_pointer(-50.0, tuning.field_width);
        assert_eq!(paddle.pos.x, 0.0);
        paddle.follow_pointer(f32::NAN, tuning.field_width);
        assert_eq!(paddle.pos.x, 0.0);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut state = GameState::default();
        state.score = 120;
        state.lives = 1;
        state.level = 4;
        state.paused = true;
        state.ball.vel *= 2.0;
        state.ball.pos = Vec2::new(10.0, 10.0);
        state.paddle.pos.x = 0.0;
        state.grid.bricks[3].alive = false;

        state.reset();

        let fresh = GameState::default();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert!(!state.paused);
        assert_eq!(state.paddle, fresh.paddle);
        assert_eq!(state.ball, fresh.ball);
        assert_eq!(state.grid, fresh.grid);
    }
}
