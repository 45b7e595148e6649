//! Per-frame simulation step
//!
//! Advances the game state by a variable wall-clock slice. The caller is
//! responsible for clamping `dt`; see [`crate::clamp_dt`].

use super::collision::{first_brick_hit, resolve_paddle, resolve_walls};
use super::state::{GameEvent, GameState};

/// Input read once at the start of a frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Move-left held
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Pointer moved to this x (virtual coordinates) since the last frame
    pub pointer_x: Option<f32>,
}

impl TickInput {
    /// Net horizontal direction from held keys (-1, 0 or 1)
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by `dt` seconds and report what happened.
///
/// Order: paddle, ball translation, walls, paddle bounce, one brick,
/// ball drop, grid clear. A lost last life returns immediately.
pub fn advance(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_game_over() {
        return events;
    }

    let field = state.tuning.field();
    state.frames += 1;

    // Paddle: pointer first (absolute), then held keys on top
    if let Some(x) = input.pointer_x {
        state.paddle.follow_pointer(x, field.x);
    }
    state.paddle.slide(input.direction(), dt, field.x);

    // Ball translation
    state.ball.pos += state.ball.vel * dt;

    if resolve_walls(&mut state.ball, field).any() {
        events.push(GameEvent::WallBounce);
    }

    if resolve_paddle(
        &mut state.ball,
        &state.paddle,
        state.tuning.max_bounce_angle,
    ) {
        events.push(GameEvent::PaddleBounce);
    }

    // At most one brick per frame, first in row-major order
    if let Some(index) = first_brick_hit(&state.ball, &state.grid.bricks) {
        state.grid.bricks[index].alive = false;
        state.score += state.tuning.score_per_brick;
        state.ball.vel.y = -state.ball.vel.y;
        events.push(GameEvent::BrickDestroyed { index });
    }

    // Ball drop
    if state.ball.top() > field.y {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });

        if state.is_game_over() {
            state.running = false;
            events.push(GameEvent::GameOver {
                score: state.score,
                level: state.level,
            });
            return events;
        }

        state.ball.respawn(&state.tuning);
    }

    if state.grid.is_cleared() {
        state.level += 1;
        state.ball.vel *= state.tuning.level_speedup;
        state.rebuild_grid();
        events.push(GameEvent::LevelCleared { level: state.level });
    }

    events
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;

    const DT: f32 = 1.0 / 60.0;

    /// Park the ball where nothing can touch it
    fn idle_ball(state: &mut GameState) {
        state.ball.pos = Vec2::new(400.0, 400.0);
        state.ball.vel = Vec2::ZERO;
    }

    #[test]
    fn test_paddle_moves_with_held_keys() {
        let mut state = GameState::default();
        idle_ball(&mut state);
        let start = state.paddle.pos.x;

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        advance(&mut state, &input, 0.01);
        assert!((state.paddle.pos.x - (start + 7.0)).abs() < 1e-3);

        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        let before = state.paddle.pos.x;
        advance(&mut state, &both, 0.01);
        assert_eq!(state.paddle.pos.x, before);
    }

    #[test]
    fn test_pointer_centers_paddle() {
        let mut state = GameState::default();
        idle_ball(&mut state);
        let input = TickInput {
            pointer_x: Some(100.0),
            ..Default::default()
        };
        advance(&mut state, &input, DT);
        assert_eq!(state.paddle.pos.x, 40.0);

        let input = TickInput {
            pointer_x: Some(10_000.0),
            ..Default::default()
        };
        advance(&mut state, &input, DT);
        assert_eq!(state.paddle.pos.x, FIELD_WIDTH - PADDLE_WIDTH);
    }

    #[test]
    fn test_ball_translates() {
        let mut state = GameState::default();
        advance(&mut state, &TickInput::default(), 0.01);
        assert!((state.ball.pos.x - 402.4).abs() < 1e-3);
        assert!((state.ball.pos.y - 297.6).abs() < 1e-3);
        assert_eq!(state.frames, 1);
    }

    #[test]
    fn test_brick_hit_scores_and_reflects() {
        let mut state = GameState::default();
        let target = state.grid.get(4, 0).unwrap().clone();
        // Just below the bottom row, moving up into it
        state.ball.pos = Vec2::new(
            target.pos.x + target.size.x / 2.0,
            target.pos.y + target.size.y + 9.0,
        );
        state.ball.vel = Vec2::new(0.0, -240.0);

        let events = advance(&mut state, &TickInput::default(), DT);

        assert_eq!(state.score, SCORE_PER_BRICK);
        assert!(!state.grid.get(4, 0).unwrap().alive);
        assert_eq!(state.grid.alive_count(), 49);
        assert_eq!(state.ball.vel.y, 240.0);
        assert!(events.contains(&GameEvent::BrickDestroyed { index: 40 }));
    }

    #[test]
    fn test_only_one_brick_per_frame() {
        let mut state = GameState::default();
        // Ball straddling the gap between (0,0) and (0,1)
        let a = state.grid.get(0, 0).unwrap().clone();
        state.ball.pos = Vec2::new(a.pos.x + a.size.x + 5.0, a.pos.y + 11.0);
        state.ball.vel = Vec2::ZERO;

        let events = advance(&mut state, &TickInput::default(), DT);

        assert_eq!(state.score, 10);
        assert_eq!(state.grid.alive_count(), 49);
        assert!(!state.grid.get(0, 0).unwrap().alive);
        assert!(state.grid.get(0, 1).unwrap().alive);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
                .count(),
            1
        );

        // The neighbour goes on the next frame
        advance(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 20);
        assert!(!state.grid.get(0, 1).unwrap().alive);
    }

    #[test]
    fn test_drop_respawns_at_base_velocity() {
        let mut state = GameState::default();
        state.level = 3;
        state.ball.pos = Vec2::new(100.0, FIELD_HEIGHT + 15.0);
        state.ball.vel = Vec2::new(300.0, 400.0);

        let events = advance(&mut state, &TickInput::default(), DT);

        assert_eq!(state.lives, 2);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(BALL_START_VX, BALL_START_VY));
        assert!(events.contains(&GameEvent::LifeLost { lives_left: 2 }));
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = GameState::default();
        state.running = true;
        state.lives = 1;
        state.score = 70;
        state.ball.pos = Vec2::new(100.0, FIELD_HEIGHT + 15.0);
        state.ball.vel = Vec2::new(0.0, 240.0);

        let events = advance(&mut state, &TickInput::default(), DT);

        assert_eq!(state.lives, 0);
        assert!(!state.running);
        assert!(state.is_game_over());
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                score: 70,
                level: 1
            })
        );

        // Nothing moves after game over
        let frozen = state.ball.pos;
        let events = advance(&mut state, &TickInput::default(), DT);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, frozen);
    }

    #[test]
    fn test_level_clear_speeds_up_and_rebuilds() {
        let mut state = GameState::default();
        for brick in state.grid.bricks.iter_mut().skip(1) {
            brick.alive = false;
        }
        let last = state.grid.bricks[0].clone();
        state.ball.pos = Vec2::new(last.pos.x + 10.0, last.pos.y + last.size.y + 9.0);
        state.ball.vel = Vec2::new(0.0, -200.0);

        let events = advance(&mut state, &TickInput::default(), DT);

        assert_eq!(state.level, 2);
        assert_eq!(state.grid.alive_count(), 50);
        // Reflected by the brick, then sped up
        assert!((state.ball.vel.y - 220.0).abs() < 1e-3);
        assert!(events.contains(&GameEvent::LevelCleared { level: 2 }));
    }
}
