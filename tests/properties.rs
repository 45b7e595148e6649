//! Invariants that must hold for any input sequence

use brick_breaker::consts::*;
use brick_breaker::sim::{self, GameEvent, GameState, TickInput, bounce_velocity, resolve_paddle};
use brick_breaker::{Engine, KeyAction};
use glam::Vec2;
use proptest::prelude::*;

/// One frame of player input: held left, held right, optional pointer, dt
fn frame_input() -> impl Strategy<Value = (bool, bool, Option<f32>, f32)> {
    (
        any::<bool>(),
        any::<bool>(),
        prop::option::of(-300.0f32..1100.0),
        0.0f32..0.2,
    )
}

fn apply(engine: &mut Engine, (left, right, pointer, _): &(bool, bool, Option<f32>, f32)) {
    let input = engine.input_mut();
    if *left {
        input.key_down(KeyAction::MoveLeft);
    } else {
        input.key_up(KeyAction::MoveLeft);
    }
    if *right {
        input.key_down(KeyAction::MoveRight);
    } else {
        input.key_up(KeyAction::MoveRight);
    }
    if let Some(x) = pointer {
        input.pointer_moved(*x);
    }
}

proptest! {
    #[test]
    fn paddle_stays_in_field(frames in prop::collection::vec(frame_input(), 1..400)) {
        let mut engine: Engine = Engine::default();
        engine.start();
        for frame in &frames {
            apply(&mut engine, frame);
            engine.advance(frame.3);
            let x = engine.state().paddle.pos.x;
            prop_assert!(x >= 0.0);
            prop_assert!(x <= FIELD_WIDTH - PADDLE_WIDTH);
        }
    }

    #[test]
    fn ball_stays_inside_walls(frames in prop::collection::vec(frame_input(), 1..400)) {
        let mut engine: Engine = Engine::default();
        engine.start();
        for frame in &frames {
            apply(&mut engine, frame);
            engine.advance(frame.3);
            let ball = &engine.state().ball;
            prop_assert!(ball.pos.x - ball.radius >= 0.0);
            prop_assert!(ball.pos.x + ball.radius <= FIELD_WIDTH);
            prop_assert!(ball.pos.y - ball.radius >= 0.0);
        }
    }

    #[test]
    fn score_moves_by_one_brick_at_most(frames in prop::collection::vec(frame_input(), 1..600)) {
        let mut engine: Engine = Engine::default();
        engine.start();
        for frame in &frames {
            let before = engine.state().score;
            apply(&mut engine, frame);
            let events = engine.advance(frame.3);
            let destroyed = events
                .iter()
                .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
                .count() as u64;
            prop_assert!(destroyed <= 1);
            prop_assert_eq!(engine.state().score - before, destroyed * SCORE_PER_BRICK);
        }
    }

    #[test]
    fn paddle_bounce_conserves_speed(
        offset in -1.0f32..=1.0,
        vx in -400.0f32..400.0,
        vy in 50.0f32..400.0,
    ) {
        let state = GameState::default();
        let paddle = &state.paddle;
        let mut ball = state.ball.clone();
        ball.pos = Vec2::new(paddle.center_x() + offset * paddle.half_width(), paddle.top() + 2.0);
        ball.vel = Vec2::new(vx, vy);
        let speed = ball.speed();

        prop_assert!(resolve_paddle(&mut ball, paddle, MAX_BOUNCE_ANGLE));
        prop_assert!((ball.speed() - speed).abs() <= speed * 1e-4);
        prop_assert!(ball.vel.y <= 0.0);

        let angle = ball.vel.x.atan2(-ball.vel.y);
        prop_assert!((angle - offset * MAX_BOUNCE_ANGLE).abs() < 1e-3);
        prop_assert!(angle.abs() <= MAX_BOUNCE_ANGLE + 1e-4);
    }

    #[test]
    fn bounce_velocity_is_upward(speed in 1.0f32..1000.0, offset in -1.0f32..=1.0) {
        let v = bounce_velocity(speed, offset, MAX_BOUNCE_ANGLE);
        prop_assert!(v.y < 0.0);
        prop_assert!((v.length() - speed).abs() <= speed * 1e-4);
    }

    #[test]
    fn clearing_grid_in_any_order_levels_up_once(
        order in Just((0..BRICK_ROWS * BRICK_COLS).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let mut state = GameState::default();
        let mut level_ups = 0;

        for (n, &index) in order.iter().enumerate() {
            let brick = state.grid.bricks[index].clone();
            prop_assert!(brick.alive);
            state.ball.pos = brick.pos + brick.size / 2.0;
            state.ball.vel = Vec2::ZERO;

            let events = sim::advance(&mut state, &TickInput::default(), 0.0);
            let destroyed = events.contains(&GameEvent::BrickDestroyed { index });
            prop_assert!(destroyed, "brick {} was not destroyed", index);
            level_ups += events
                .iter()
                .filter(|e| matches!(e, GameEvent::LevelCleared { .. }))
                .count();

            if n + 1 < order.len() {
                prop_assert_eq!(state.grid.alive_count(), order.len() - n - 1);
            }
        }

        prop_assert_eq!(level_ups, 1);
        prop_assert_eq!(state.level, 2);
        prop_assert_eq!(state.grid.alive_count(), BRICK_ROWS * BRICK_COLS);
        prop_assert_eq!(state.score, (BRICK_ROWS * BRICK_COLS) as u64 * SCORE_PER_BRICK);
    }
}
