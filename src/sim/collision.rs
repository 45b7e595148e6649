//! Collision detection and response
//!
//! Walls, paddle and bricks are all axis-aligned, so the ball is treated as
//! its bounding square for brick hits and as a point-on-a-line for the paddle.

use glam::Vec2;

use super::state::{Ball, Brick, Paddle};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_rect(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Bounding square of a circle
    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            max: center + Vec2::splat(radius),
        }
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Which walls the ball touched this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Reflect the ball off the left, right and top walls.
///
/// The bottom edge is open. A ball that crossed a wall is pushed back inside
/// and its velocity component is pointed away from that wall, so it can never
/// stay outside for a second frame and flip back out.
pub fn resolve_walls(ball: &mut Ball, field: Vec2) -> WallHits {
    let mut hits = WallHits::default();
    let r = ball.radius;

    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x = ball.vel.x.abs();
        hits.left = true;
    } else if ball.pos.x + r > field.x {
        ball.pos.x = field.x - r;
        ball.vel.x = -ball.vel.x.abs();
        hits.right = true;
    }

    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        ball.vel.y = ball.vel.y.abs();
        hits.top = true;
    }

    hits
}

/// Ball is descending with its bottom at or below the paddle top and its
/// center inside the paddle span
#[inline]
pub fn touches_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.vel.y > 0.0 && ball.bottom() >= paddle.top() && paddle.spans(ball.pos.x)
}

/// Where along the paddle the ball struck: -1 at the left edge, 0 at the
/// center, 1 at the right edge
#[inline]
pub fn paddle_hit_offset(ball_x: f32, paddle: &Paddle) -> f32 {
    ((ball_x - paddle.center_x()) / paddle.half_width()).clamp(-1.0, 1.0)
}

/// Velocity leaving the paddle: same `speed`, angled `offset * max_angle`
/// away from straight up
pub fn bounce_velocity(speed: f32, offset: f32, max_angle: f32) -> Vec2 {
    let angle = offset * max_angle;
    Vec2::new(speed * angle.sin(), -(speed * angle.cos()).abs())
}

/// Bounce the ball off the paddle if it is touching. Returns true on a hit.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle, max_angle: f32) -> bool {
    if !touches_paddle(ball, paddle) {
        return false;
    }

    // Sit the ball on top of the paddle so it cannot tunnel or stick
    ball.pos.y = paddle.top() - ball.radius;

    let offset = paddle_hit_offset(ball.pos.x, paddle);
    ball.vel = bounce_velocity(ball.speed(), offset, max_angle);
    true
}

/// Index of the first live brick (in iteration order) overlapping the ball
pub fn first_brick_hit(ball: &Ball, bricks: &[Brick]) -> Option<usize> {
    let ball_box = Aabb::from_circle(ball.pos, ball.radius);
    bricks
        .iter()
        .position(|b| b.alive && ball_box.overlaps(&Aabb::from_rect(b.pos, b.size)))
}
