//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only arrives through `advance`'s `dt`
//! - Stable iteration order (bricks are row-major)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, WallHits, bounce_velocity, first_brick_hit, resolve_paddle, resolve_walls};
pub use state::{Ball, Brick, BrickGrid, GameEvent, GameState, Paddle};
pub use tick::{TickInput, advance};
