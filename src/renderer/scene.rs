//! Frame drawing
//!
//! Turns a [`GameState`] into draw calls: background, live bricks, paddle,
//! ball. Reads state only.

use super::surface::{Color, Surface};
use crate::sim::GameState;

/// Colours for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub brick: Color,
    pub paddle: Color,
    pub ball: Color,
}

pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::hex(0x041728);
    pub const BRICK: Color = Color::hex(0x3dd6a7);
    pub const PADDLE: Color = Color::hex(0xffffff);
    pub const BALL: Color = Color::hex(0xffffff);

    pub const HC_BACKGROUND: Color = Color::hex(0x000000);
    pub const HC_BRICK: Color = Color::hex(0xffd400);
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

impl Palette {
    pub const fn standard() -> Self {
        Self {
            background: colors::BACKGROUND,
            brick: colors::BRICK,
            paddle: colors::PADDLE,
            ball: colors::BALL,
        }
    }

    pub const fn high_contrast() -> Self {
        Self {
            background: colors::HC_BACKGROUND,
            brick: colors::HC_BRICK,
            paddle: colors::PADDLE,
            ball: colors::BALL,
        }
    }
}

/// Issue the full redraw for one frame
pub fn draw_frame(state: &GameState, palette: &Palette, surface: &mut dyn Surface) {
    let field = state.tuning.field();

    surface.clear(field);
    surface.fill_rect(glam::Vec2::ZERO, field, palette.background);

    for brick in state.grid.alive() {
        surface.fill_rect(brick.pos, brick.size, palette.brick);
    }

    surface.fill_rect(state.paddle.pos, state.paddle.size, palette.paddle);
    surface.fill_circle(state.ball.pos, state.ball.radius, palette.ball);
}
