//! 2D rendering module
//!
//! The game only needs filled rectangles and circles, so every backend sits
//! behind the small [`Surface`] trait.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod surface;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{Palette, draw_frame};
pub use surface::{Color, DrawCommand, RecordingSurface, Surface};
pub use viewport::Viewport;
