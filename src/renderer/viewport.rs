//! Mapping between the fixed virtual field and physical canvas pixels
//!
//! The canvas backing store is `css size * device pixel ratio`; the draw
//! transform stretches the virtual field over it. Recompute on every resize.

use glam::Vec2;

/// Current virtual -> physical mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Virtual field size (physics space)
    pub virtual_size: Vec2,
    /// Element size in CSS pixels
    pub css_size: Vec2,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    /// Viewport where one virtual unit is one physical pixel
    pub fn new(virtual_size: Vec2) -> Self {
        Self {
            virtual_size,
            css_size: virtual_size,
            device_pixel_ratio: 1.0,
        }
    }

    /// Apply a resize notification. Degenerate sizes are ignored and the
    /// previous mapping kept. Returns true if anything changed.
    pub fn resize(&mut self, css_width: f32, css_height: f32, device_pixel_ratio: f32) -> bool {
        if !(css_width.is_finite() && css_height.is_finite())
            || css_width <= 0.0
            || css_height <= 0.0
        {
            log::warn!("Ignoring resize to {}x{}", css_width, css_height);
            return false;
        }
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };

        let css_size = Vec2::new(css_width, css_height);
        if css_size == self.css_size && dpr == self.device_pixel_ratio {
            return false;
        }
        self.css_size = css_size;
        self.device_pixel_ratio = dpr;
        log::info!(
            "Viewport resized: {}x{} css @ {}x -> {:?} px",
            css_width,
            css_height,
            dpr,
            self.physical_size()
        );
        true
    }

    /// Backing-store size in physical pixels
    pub fn physical_size(&self) -> (u32, u32) {
        let px = self.css_size * self.device_pixel_ratio;
        (px.x.round() as u32, px.y.round() as u32)
    }

    /// Scale that maps virtual units to physical pixels
    pub fn scale(&self) -> Vec2 {
        let (w, h) = self.physical_size();
        Vec2::new(w as f32, h as f32) / self.virtual_size
    }

    /// Convert a point relative to the element's top-left corner (CSS
    /// pixels) into virtual field coordinates
    pub fn to_virtual(&self, css_offset: Vec2) -> Vec2 {
        css_offset * self.device_pixel_ratio / self.scale()
    }

    /// Pointer x from a client-space event, given the element's left edge
    pub fn pointer_x(&self, client_x: f32, element_left: f32) -> f32 {
        self.to_virtual(Vec2::new(client_x - element_left, 0.0)).x
    }
}
