// src/gfx/viewport.rs
//! Window-tracking viewport state
//!
//! Holds the logical drawing size and the clamped pixel ratio that together
//! decide how large the render surface is configured. High-density displays
//! are capped at a ratio of 2 so a 3x display renders at most twice the
//! logical resolution.

use winit::dpi::PhysicalSize;

/// Upper bound on the device pixel ratio used for rendering
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Logical viewport dimensions plus the effective pixel ratio
///
/// Mutated on every window resize; all derived sizes (camera aspect, surface
/// configuration, UI display size) are read from here so they stay in step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f64,
}

impl Viewport {
    /// Creates a viewport from a physical window size and scale factor
    pub fn new(physical: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let mut viewport = Self {
            width: physical.width.max(1),
            height: physical.height.max(1),
            pixel_ratio: 1.0,
        };
        viewport.resize(physical, scale_factor);
        viewport
    }

    /// Updates the viewport from a new physical size and scale factor
    ///
    /// Zero-sized updates (minimized window) are ignored. Calling this twice
    /// with the same inputs leaves the viewport unchanged.
    pub fn resize(&mut self, physical: PhysicalSize<u32>, scale_factor: f64) {
        if physical.width == 0 || physical.height == 0 {
            return;
        }

        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        self.width = ((physical.width as f64 / scale).round() as u32).max(1);
        self.height = ((physical.height as f64 / scale).round() as u32).max(1);
        self.pixel_ratio = scale.min(MAX_PIXEL_RATIO);
    }

    /// Logical width in points
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in points
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Effective pixel ratio, never above [`MAX_PIXEL_RATIO`]
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Aspect ratio for the camera projection
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Size of the render surface in pixels
    pub fn render_size(&self) -> (u32, u32) {
        let width = ((self.width as f64 * self.pixel_ratio).round() as u32).max(1);
        let height = ((self.height as f64 * self.pixel_ratio).round() as u32).max(1);
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_is_idempotent() {
        let mut viewport = Viewport::new(PhysicalSize::new(1200, 800), 1.0);
        viewport.resize(PhysicalSize::new(1600, 900), 1.0);
        let once = viewport;

        viewport.resize(PhysicalSize::new(1600, 900), 1.0);
        assert_eq!(viewport, once);
        assert_eq!(viewport.aspect(), once.aspect());
    }

    #[test]
    fn test_pixel_ratio_below_cap_is_kept() {
        let viewport = Viewport::new(PhysicalSize::new(1500, 1000), 1.5);
        assert_eq!(viewport.pixel_ratio(), 1.5);
        assert_eq!(viewport.width(), 1000);
        assert_eq!(viewport.height(), 667);
        assert_eq!(viewport.render_size(), (1500, 1001));
    }

    #[test]
    fn test_pixel_ratio_at_cap() {
        let viewport = Viewport::new(PhysicalSize::new(2400, 1600), 2.0);
        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(viewport.render_size(), (2400, 1600));
    }

    #[test]
    fn test_pixel_ratio_clamped_above_cap() {
        // A 3x display renders at twice the logical size, not three times.
        let viewport = Viewport::new(PhysicalSize::new(3600, 2400), 3.0);
        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(viewport.width(), 1200);
        assert_eq!(viewport.height(), 800);
        assert_eq!(viewport.render_size(), (2400, 1600));
    }

    #[test]
    fn test_zero_size_is_ignored() {
        let mut viewport = Viewport::new(PhysicalSize::new(1200, 800), 1.0);
        let before = viewport;

        viewport.resize(PhysicalSize::new(0, 0), 1.0);
        assert_eq!(viewport, before);
    }

    #[test]
    fn test_aspect_tracks_logical_size() {
        let mut viewport = Viewport::new(PhysicalSize::new(1200, 800), 1.0);
        assert!((viewport.aspect() - 1.5).abs() < 1e-6);

        viewport.resize(PhysicalSize::new(800, 800), 2.0);
        assert!((viewport.aspect() - 1.0).abs() < 1e-6);
    }
}
