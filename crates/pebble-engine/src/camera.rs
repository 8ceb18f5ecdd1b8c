//! 2D camera with pure screen/world mapping
//!
//! The camera position is the world point at the viewport center. Tools
//! receive world coordinates already converted through these functions.

use pebble_core::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new(position: Vec2, zoom: f32) -> Self {
        Self { position, zoom }
    }

    /// Convert a screen-pixel point into world coordinates
    pub fn screen_to_world(&self, screen: Vec2, viewport: Vec2) -> Vec2 {
        let centered = screen - viewport * 0.5;
        self.position + centered * (1.0 / self.zoom)
    }

    /// Convert a world point into screen pixels
    pub fn world_to_screen(&self, world: Vec2, viewport: Vec2) -> Vec2 {
        (world - self.position) * self.zoom + viewport * 0.5
    }

    /// A screen-pixel length expressed in world units (widget hit radii)
    pub fn screen_to_world_len(&self, pixels: f32) -> f32 {
        pixels / self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn center_of_screen_is_camera_position() {
        let camera = Camera::new(Vec2::new(100.0, 50.0), 2.0);
        let world = camera.screen_to_world(Vec2::new(640.0, 360.0), VIEWPORT);
        assert_eq!(world, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn round_trip_is_identity() {
        let camera = Camera::new(Vec2::new(-30.0, 220.0), 1.5);
        let screen = Vec2::new(200.0, 500.0);
        let back = camera.world_to_screen(camera.screen_to_world(screen, VIEWPORT), VIEWPORT);
        assert!((back.x - screen.x).abs() < 1e-3);
        assert!((back.y - screen.y).abs() < 1e-3);
    }

    #[test]
    fn zoom_scales_world_distances() {
        let camera = Camera::new(Vec2::ZERO, 2.0);
        let a = camera.screen_to_world(Vec2::new(640.0, 360.0), VIEWPORT);
        let b = camera.screen_to_world(Vec2::new(740.0, 360.0), VIEWPORT);
        // 100 screen pixels at 2x zoom span 50 world units
        assert!((b.x - a.x - 50.0).abs() < 1e-3);
        assert_eq!(camera.screen_to_world_len(100.0), 50.0);
    }
}
