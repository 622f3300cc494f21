//! 2D camera producing the view-projection for a [`SpriteBatch`](crate::SpriteBatch).
//!
//! The camera's position is the world point shown at the center of the
//! viewport. Screen space has its origin at the top-left with y pointing down.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use vellum_sprite::Camera2D;
//!
//! let mut camera = Camera2D::new(800.0, 600.0);
//! camera.look_at(Vec2::new(1000.0, 500.0));
//!
//! let center = camera.screen_to_world(Vec2::new(400.0, 300.0));
//! assert!((center - Vec2::new(1000.0, 500.0)).length() < 1e-3);
//! ```

use glam::{Mat4, Vec2, Vec3};
use vellum_core::geometry::Size;

/// Smallest zoom factor the camera accepts.
pub const MIN_ZOOM: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    position: Vec2,
    /// Radians
    rotation: f32,
    zoom: f32,
    viewport: Size<f32>,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl Camera2D {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            zoom: 1.0,
            viewport: Size::new(viewport_width, viewport_height),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Center the view on `target`.
    pub fn look_at(&mut self, target: Vec2) {
        self.position = target;
    }

    /// Move a fraction of the way towards `target`.
    ///
    /// `smoothing` is clamped to `0.0..=1.0`; 1.0 snaps to the target.
    pub fn follow(&mut self, target: Vec2, smoothing: f32) {
        self.position += (target - self.position) * smoothing.clamp(0.0, 1.0);
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
    }

    pub fn set_rotation_degrees(&mut self, degrees: f32) {
        self.rotation = degrees.to_radians();
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor, clamped to at least [`MIN_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
    }

    pub fn viewport(&self) -> Size<f32> {
        self.viewport
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
    }

    /// World to screen-pixel transform.
    pub fn view_matrix(&self) -> Mat4 {
        let half = Vec3::new(self.viewport.width * 0.5, self.viewport.height * 0.5, 0.0);

        Mat4::from_translation(half)
            * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
            * Mat4::from_rotation_z(-self.rotation)
            * Mat4::from_translation(-self.position.extend(0.0))
    }

    /// Screen-pixel to clip-space projection (top-left origin, depth 0..1).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.viewport.width, self.viewport.height, 0.0, 0.0, 1.0)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.view_matrix()
            .inverse()
            .transform_point3(screen.extend(0.0))
            .truncate()
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.view_matrix().transform_point3(world.extend(0.0)).truncate()
    }

    /// World-space positions of the viewport's top-left and bottom-right corners.
    ///
    /// With rotation the visible region is not axis-aligned; these are the
    /// two corners only.
    pub fn world_bounds(&self) -> (Vec2, Vec2) {
        (
            self.screen_to_world(Vec2::ZERO),
            self.screen_to_world(Vec2::new(self.viewport.width, self.viewport.height)),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn test_position_maps_to_viewport_center() {
        let mut camera = Camera2D::new(800.0, 600.0);
        camera.set_position(Vec2::new(50.0, -20.0));
        assert_close(camera.world_to_screen(Vec2::new(50.0, -20.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_round_trip_with_zoom_and_rotation() {
        let mut camera = Camera2D::new(640.0, 480.0);
        camera.set_position(Vec2::new(10.0, 20.0));
        camera.set_zoom(2.5);
        camera.set_rotation(0.3);

        let world = Vec2::new(-37.0, 91.0);
        assert_close(camera.screen_to_world(camera.world_to_screen(world)), world);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera2D::default();
        camera.set_zoom(-1.0);
        assert_eq!(camera.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_world_bounds_at_zoom_two() {
        let mut camera = Camera2D::new(200.0, 100.0);
        camera.set_zoom(2.0);
        let (min, max) = camera.world_bounds();
        assert_close(min, Vec2::new(-50.0, -25.0));
        assert_close(max, Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_rotation_turns_view() {
        let mut camera = Camera2D::new(200.0, 200.0);
        camera.set_rotation(FRAC_PI_2);
        // Camera turned a quarter, so world +y appears towards screen +x.
        assert_close(camera.world_to_screen(Vec2::new(0.0, 10.0)), Vec2::new(110.0, 100.0));
    }

    #[test]
    fn test_view_projection_maps_viewport_to_clip() {
        let camera = Camera2D::new(800.0, 600.0);
        let clip = camera
            .view_projection()
            .transform_point3(Vec3::new(-400.0, -300.0, 0.0));
        assert_close(clip.truncate(), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_follow_moves_fractionally() {
        let mut camera = Camera2D::default();
        camera.follow(Vec2::new(100.0, 0.0), 0.25);
        assert_close(camera.position(), Vec2::new(25.0, 0.0));
        camera.follow(Vec2::new(100.0, 0.0), 5.0);
        assert_close(camera.position(), Vec2::new(100.0, 0.0));
    }
}
