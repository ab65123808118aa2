//! Orthographic camera for 2D simulations

use glam::{Mat4, Vec2, Vec3};

/// 2D orthographic camera
///
/// `zoom` is the half-height of the visible region in world units.
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub position: Vec3,
    pub zoom: f32,
    pub aspect_ratio: f32,
}

impl Camera2D {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            zoom: 1.0,
            aspect_ratio,
        }
    }

    /// Camera that shows exactly the rectangle `[0, width] x [0, height]`,
    /// so one world unit maps to one pixel of a surface of that size.
    pub fn framing(width: f32, height: f32) -> Self {
        let height = height.max(1.0);
        Self {
            position: Vec3::new(width * 0.5, height * 0.5, 0.0),
            zoom: height * 0.5,
            aspect_ratio: width.max(1.0) / height,
        }
    }

    /// Get the view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        let half_width = self.zoom * self.aspect_ratio;
        let half_height = self.zoom;

        let projection = Mat4::orthographic_rh(
            -half_width,
            half_width,
            -half_height,
            half_height,
            -1.0,
            1.0,
        );

        let view = Mat4::from_translation(-self.position);

        projection * view
    }

    /// Move the camera by a fraction of the visible half-height
    pub fn pan(&mut self, direction: Vec2) {
        self.position += (direction * self.zoom * 0.1).extend(0.0);
    }

    /// Convert a cursor position (pixels, origin top-left) to world coordinates
    pub fn screen_to_world(&self, screen: Vec2, viewport: Vec2) -> Vec2 {
        let ndc = Vec2::new(
            (screen.x / viewport.x) * 2.0 - 1.0,
            1.0 - (screen.y / viewport.y) * 2.0,
        );
        Vec2::new(
            self.position.x + ndc.x * self.zoom * self.aspect_ratio,
            self.position.y + ndc.y * self.zoom,
        )
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera_2d(camera: &Camera2D) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_maps_surface_corners_to_clip_corners() {
        let camera = Camera2D::framing(800.0, 600.0);
        let vp = camera.view_projection();

        let top_right = vp.project_point3(Vec3::new(800.0, 600.0, 0.0));
        let bottom_left = vp.project_point3(Vec3::new(0.0, 0.0, 0.0));

        assert!((top_right.x - 1.0).abs() < 1e-5);
        assert!((top_right.y - 1.0).abs() < 1e-5);
        assert!((bottom_left.x + 1.0).abs() < 1e-5);
        assert!((bottom_left.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn cursor_maps_back_onto_the_framed_surface() {
        let camera = Camera2D::framing(800.0, 600.0);
        let viewport = Vec2::new(800.0, 600.0);

        let centre = camera.screen_to_world(Vec2::new(400.0, 300.0), viewport);
        assert!((centre - Vec2::new(400.0, 300.0)).length() < 1e-4);

        // screen y grows downward, world y grows upward
        let top_left = camera.screen_to_world(Vec2::ZERO, viewport);
        assert!((top_left - Vec2::new(0.0, 600.0)).length() < 1e-4);
    }

    #[test]
    fn screen_to_world_follows_pan_and_zoom() {
        let mut camera = Camera2D::framing(800.0, 600.0);
        camera.zoom *= 0.5;
        camera.pan(Vec2::X);
        let viewport = Vec2::new(800.0, 600.0);

        let right_edge = camera.screen_to_world(Vec2::new(800.0, 300.0), viewport);
        let expected_x = camera.position.x + camera.zoom * camera.aspect_ratio;
        assert!((right_edge.x - expected_x).abs() < 1e-3);
        assert!((right_edge.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn pan_scales_with_zoom() {
        let mut camera = Camera2D::new(1.0);
        camera.zoom = 50.0;
        camera.pan(Vec2::X);
        assert!((camera.position.x - 5.0).abs() < 1e-6);
        assert_eq!(camera.position.y, 0.0);
    }
}
