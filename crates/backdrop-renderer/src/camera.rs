//! Perspective camera looking down -Z at the backdrop

use backdrop_core::CameraParams;
use glam::{Mat4, Vec3};

/// Fixed camera on the +Z axis
pub struct Camera {
    pub distance: f32,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32, params: &CameraParams) -> Self {
        let aspect = if width > 0 && height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };

        Self {
            distance: params.distance,
            aspect,
            fovy: params.fov_degrees.to_radians(),
            znear: params.near,
            zfar: params.far,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    /// Zero-sized windows keep the previous aspect
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_defaults() {
        let camera = Camera::new(1920, 1080, &CameraParams::default());

        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 4.0));
        assert!((camera.fovy - 60.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.znear, 0.1);
        assert_eq!(camera.zfar, 100.0);
    }

    #[test]
    fn test_resize_ignores_zero() {
        let mut camera = Camera::new(800, 600, &CameraParams::default());
        camera.resize(0, 0);
        assert_eq!(camera.aspect, 800.0 / 600.0);
        camera.resize(1000, 500);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::new(1280, 720, &CameraParams::default());
        let clip = camera.build_view_projection_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;

        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_screen_edge_matches_world_width() {
        // A point at half the visible world width lands on the right edge.
        let camera = Camera::new(1920, 1080, &CameraParams::default());
        let world_height = 2.0 * (camera.fovy / 2.0).tan() * camera.distance;
        let half_width = world_height * camera.aspect / 2.0;

        let clip = camera.build_view_projection_matrix() * Vec4::new(half_width, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w - 1.0).abs() < 1e-4);
    }
}
