//! Projection transform and screen mapping
use nalgebra::{Matrix4, Point3, Vector3};

use crate::config::ProjectionConfig;

/// Perspective projection with a fixed camera offset folded in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub camera_offset: Vector3<f32>,
}

impl Projection {
    pub fn new(config: &ProjectionConfig, aspect: f32) -> Self {
        Self {
            fov: config.fov,
            aspect,
            near: config.near,
            far: config.far,
            camera_offset: config.camera_offset,
        }
    }

    /// Create the projection matrix. The camera offset is applied before the
    /// perspective divide, so shapes only carry their own placement.
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            * Matrix4::new_translation(&self.camera_offset)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(&ProjectionConfig::default(), 800.0 / 600.0)
    }
}

/// Project an object-space point to screen space.
///
/// Returns `(x, y, depth)` with `x`/`y` in pixels (y grows downwards) and depth
/// in normalized device coordinates, or `None` when the point is behind the
/// camera.
pub fn project_to_screen(
    mvp: &Matrix4<f32>,
    point: &Point3<f32>,
    width: u32,
    height: u32,
) -> Option<Point3<f32>> {
    let clip = mvp * point.to_homogeneous();

    // Prevent division by near-zero w values
    if clip.w < 1e-6 {
        return None;
    }

    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let depth = clip.z / clip.w;

    // Convert to screen space
    let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

    Some(Point3::new(screen_x, screen_y, depth))
}
