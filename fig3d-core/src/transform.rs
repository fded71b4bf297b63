//! Model transform composition
use nalgebra::{Matrix4, Rotation3, Unit, Vector3};

/// Helpers that compose onto an existing model matrix.
///
/// Both operations post-multiply, so the new rotation or translation happens in
/// the shape's own (already transformed) frame.
pub struct Transform;

impl Transform {
    /// Create a rotation matrix around a unit axis
    pub fn rotation_matrix(axis: &Unit<Vector3<f32>>, angle: f32) -> Matrix4<f32> {
        Rotation3::from_axis_angle(axis, angle).to_homogeneous()
    }

    /// Create a translation matrix
    pub fn translation_matrix(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(offset)
    }

    pub fn rotate(model: &mut Matrix4<f32>, axis: &Unit<Vector3<f32>>, angle: f32) {
        *model *= Self::rotation_matrix(axis, angle);
    }

    pub fn translate(model: &mut Matrix4<f32>, offset: &Vector3<f32>) {
        *model *= Self::translation_matrix(offset);
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(model: &Matrix4<f32>, projection: &Matrix4<f32>) -> Matrix4<f32> {
        projection * model
    }
}
