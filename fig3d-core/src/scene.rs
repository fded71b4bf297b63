//! The set of shapes drawn each frame
use std::time::Instant;

use anyhow::{anyhow, Result};
use nalgebra::{Matrix4, Unit};
use tracing::info;

use crate::config::SceneConfig;
use crate::geometry::Geometry;
use crate::projection::Projection;
use crate::shape::Shape;

/// Shapes in draw order plus the projection they share
#[derive(Debug, Clone)]
pub struct Scene {
    pub shapes: Vec<Shape>,
    pub projection: Matrix4<f32>,
}

impl Scene {
    pub fn new(shapes: Vec<Shape>, projection: &Projection) -> Self {
        Self {
            shapes,
            projection: projection.matrix(),
        }
    }

    /// Build every configured shape, stamped with `now` as its last update
    pub fn from_config(config: &SceneConfig, aspect: f32, now: Instant) -> Result<Self> {
        let projection = Projection::new(&config.projection, aspect);

        let mut shapes = Vec::with_capacity(config.shapes.len());
        for placement in &config.shapes {
            let axis = Unit::try_new(placement.rotation_axis, 1e-6).ok_or_else(|| {
                anyhow!("{} has a zero rotation axis", placement.kind.name())
            })?;

            let geometry = Geometry::build(placement.kind);
            info!(
                shape = placement.kind.name(),
                vertices = geometry.vertex_count(),
                triangles = geometry.triangle_count(),
                "Built shape"
            );

            let mut shape = Shape::new(geometry, &placement.translation, axis, now);
            if let Some(oscillation) = placement.oscillation {
                shape = shape.with_oscillation(oscillation.into());
            }
            shapes.push(shape);
        }

        Ok(Self::new(shapes, &projection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ShapeKind;
    use nalgebra::Vector3;

    #[test]
    fn test_default_scene() {
        let now = Instant::now();
        let scene = Scene::from_config(&SceneConfig::default(), 1.5, now).unwrap();

        let kinds: Vec<ShapeKind> = scene.shapes.iter().map(|s| s.geometry.kind).collect();
        assert_eq!(kinds, ShapeKind::ALL);
        assert!(scene.shapes.iter().all(|s| s.last_update == now));

        // Only the octahedron oscillates
        assert!(scene.shapes[0].oscillation.is_some());
        assert!(scene.shapes[1].oscillation.is_none());
        assert!(scene.shapes[2].oscillation.is_none());
    }

    #[test]
    fn test_projection_is_shared() {
        let config = SceneConfig::default();
        let scene = Scene::from_config(&config, 2.0, Instant::now()).unwrap();
        assert_eq!(scene.projection, Projection::new(&config.projection, 2.0).matrix());
    }

    #[test]
    fn test_axis_is_normalized() {
        let scene = Scene::from_config(&SceneConfig::default(), 1.0, Instant::now()).unwrap();
        let axis = scene.shapes[0].rotation_axis;
        assert!((axis.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_axis_is_rejected() {
        let mut config = SceneConfig::default();
        config.shapes[1].rotation_axis = Vector3::zeros();
        let err = Scene::from_config(&config, 1.0, Instant::now()).unwrap_err();
        assert!(err.to_string().contains("scutoid"));
    }
}
