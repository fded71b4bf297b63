//! Startup configuration for the scene
use std::time::Duration;

use nalgebra::Vector3;

use crate::geometry::ShapeKind;

/// One full turn takes this long
pub const ANIMATION_PERIOD: Duration = Duration::from_millis(8000);

/// The oscillating shape reverses after travelling this long in one direction
pub const DIRECTION_FLIP_AFTER: Duration = Duration::from_millis(4300);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub camera_offset: Vector3<f32>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov: std::f32::consts::PI / 32.0,
            near: 1.0,
            far: 10000.0,
            camera_offset: Vector3::new(0.0, 0.0, -40.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub period: Duration,
    pub flip_after: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            period: ANIMATION_PERIOD,
            flip_after: DIRECTION_FLIP_AFTER,
        }
    }
}

/// Per-update translation steps of an oscillating shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillationConfig {
    pub primary: Vector3<f32>,
    pub alternate: Vector3<f32>,
}

/// Where a shape starts and how it moves
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePlacement {
    pub kind: ShapeKind,
    pub translation: Vector3<f32>,
    /// Need not be normalized, but must not be zero
    pub rotation_axis: Vector3<f32>,
    pub oscillation: Option<OscillationConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub projection: ProjectionConfig,
    pub animation: AnimationConfig,
    pub shapes: Vec<ShapePlacement>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            animation: AnimationConfig::default(),
            shapes: vec![
                ShapePlacement {
                    kind: ShapeKind::Octahedron,
                    translation: Vector3::new(-3.2, 0.0, -20.0),
                    rotation_axis: Vector3::new(1.0, 1.0, 0.0),
                    oscillation: Some(OscillationConfig {
                        primary: Vector3::new(0.0, 0.015, 0.0),
                        alternate: Vector3::new(0.0, -0.015, 0.0),
                    }),
                },
                ShapePlacement {
                    kind: ShapeKind::Scutoid,
                    translation: Vector3::new(0.0, 0.0, -20.0),
                    rotation_axis: Vector3::new(0.0, 1.0, 0.0),
                    oscillation: None,
                },
                ShapePlacement {
                    kind: ShapeKind::Pyramid,
                    translation: Vector3::new(3.2, 0.0, -20.0),
                    rotation_axis: Vector3::new(0.2, 1.0, 0.0),
                    oscillation: None,
                },
            ],
        }
    }
}
