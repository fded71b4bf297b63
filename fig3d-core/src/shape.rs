//! Animated shape instances
use std::time::{Duration, Instant};

use nalgebra::{Matrix4, Unit, Vector3};

use crate::config::OscillationConfig;
use crate::geometry::Geometry;
use crate::transform::Transform;

/// Back-and-forth translation state of a shape
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillation {
    pub primary: Vector3<f32>,
    pub alternate: Vector3<f32>,
    /// Time spent moving in the current direction
    pub run_timer: Duration,
    /// `true` while stepping along `primary`
    pub up: bool,
}

impl Oscillation {
    pub fn new(primary: Vector3<f32>, alternate: Vector3<f32>) -> Self {
        Self {
            primary,
            alternate,
            run_timer: Duration::ZERO,
            up: true,
        }
    }

    /// Translation applied on the next update
    pub fn step(&self) -> &Vector3<f32> {
        if self.up {
            &self.primary
        } else {
            &self.alternate
        }
    }
}

impl From<OscillationConfig> for Oscillation {
    fn from(config: OscillationConfig) -> Self {
        Self::new(config.primary, config.alternate)
    }
}

/// A solid placed in the scene together with its animation state
#[derive(Debug, Clone)]
pub struct Shape {
    pub geometry: Geometry,
    pub model: Matrix4<f32>,
    pub rotation_axis: Unit<Vector3<f32>>,
    pub oscillation: Option<Oscillation>,
    pub last_update: Instant,
}

impl Shape {
    pub fn new(
        geometry: Geometry,
        translation: &Vector3<f32>,
        rotation_axis: Unit<Vector3<f32>>,
        now: Instant,
    ) -> Self {
        Self {
            geometry,
            model: Transform::translation_matrix(translation),
            rotation_axis,
            oscillation: None,
            last_update: now,
        }
    }

    pub fn with_oscillation(mut self, oscillation: Oscillation) -> Self {
        self.oscillation = Some(oscillation);
        self
    }
}
