//! Per-frame transform animation
use std::f32::consts::TAU;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::AnimationConfig;
use crate::shape::Shape;
use crate::transform::Transform;

/// Advances shape transforms from wall-clock time.
///
/// The animator holds no per-shape state; everything it mutates lives on the
/// [`Shape`] passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Animator {
    config: AnimationConfig,
}

impl Animator {
    pub fn new(config: AnimationConfig) -> Self {
        Self { config }
    }

    /// Rotation covered in `elapsed`, in radians
    pub fn rotation_angle(&self, elapsed: Duration) -> f32 {
        let fraction = elapsed.as_secs_f64() / self.config.period.as_secs_f64();
        (f64::from(TAU) * fraction) as f32
    }

    /// Move `shape` forward to `now`.
    ///
    /// The rotation is composed onto the existing model transform. Shapes with
    /// an oscillation then take one translation step and reverse direction
    /// once their run timer reaches the flip threshold. Elapsed time is not
    /// clamped, so a long stall yields one large catch-up rotation.
    pub fn update(&self, shape: &mut Shape, now: Instant) {
        let elapsed = now.saturating_duration_since(shape.last_update);
        if elapsed.is_zero() {
            return;
        }
        shape.last_update = now;

        let angle = self.rotation_angle(elapsed);
        Transform::rotate(&mut shape.model, &shape.rotation_axis, angle);

        let Some(oscillation) = shape.oscillation.as_mut() else {
            return;
        };

        oscillation.run_timer += elapsed;
        Transform::translate(&mut shape.model, oscillation.step());

        if oscillation.run_timer >= self.config.flip_after {
            oscillation.up = !oscillation.up;
            oscillation.run_timer = Duration::ZERO;
            debug!(
                shape = shape.geometry.kind.name(),
                up = oscillation.up,
                "Reversed translation"
            );
        }
        trace!(
            run_timer_ms = oscillation.run_timer.as_millis() as u64,
            up = oscillation.up,
            "Oscillation step"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, ShapeKind};
    use crate::shape::Oscillation;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};
    use std::f32::consts::PI;

    fn spinning(kind: ShapeKind, start: Instant) -> Shape {
        Shape::new(
            Geometry::build(kind),
            &Vector3::new(0.0, 0.0, -5.0),
            Vector3::y_axis(),
            start,
        )
    }

    fn oscillating(start: Instant) -> Shape {
        spinning(ShapeKind::Octahedron, start).with_oscillation(Oscillation::new(
            Vector3::new(0.0, 0.1, 0.0),
            Vector3::new(0.0, -0.1, 0.0),
        ))
    }

    #[test]
    fn test_rotation_angle() {
        let animator = Animator::default();
        let angle = |ms| animator.rotation_angle(Duration::from_millis(ms));
        assert_relative_eq!(angle(8000), 2.0 * PI, epsilon = 1e-5);
        assert_relative_eq!(angle(2000), PI / 2.0, epsilon = 1e-6);
        assert_relative_eq!(angle(16), 2.0 * PI * 16.0 / 8000.0, epsilon = 1e-7);
        assert_eq!(animator.rotation_angle(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_update_composes_rotation() {
        let start = Instant::now();
        let animator = Animator::default();
        let mut shape = spinning(ShapeKind::Scutoid, start);
        let before = shape.model;

        let now = start + Duration::from_millis(2000);
        animator.update(&mut shape, now);

        let expected = before * Transform::rotation_matrix(&Vector3::y_axis(), PI / 2.0);
        assert_relative_eq!(shape.model, expected, epsilon = 1e-6);
        assert_eq!(shape.last_update, now);

        // Translation from construction is kept
        let origin = shape.model.transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::new(0.0, 0.0, -5.0), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_elapsed_is_a_no_op() {
        let start = Instant::now();
        let animator = Animator::default();
        let mut shape = oscillating(start);
        animator.update(&mut shape, start + Duration::from_millis(100));
        let model = shape.model;
        let stamp = shape.last_update;
        let timer = shape.oscillation.as_ref().unwrap().run_timer;

        animator.update(&mut shape, stamp);

        assert_eq!(shape.model, model);
        assert_eq!(shape.last_update, stamp);
        assert_eq!(shape.oscillation.as_ref().unwrap().run_timer, timer);
    }

    #[test]
    fn test_clock_going_backwards_is_ignored() {
        let start = Instant::now() + Duration::from_secs(1);
        let animator = Animator::default();
        let mut shape = spinning(ShapeKind::Pyramid, start);
        let model = shape.model;

        animator.update(&mut shape, start - Duration::from_millis(500));

        assert_eq!(shape.model, model);
        assert_eq!(shape.last_update, start);
    }

    #[test]
    fn test_static_shapes_do_not_translate() {
        let start = Instant::now();
        let animator = Animator::default();
        let mut shape = spinning(ShapeKind::Pyramid, start);
        for frame in 1..=300 {
            animator.update(&mut shape, start + Duration::from_millis(16 * frame));
        }
        let origin = shape.model.transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::new(0.0, 0.0, -5.0), epsilon = 1e-4);
    }

    #[test]
    fn test_direction_flips_once_at_threshold() {
        let start = Instant::now();
        let animator = Animator::default();
        let mut shape = oscillating(start);

        let mut flips = 0;
        let mut up = true;
        let mut now = start;
        // 43 steps of 100ms reach exactly 4300ms
        for _ in 0..43 {
            now += Duration::from_millis(100);
            animator.update(&mut shape, now);
            let oscillation = shape.oscillation.as_ref().unwrap();
            if oscillation.up != up {
                flips += 1;
                up = oscillation.up;
            }
        }

        let oscillation = shape.oscillation.as_ref().unwrap();
        assert_eq!(flips, 1);
        assert!(!oscillation.up);
        assert_eq!(oscillation.run_timer, Duration::ZERO);
    }

    #[test]
    fn test_overshoot_is_discarded() {
        let start = Instant::now();
        let animator = Animator::default();
        let mut shape = oscillating(start);

        animator.update(&mut shape, start + Duration::from_millis(4000));
        assert!(shape.oscillation.as_ref().unwrap().up);

        animator.update(&mut shape, start + Duration::from_millis(4500));
        let oscillation = shape.oscillation.as_ref().unwrap();
        assert!(!oscillation.up);
        assert_eq!(oscillation.run_timer, Duration::ZERO);

        animator.update(&mut shape, start + Duration::from_millis(4600));
        let timer = shape.oscillation.as_ref().unwrap().run_timer;
        assert_eq!(timer, Duration::from_millis(100));
    }

    #[test]
    fn test_step_uses_direction_before_flip() {
        let start = Instant::now();
        let animator = Animator::default();
        let mut shape = oscillating(start);
        let mut expected = shape.model;

        // Crossing the threshold still steps along the primary vector
        let now = start + Duration::from_millis(4300);
        animator.update(&mut shape, now);
        let angle = animator.rotation_angle(Duration::from_millis(4300));
        Transform::rotate(&mut expected, &Vector3::y_axis(), angle);
        Transform::translate(&mut expected, &Vector3::new(0.0, 0.1, 0.0));
        assert_relative_eq!(shape.model, expected, epsilon = 1e-6);

        // The next step goes the other way
        animator.update(&mut shape, now + Duration::from_millis(10));
        let angle = animator.rotation_angle(Duration::from_millis(10));
        Transform::rotate(&mut expected, &Vector3::y_axis(), angle);
        Transform::translate(&mut expected, &Vector3::new(0.0, -0.1, 0.0));
        assert_relative_eq!(shape.model, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_round_trip_returns_home() {
        let start = Instant::now();
        let animator = Animator::default();
        let mut shape = Shape::new(
            Geometry::build(ShapeKind::Octahedron),
            &Vector3::zeros(),
            Vector3::z_axis(),
            start,
        )
        .with_oscillation(Oscillation::new(
            Vector3::new(0.0, 0.0, 0.5),
            Vector3::new(0.0, 0.0, -0.5),
        ));

        // Translation along the rotation axis is unaffected by the spin
        let mut now = start;
        for _ in 0..(43 * 2) {
            now += Duration::from_millis(100);
            animator.update(&mut shape, now);
        }
        let origin = shape.model.transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::origin(), epsilon = 1e-4);
        assert!(shape.oscillation.as_ref().unwrap().up);
    }
}
