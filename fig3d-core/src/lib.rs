//! fig3d core library - shape geometry and animation
//!
//! This library holds the hand-authored solids, the transform animator and the
//! frame driver. Drawing goes through the [`GraphicsBackend`] trait so hosts can
//! render wherever they like.

pub mod animation;
pub mod backend;
pub mod config;
pub mod frame;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod shape;
pub mod transform;

// Re-export commonly used types
pub use animation::Animator;
pub use backend::{GraphicsBackend, RefreshScheduler};
pub use config::{AnimationConfig, OscillationConfig, ProjectionConfig, SceneConfig, ShapePlacement};
pub use frame::FrameDriver;
pub use geometry::{Geometry, Rgba, ShapeKind};
pub use projection::{project_to_screen, Projection};
pub use scene::Scene;
pub use shape::{Oscillation, Shape};
pub use transform::Transform;
