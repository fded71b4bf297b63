//! Per-frame draw and update pass
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use crate::animation::Animator;
use crate::backend::GraphicsBackend;
use crate::scene::Scene;

/// Backend handles for one shape
struct ShapeBuffers<B: GraphicsBackend> {
    vertices: B::VertexBuffer,
    colors: B::ColorBuffer,
    indices: B::IndexBuffer,
}

/// Owns the scene and the backend buffers uploaded for it.
///
/// Each frame draws a shape with its current transform and only then
/// advances it, so what is on screen trails the animation state by one frame.
pub struct FrameDriver<B: GraphicsBackend> {
    scene: Scene,
    animator: Animator,
    buffers: Vec<ShapeBuffers<B>>,
}

impl<B: GraphicsBackend> FrameDriver<B> {
    /// Upload every shape's buffers
    pub fn new(backend: &mut B, scene: Scene, animator: Animator) -> Result<Self> {
        let mut buffers = Vec::with_capacity(scene.shapes.len());
        for shape in &scene.shapes {
            let geometry = &shape.geometry;
            let name = geometry.kind.name();
            buffers.push(ShapeBuffers {
                vertices: backend
                    .create_vertex_buffer(&geometry.positions)
                    .with_context(|| format!("Failed to upload {name} vertices"))?,
                colors: backend
                    .create_color_buffer(&geometry.colors)
                    .with_context(|| format!("Failed to upload {name} colors"))?,
                indices: backend
                    .create_index_buffer(&geometry.indices)
                    .with_context(|| format!("Failed to upload {name} indices"))?,
            });
            debug!(shape = name, "Uploaded buffers");
        }

        Ok(Self {
            scene,
            animator,
            buffers,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Draw every shape, then move it to `now`
    pub fn run_frame(&mut self, backend: &mut B, now: Instant) {
        let projection = &self.scene.projection;
        for (shape, buffers) in self.scene.shapes.iter_mut().zip(&self.buffers) {
            backend.draw(
                &buffers.vertices,
                &buffers.colors,
                &buffers.indices,
                shape.geometry.triangle_count(),
                &shape.model,
                projection,
            );
            self.animator.update(shape, now);
        }
    }
}
