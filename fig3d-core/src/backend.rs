//! Interface to the graphics layer that owns buffers and draw submission
use anyhow::Result;
use nalgebra::{Matrix4, Point3};

use crate::geometry::Rgba;

/// Uploads shape buffers once and draws indexed triangle lists.
///
/// Buffer creation may fail (out of device memory, lost context); drawing may
/// not, since every handle it receives came from a successful upload.
pub trait GraphicsBackend {
    type VertexBuffer;
    type ColorBuffer;
    type IndexBuffer;

    fn create_vertex_buffer(&mut self, positions: &[Point3<f32>]) -> Result<Self::VertexBuffer>;

    fn create_color_buffer(&mut self, colors: &[Rgba]) -> Result<Self::ColorBuffer>;

    fn create_index_buffer(&mut self, indices: &[u16]) -> Result<Self::IndexBuffer>;

    fn draw(
        &mut self,
        vertices: &Self::VertexBuffer,
        colors: &Self::ColorBuffer,
        indices: &Self::IndexBuffer,
        triangle_count: usize,
        model: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    );
}

/// Calls `frame` once per display refresh until the host stops or `frame`
/// fails.
pub trait RefreshScheduler {
    fn run<F>(&mut self, frame: F) -> Result<()>
    where
        F: FnMut() -> Result<()>;
}
