//! Colored cell rasterizer for terminal rendering
use anyhow::{bail, Result};
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use fig3d_core::{project_to_screen, GraphicsBackend, Rgba, Transform};
use nalgebra::{Matrix4, Point3};
use std::io::Write;

/// Glyph that fills a whole cell with the foreground color
const FILL: char = '█';

/// Background, matching a dark grey clear color
pub const CLEAR_COLOR: Rgba = [0.1, 0.1, 0.1, 1.0];

/// Handle into one of the renderer's buffer pools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferId(usize);

/// Software rasterizer that draws shapes into a grid of terminal cells
pub struct TerminalRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    color_buffer: Vec<Rgba>,
    vertex_buffers: Vec<Vec<Point3<f32>>>,
    color_buffers: Vec<Vec<Rgba>>,
    index_buffers: Vec<Vec<u16>>,
}

impl TerminalRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            color_buffer: vec![CLEAR_COLOR; size],
            vertex_buffers: Vec::new(),
            color_buffers: Vec::new(),
            index_buffers: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.color_buffer.fill(CLEAR_COLOR);
    }

    /// Color of the cell at column `x`, row `y`
    pub fn cell(&self, x: usize, y: usize) -> Rgba {
        self.color_buffer[y * self.width + x]
    }

    fn rasterize_triangle(&mut self, coords: &[Point3<f32>; 3], colors: &[Rgba; 3]) {
        let [v0, v1, v2] = coords;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let weights = barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py));
                let Some((w0, w1, w2)) = weights else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.z + w1 * v1.z + w2 * v2.z;
                // Outside the near/far planes
                if !(-1.0..=1.0).contains(&depth) {
                    continue;
                }

                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.color_buffer[idx] = blend(colors, (w0, w1, w2));
                }
            }
        }
    }

    /// Write the frame starting at terminal row `top`
    pub fn present<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, top + y as u16))?;
            for x in 0..self.width {
                let color = to_terminal_color(&self.cell(x, y));
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(FILL))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    fn lookup<'a, T>(pool: &'a [Vec<T>], id: &BufferId) -> &'a [T] {
        // Ids are only handed out by this renderer
        &pool[id.0]
    }
}

impl GraphicsBackend for TerminalRenderer {
    type VertexBuffer = BufferId;
    type ColorBuffer = BufferId;
    type IndexBuffer = BufferId;

    fn create_vertex_buffer(&mut self, positions: &[Point3<f32>]) -> Result<BufferId> {
        self.vertex_buffers.push(positions.to_vec());
        Ok(BufferId(self.vertex_buffers.len() - 1))
    }

    fn create_color_buffer(&mut self, colors: &[Rgba]) -> Result<BufferId> {
        self.color_buffers.push(colors.to_vec());
        Ok(BufferId(self.color_buffers.len() - 1))
    }

    fn create_index_buffer(&mut self, indices: &[u16]) -> Result<BufferId> {
        if indices.len() % 3 != 0 {
            bail!("index buffer of {} entries is not a triangle list", indices.len());
        }
        self.index_buffers.push(indices.to_vec());
        Ok(BufferId(self.index_buffers.len() - 1))
    }

    fn draw(
        &mut self,
        vertices: &BufferId,
        colors: &BufferId,
        indices: &BufferId,
        triangle_count: usize,
        model: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        let mvp = Transform::mvp_matrix(model, projection);
        let (width, height) = (self.width as u32, self.height as u32);

        // Project first; rasterizing borrows self mutably
        let mut triangles = Vec::with_capacity(triangle_count);
        {
            let positions = Self::lookup(&self.vertex_buffers, vertices);
            let palette = Self::lookup(&self.color_buffers, colors);
            let list = Self::lookup(&self.index_buffers, indices);
            for triangle in list.chunks_exact(3).take(triangle_count) {
                let corners = [triangle[0], triangle[1], triangle[2]].map(usize::from);
                let projected = corners
                    .map(|i| project_to_screen(&mvp, &positions[i], width, height));
                // Skip triangles that reach behind the camera
                let [Some(a), Some(b), Some(c)] = projected else {
                    continue;
                };
                triangles.push(([a, b, c], corners.map(|i| palette[i])));
            }
        }

        for (coords, corner_colors) in &triangles {
            self.rasterize_triangle(coords, corner_colors);
        }
    }
}

/// Interpolate per-vertex colors at a barycentric position
fn blend(colors: &[Rgba; 3], weights: (f32, f32, f32)) -> Rgba {
    let (w0, w1, w2) = weights;
    std::array::from_fn(|c| w0 * colors[0][c] + w1 * colors[1][c] + w2 * colors[2][c])
}

fn to_terminal_color(color: &Rgba) -> Color {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(color[0]),
        g: channel(color[1]),
        b: channel(color[2]),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
