//! Hand-authored solids and their render buffers
use std::ops::Range;

use nalgebra::Point3;

/// RGBA color, each channel in `0.0..=1.0`
pub type Rgba = [f32; 4];

/// The solids the scene knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Octahedron,
    Scutoid,
    Pyramid,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Octahedron, ShapeKind::Scutoid, ShapeKind::Pyramid];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Octahedron => "octahedron",
            ShapeKind::Scutoid => "scutoid",
            ShapeKind::Pyramid => "pyramid",
        }
    }

    fn solid(self) -> &'static Solid {
        match self {
            ShapeKind::Octahedron => &OCTAHEDRON,
            ShapeKind::Scutoid => &SCUTOID,
            ShapeKind::Pyramid => &PYRAMID,
        }
    }
}

/// A planar polygon of a solid.
///
/// `corners` index into the solid's corner table. `triangles` are local to the
/// face: 0 is the face's first corner.
struct Face {
    corners: &'static [usize],
    color: Rgba,
    triangles: &'static [[u16; 3]],
}

struct Solid {
    corners: &'static [[f32; 3]],
    faces: &'static [Face],
}

const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
const GREEN: Rgba = [0.0, 1.0, 0.0, 1.0];
const BLUE: Rgba = [0.0, 0.0, 1.0, 1.0];
const CYAN: Rgba = [0.0, 1.0, 1.0, 1.0];
const YELLOW: Rgba = [1.0, 1.0, 0.0, 1.0];
const MAGENTA: Rgba = [1.0, 0.0, 1.0, 1.0];
const SALMON: Rgba = [1.0, 0.6, 0.4, 1.0];
const OLIVE: Rgba = [0.4, 0.6, 0.2, 1.0];
const ORANGE: Rgba = [0.8, 0.5, 0.0, 1.0];
const NAVY: Rgba = [0.1, 0.3, 0.6, 1.0];

const SINGLE: &[[u16; 3]] = &[[0, 1, 2]];

static OCTAHEDRON: Solid = Solid {
    corners: &[
        [0.0, -0.75, 0.0],
        [-0.75, 0.0, 0.0],
        [0.0, 0.0, 0.75],
        [0.75, 0.0, 0.0],
        [0.0, 0.0, -0.75],
        [0.0, 0.75, 0.0],
    ],
    faces: &[
        // Lower half, fanned around the bottom apex
        Face { corners: &[0, 1, 2], color: RED, triangles: SINGLE },
        Face { corners: &[0, 2, 3], color: BLUE, triangles: SINGLE },
        Face { corners: &[0, 3, 4], color: GREEN, triangles: SINGLE },
        Face { corners: &[0, 4, 1], color: CYAN, triangles: SINGLE },
        // Upper half
        Face { corners: &[5, 1, 2], color: YELLOW, triangles: SINGLE },
        Face { corners: &[5, 2, 3], color: MAGENTA, triangles: SINGLE },
        Face { corners: &[5, 3, 4], color: SALMON, triangles: SINGLE },
        Face { corners: &[5, 4, 1], color: OLIVE, triangles: SINGLE },
    ],
};

static SCUTOID: Solid = Solid {
    corners: &[
        // Hexagonal top
        [-0.7, 1.5, 1.0],
        [-1.5, 1.5, 0.0],
        [-0.7, 1.5, -1.2],
        [0.7, 1.5, 1.0],
        [1.5, 1.5, 0.0],
        [0.7, 1.5, -1.2],
        // Pentagonal bottom
        [0.0, -1.5, 1.0],
        [-0.9, -1.5, 0.2],
        [0.9, -1.5, 0.2],
        [0.6, -1.5, -1.0],
        [-0.6, -1.5, -1.0],
        // Apex on the front side
        [0.0, 0.0, 1.4],
    ],
    faces: &[
        Face {
            corners: &[0, 1, 2, 3, 4, 5],
            color: RED,
            triangles: &[[0, 1, 2], [0, 2, 3], [3, 2, 5], [3, 4, 5]],
        },
        Face {
            corners: &[6, 7, 8, 9, 10],
            color: GREEN,
            triangles: &[[0, 1, 4], [0, 2, 3], [0, 3, 4]],
        },
        Face {
            corners: &[5, 2, 10, 9],
            color: CYAN,
            triangles: &[[0, 1, 3], [1, 2, 3]],
        },
        Face {
            corners: &[1, 2, 7, 10],
            color: ORANGE,
            triangles: &[[0, 1, 3], [0, 2, 3]],
        },
        Face {
            corners: &[4, 5, 8, 9],
            color: YELLOW,
            triangles: &[[0, 1, 2], [1, 2, 3]],
        },
        Face {
            corners: &[0, 3, 11],
            color: MAGENTA,
            triangles: SINGLE,
        },
        Face {
            corners: &[1, 0, 11, 7, 6],
            color: NAVY,
            triangles: &[[0, 1, 3], [1, 2, 3], [2, 3, 4]],
        },
        Face {
            corners: &[11, 6, 3, 4, 8],
            color: OLIVE,
            triangles: &[[2, 3, 4], [0, 2, 4], [0, 1, 4]],
        },
    ],
};

static PYRAMID: Solid = Solid {
    corners: &[
        [0.0, -1.5, -1.0],
        [-0.95, -1.5, -0.31],
        [-0.59, -1.5, 0.81],
        [0.59, -1.5, 0.81],
        [0.95, -1.5, -0.31],
        [0.0, 1.0, 0.0],
    ],
    faces: &[
        Face {
            corners: &[0, 1, 2, 3, 4],
            color: RED,
            triangles: &[[0, 1, 2], [0, 2, 3], [0, 3, 4]],
        },
        Face { corners: &[0, 1, 5], color: GREEN, triangles: SINGLE },
        Face { corners: &[1, 2, 5], color: BLUE, triangles: SINGLE },
        Face { corners: &[2, 3, 5], color: CYAN, triangles: SINGLE },
        Face { corners: &[3, 4, 5], color: YELLOW, triangles: SINGLE },
        Face { corners: &[4, 0, 5], color: MAGENTA, triangles: SINGLE },
    ],
};

/// Vertex, color and index buffers for one solid.
///
/// Every face gets its own copy of its corners so a face can carry a flat
/// color; `colors[i]` belongs to `positions[i]`.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub kind: ShapeKind,
    pub positions: Vec<Point3<f32>>,
    pub colors: Vec<Rgba>,
    pub indices: Vec<u16>,
    face_spans: Vec<Range<usize>>,
}

impl Geometry {
    pub fn build(kind: ShapeKind) -> Self {
        let solid = kind.solid();
        let vertex_count = solid.faces.iter().map(|face| face.corners.len()).sum();
        let index_count = solid.faces.iter().map(|face| face.triangles.len() * 3).sum();

        let mut positions = Vec::with_capacity(vertex_count);
        let mut colors = Vec::with_capacity(vertex_count);
        let mut indices = Vec::with_capacity(index_count);
        let mut face_spans = Vec::with_capacity(solid.faces.len());

        for face in solid.faces {
            let base = positions.len();
            for &corner in face.corners {
                let [x, y, z] = solid.corners[corner];
                positions.push(Point3::new(x, y, z));
                colors.push(face.color);
            }
            for triangle in face.triangles {
                indices.extend(triangle.iter().map(|&local| base as u16 + local));
            }
            face_spans.push(base..positions.len());
        }

        Self {
            kind,
            positions,
            colors,
            indices,
            face_spans,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex ranges of each face, in face order
    pub fn face_spans(&self) -> &[Range<usize>] {
        &self.face_spans
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Positions as `x, y, z` triples for backends that upload raw floats
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    /// Colors as `r, g, b, a` quadruples
    pub fn flat_colors(&self) -> Vec<f32> {
        self.colors.iter().flatten().copied().collect()
    }
}
