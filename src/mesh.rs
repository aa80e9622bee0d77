//! Triangle soup: a flat vertex list where every three entries form a triangle

use crate::error::{RenderError, Result};
use crate::math3d::Vec4;

/// Ordered list of triangle vertices. Triangle `i` is
/// `vertices[3i], vertices[3i + 1], vertices[3i + 2]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec4>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Wrap a raw vertex list. The length is not checked here;
    /// `validate` (and every draw) reports a partial triangle.
    pub fn from_vertices(vertices: Vec<Vec4>) -> Self {
        Self { vertices }
    }

    pub fn add_triangle(&mut self, a: Vec4, b: Vec4, c: Vec4) {
        self.vertices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertices(&self) -> &[Vec4] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() % 3 == 0 {
            Ok(())
        } else {
            Err(RenderError::IncompleteTriangle(self.vertices.len()))
        }
    }

    /// Complete triangles in order; a trailing partial triangle is skipped
    pub fn triangles(&self) -> impl Iterator<Item = [Vec4; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Axis-aligned cube centered at the origin, two triangles per face
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let a = Vec4::new(-h, -h, -h);
        let b = Vec4::new(h, -h, -h);
        let c = Vec4::new(-h, h, -h);
        let d = Vec4::new(h, h, -h);
        let e = Vec4::new(-h, -h, h);
        let f = Vec4::new(h, -h, h);
        let g = Vec4::new(-h, h, h);
        let i = Vec4::new(h, h, h);

        let mut mesh = Self::with_capacity(12);
        // -Z
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(b, d, c);
        // -X
        mesh.add_triangle(e, a, g);
        mesh.add_triangle(a, c, g);
        // +Z
        mesh.add_triangle(f, e, i);
        mesh.add_triangle(e, g, i);
        // +X
        mesh.add_triangle(b, f, d);
        mesh.add_triangle(f, i, d);
        // +Y
        mesh.add_triangle(c, d, g);
        mesh.add_triangle(d, i, g);
        // -Y
        mesh.add_triangle(e, f, a);
        mesh.add_triangle(f, b, a);
        mesh
    }
}
