use bevy::log::{debug, info};
use bevy::math::DVec3;

use super::{ElevationPolicy, HeightGrid};
use crate::error::{Error, Result};

/// Vertex ids of one triangle, in winding order.
pub type Triangle = [u32; 3];

/// A dense triangulated height field. Topology is fixed at build time; the
/// model transforms only move vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub width: usize,
    pub height: usize,
    pub vertices: Vec<DVec3>,
    pub faces: Vec<Triangle>,
}
impl Mesh {
    pub fn vertex_id(&self, x: usize, y: usize) -> u32 {
        vertex_id(self.width, x, y)
    }
    pub fn vertex(&self, x: usize, y: usize) -> DVec3 {
        self.vertices[self.vertex_id(x, y) as usize]
    }
    pub fn first_vertex(&self) -> Option<DVec3> {
        self.vertices.first().copied()
    }
    pub fn last_vertex(&self) -> Option<DVec3> {
        self.vertices.last().copied()
    }
    pub fn centroid(&self) -> DVec3 {
        if self.vertices.is_empty() {
            return DVec3::ZERO;
        }
        let sum: DVec3 = self.vertices.iter().copied().sum();
        return sum / self.vertices.len() as f64;
    }
}

fn vertex_id(width: usize, x: usize, y: usize) -> u32 {
    (width * y + x) as u32
}

/// Errors when some pixel of a `width` x `height` grid has no `u32` vertex id.
pub fn check_vertex_ids(width: usize, height: usize) -> Result<()> {
    let count = width.checked_mul(height);
    match count {
        Some(count) if count as u64 <= u64::from(u32::MAX) + 1 => Ok(()),
        _ => Err(Error::TooManyVertices { width, height }),
    }
}

/// Triangle count of a dense `width` x `height` grid.
pub fn regular_grid_triangle_count(width: usize, height: usize) -> usize {
    2 * width.saturating_sub(1) * height.saturating_sub(1)
}

/// Appends two triangles per grid cell. For the cell with corners
///
/// ```text
/// A D      A = (x, y)      D = (x + 1, y)
/// B C      B = (x, y + 1)  C = (x + 1, y + 1)
/// ```
///
/// the triangles are `(A, B, D)` then `(B, C, D)`.
pub fn add_regular_grid_indices(width: usize, height: usize, faces: &mut Vec<Triangle>) {
    faces.reserve(regular_grid_triangle_count(width, height));
    for y in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let a = vertex_id(width, x, y);
            let b = vertex_id(width, x, y + 1);
            let c = vertex_id(width, x + 1, y + 1);
            let d = vertex_id(width, x + 1, y);
            faces.push([a, b, d]);
            faces.push([b, c, d]);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MeshBuilder {
    pub policy: ElevationPolicy,
}
impl MeshBuilder {
    pub fn new(policy: ElevationPolicy) -> Self {
        Self { policy }
    }
    /// Builds one vertex per sample in row-major order, then the faces.
    /// `position` receives the pixel and its normalized elevation.
    pub fn build(
        &self,
        grid: &HeightGrid,
        mut position: impl FnMut(usize, usize, f64) -> DVec3,
    ) -> Result<Mesh> {
        let width = grid.width();
        let height = grid.height();
        check_vertex_ids(width, height)?;

        info!("Creating vertices...");
        let mut vertices = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let elevation = self.policy.normalize(grid.sample(x, y));
                vertices.push(position(x, y, elevation));
            }
        }

        info!("Creating faces...");
        let mut faces = Vec::new();
        add_regular_grid_indices(width, height, &mut faces);
        debug!(
            "built mesh with {} vertices and {} faces",
            vertices.len(),
            faces.len()
        );

        return Ok(Mesh {
            width,
            height,
            vertices,
            faces,
        });
    }
}
