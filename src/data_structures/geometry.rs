//! Primitive geometry shared by mesh bodies.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Primitive shapes a mesh body can be built from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

impl Default for Geometry {
    fn default() -> Self {
        Self::Sphere {
            radius: 1.0,
            width_segments: 25,
            height_segments: 25,
        }
    }
}

/// Tessellated vertex data, ready to be uploaded by a rendering backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Geometry {
    /// Builds a UV sphere: `(width + 1) * (height + 1)` vertices with a seam column,
    /// and no degenerate triangles at the poles.
    pub fn tessellate(&self) -> MeshData {
        match *self {
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere(radius, width_segments.max(3), height_segments.max(2)),
        }
    }
}

fn sphere(radius: f32, width: u32, height: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height as usize + 1);
    let mut index = 0;

    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        // nudge the pole texture coordinate so that pole fans don't collapse in uv space
        let u_offset = match iy {
            0 => 0.5 / width as f32,
            _ if iy == height => -0.5 / width as f32,
            _ => 0.0,
        };
        let mut row = Vec::with_capacity(width as usize + 1);
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let phi = u * 2.0 * PI;
            let theta = v * PI;
            let position = [
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ];
            let length = (position[0].powi(2) + position[1].powi(2) + position[2].powi(2)).sqrt();
            let normal = if length > 0.0 {
                [position[0] / length, position[1] / length, position[2] / length]
            } else {
                [0.0, 1.0, 0.0]
            };
            mesh.positions.push(position);
            mesh.normals.push(normal);
            mesh.tex_coords.push([u + u_offset, 1.0 - v]);
            row.push(index);
            index += 1;
        }
        grid.push(row);
    }

    for iy in 0..height as usize {
        for ix in 0..width as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height as usize - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}
