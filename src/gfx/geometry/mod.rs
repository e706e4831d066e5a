//! # Procedural Geometry Generation
//!
//! Unit-sized primitive shapes generated on startup, so the viewer needs no
//! model files. All shapes are Y-up and carry normals and texture
//! coordinates.
//!
//! ## Supported Primitives
//!
//! - **Plane**: 2x2 quad in the XZ plane, normal +Y
//! - **Box**: unit cube centered at the origin
//! - **Cylinder**, **Cone**, **Tapered cylinder**: base on y = 0, top at y = 1
//! - **Sphere**: radius 1 UV sphere
//! - **Torus**: ring in the XY plane around the Z axis
//!
//! ## Usage
//!
//! ```rust
//! use tabletop::gfx::geometry::{generate_box, generate_sphere, generate_plane};
//!
//! let box_data = generate_box();
//! let sphere_data = generate_sphere(32, 16);
//! let floor = generate_plane(1.0, 1.0, 1, 1);
//! assert_eq!(floor.triangle_count(), 2);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Generated geometry ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub(crate) fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
        index
    }

    /// Interleaves positions, normals and uvs into the renderer's vertex format
    pub fn to_scene_format(&self) -> (Vec<Vertex3D>, Vec<u32>) {
        let vertices = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}
